pub mod mobile_devices;
