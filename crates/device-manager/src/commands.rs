use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{Value, json};

use domain::device::{DeviceManagementService, EnrolmentStatus, OwnershipType};
use domain::{Device, DeviceIdentifier};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enroll a new device
    Enroll(DeviceArgs),
    /// Replace the stored enrollment data of a device
    Modify(DeviceArgs),
    /// Update location and properties reported by a device
    UpdateInfo(DeviceArgs),
    /// Show one device
    Get {
        #[arg(long, value_parser = parse_identifier)]
        id: DeviceIdentifier,
    },
    /// List all devices
    List,
    /// Check whether a device is enrolled
    IsEnrolled {
        #[arg(long, value_parser = parse_identifier)]
        id: DeviceIdentifier,
    },
    /// Remove a device
    Disenroll {
        #[arg(long, value_parser = parse_identifier)]
        id: DeviceIdentifier,
    },
}

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Device identifier
    #[arg(long, value_parser = parse_identifier)]
    id: DeviceIdentifier,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Device property, repeatable
    #[arg(long = "prop", value_name = "KEY=VALUE", value_parser = parse_property)]
    properties: Vec<(String, String)>,

    #[arg(long, default_value = "BYOD")]
    ownership: OwnershipType,

    #[arg(long, default_value = "ACTIVE")]
    status: EnrolmentStatus,
}

impl DeviceArgs {
    fn into_device(self, device_type: &str) -> Device {
        let mut device = Device::new(self.id, device_type)
            .with_enrolment(self.ownership, self.status);
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            device = device.with_location(lat, lon);
        }
        for (name, value) in self.properties {
            device = device.with_property(name, value);
        }
        device
    }
}

fn parse_identifier(raw: &str) -> Result<DeviceIdentifier, String> {
    DeviceIdentifier::new(raw).map_err(|e| e.to_string())
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Run one command against a provider and render the result as JSON.
pub async fn execute(provider: &dyn DeviceManagementService, command: Command) -> Result<Value> {
    let device_type = provider.provider_type().to_string();

    let output = match command {
        Command::Enroll(args) => {
            let enrolled = provider
                .enroll_device(&args.into_device(&device_type))
                .await?;
            json!({ "enrolled": enrolled })
        }
        Command::Modify(args) => {
            let modified = provider
                .modify_enrollment(&args.into_device(&device_type))
                .await?;
            json!({ "modified": modified })
        }
        Command::UpdateInfo(args) => {
            let id = args.id.clone();
            let updated = provider
                .update_device_info(&id, &args.into_device(&device_type))
                .await?;
            json!({ "updated": updated })
        }
        Command::Get { id } => serde_json::to_value(provider.get_device(&id).await?)?,
        Command::List => serde_json::to_value(provider.get_all_devices().await?)?,
        Command::IsEnrolled { id } => {
            let enrolled = provider.is_enrolled(&id).await?;
            json!({ "enrolled": enrolled })
        }
        Command::Disenroll { id } => {
            let disenrolled = provider.disenroll_device(&id).await?;
            json!({ "disenrolled": disenrolled })
        }
    };

    Ok(output)
}
