//! Answers for operations that have no state behind them.
//!
//! Android devices do not track activation, claimability or host-driven
//! status changes in this service. These calls consult nothing and return
//! the constants below; do not read meaning into the values.

pub const IS_ACTIVE: bool = true;
pub const SET_ACTIVE: bool = true;
pub const SET_OWNERSHIP: bool = true;
pub const IS_CLAIMABLE: bool = false;
pub const SET_STATUS: bool = false;
