//! Tunable PID parameters with bounds, defaults and step sizes.
//!
//! This module provides the [`ParameterRegistry`], an ordered table of
//! [`Parameter`] descriptors backing the on-device tuning menu and the
//! serial tuning link.
//!
//! # Architecture
//!
//! Descriptors never own the value they describe. Each one names a
//! [`ControlCell`] inside [`ControlState`], and every registry accessor
//! takes the state by reference:
//!
//! ```text
//! PARAMETERS (registry)          ControlState (cells)
//! [0] Setpoint ───────────────►  setpoint
//! [1] Kp       ───────────────►  kp
//! [2] Ki       ───────────────►  ki
//! [3] Kd       ───────────────►  kd
//!                                input, output, dht_temperature_c
//! ```
//!
//! The control loop reads `kp`/`ki`/`kd`/`setpoint` straight from
//! [`ControlState`]; the menu and serial link write them through the
//! registry so that every write is clamped to `[min_value, max_value]`.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. The built-in table is a `static` array and the
//! registry borrows it. The optional `defmt` feature enables structured
//! logging for embedded targets.

mod control;
mod error;
mod parameter;
mod registry;

pub use control::ControlState;
pub use error::ParameterError;
pub use parameter::{ControlCell, Parameter, SetOutcome};
pub use registry::ParameterRegistry;

/// Built-in parameter table, in menu display order.
///
/// **Invariant:** every entry satisfies [`Parameter::is_valid`] and names
/// are unique. Adding a parameter here requires no other code change as
/// long as its [`ControlCell`] already exists.
pub static PARAMETERS: [Parameter; 4] = [
    Parameter::new("Setpoint", ControlCell::Setpoint, 25.0, 10.0, 40.0, 0.5),
    Parameter::new("Kp", ControlCell::Kp, 2.0, 0.0, 10.0, 0.1),
    Parameter::new("Ki", ControlCell::Ki, 0.5, 0.0, 5.0, 0.01),
    Parameter::new("Kd", ControlCell::Kd, 1.0, 0.0, 10.0, 0.1),
];
