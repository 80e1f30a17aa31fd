//! Serial tuning link spoken with the PC monitor.
//!
//! The link is plain ASCII, one message per line:
//!
//! ```text
//! device → PC   Setpoint:25.00,Input:23.40,Output:120.00,Kp:2.00,Ki:0.50,Kd:1.00
//! PC → device   Kp:2.5
//! ```
//!
//! Incoming bytes go through a [`LineBuffer`]; each completed line is
//! handed to [`apply_command`], which writes through the registry.

mod command;
mod error;
mod line;
mod telemetry;

pub use command::{apply_command, parse_command, CommandOutcome};
pub use error::CommandError;
pub use line::LineBuffer;
pub use telemetry::{telemetry_line, write_telemetry, TELEMETRY_CAPACITY};

/// Receive buffer size for one command line.
pub const COMMAND_CAPACITY: usize = 64;
