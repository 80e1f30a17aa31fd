use core::fmt;

use crate::parameter_registry::ParameterError;

/// Errors raised while receiving or applying a serial tuning command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line is not `Name:value`, has an empty name, or is not UTF-8.
    Malformed,
    /// The value part does not parse as a number.
    InvalidNumber,
    /// No registered parameter has this name.
    UnknownParameter,
    /// Line exceeded the receive buffer and was discarded.
    LineTooLong,
    /// The registry rejected the write.
    Parameter(ParameterError),
}

impl From<ParameterError> for CommandError {
    fn from(error: ParameterError) -> Self {
        CommandError::Parameter(error)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::Malformed => write!(f, "malformed command, expected Name:value"),
            CommandError::InvalidNumber => write!(f, "value is not a number"),
            CommandError::UnknownParameter => write!(f, "unknown parameter"),
            CommandError::LineTooLong => write!(f, "line too long"),
            CommandError::Parameter(e) => write!(f, "{}", e),
        }
    }
}
