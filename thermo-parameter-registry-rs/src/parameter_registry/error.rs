use core::fmt;

/// Errors that can occur when working with parameters.
///
/// Values outside `[min_value, max_value]` are not an error: they are
/// clamped and reported through [`SetOutcome::Clamped`](super::SetOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// Parameter index is out of range (must be < `count()`).
    OutOfRange,
    /// Attempted to store NaN into a parameter cell.
    NotANumber,
    /// A descriptor breaks `min <= default <= max`, has a non-positive
    /// increment, a non-finite bound, or an empty name.
    InvalidDescriptor,
    /// Two descriptors share the same name.
    DuplicateName,
    /// Two descriptors are bound to the same [`ControlCell`](super::ControlCell).
    DuplicateCell,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParameterError::OutOfRange => write!(f, "parameter index out of range"),
            ParameterError::NotANumber => write!(f, "value is NaN"),
            ParameterError::InvalidDescriptor => write!(f, "invalid parameter descriptor"),
            ParameterError::DuplicateName => write!(f, "duplicate parameter name"),
            ParameterError::DuplicateCell => write!(f, "control cell bound twice"),
        }
    }
}
