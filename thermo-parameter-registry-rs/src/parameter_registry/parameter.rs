/// Tunable storage cells owned by [`ControlState`](super::ControlState).
///
/// A [`Parameter`] refers to its live value through one of these keys
/// rather than holding the float itself. The control loop reads the same
/// cells directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCell {
    /// Target temperature in °C.
    Setpoint,
    /// Proportional gain.
    Kp,
    /// Integral gain.
    Ki,
    /// Derivative gain.
    Kd,
}

/// Result of a successful write into a parameter cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetOutcome {
    /// The requested value was within bounds and stored as-is.
    Exact,
    /// The requested value was outside `[min_value, max_value]` and the
    /// nearest bound was stored instead.
    Clamped,
}

impl SetOutcome {
    /// Returns `true` if the requested value had to be clamped.
    pub fn is_clamped(&self) -> bool {
        matches!(self, SetOutcome::Clamped)
    }
}

/// Descriptor of one tunable control parameter.
///
/// Descriptors are fixed at build time; only the value in the referenced
/// [`ControlCell`] changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameter {
    /// Display name, unique within a registry.
    pub name: &'static str,
    /// Cell holding the live value.
    pub cell: ControlCell,
    /// Value restored by `reset`.
    pub default_value: f32,
    /// Minimum allowed value (inclusive).
    pub min_value: f32,
    /// Maximum allowed value (inclusive).
    pub max_value: f32,
    /// Step applied per encoder detent. Always `> 0`.
    pub increment: f32,
}

impl Parameter {
    /// Build a descriptor. Usable in `const` tables.
    pub const fn new(
        name: &'static str,
        cell: ControlCell,
        default_value: f32,
        min_value: f32,
        max_value: f32,
        increment: f32,
    ) -> Self {
        Self {
            name,
            cell,
            default_value,
            min_value,
            max_value,
            increment,
        }
    }

    /// Check the descriptor invariants: non-empty name, finite fields,
    /// `min <= default <= max` and `increment > 0`.
    pub fn is_valid(&self) -> bool {
        let finite = self.default_value.is_finite()
            && self.min_value.is_finite()
            && self.max_value.is_finite()
            && self.increment.is_finite();

        finite
            && !self.name.is_empty()
            && self.min_value <= self.default_value
            && self.default_value <= self.max_value
            && self.increment > 0.0
    }

    /// Clamp `v` to `[min_value, max_value]`, reporting whether it moved.
    ///
    /// `v` must not be NaN; callers reject NaN before clamping.
    pub fn clamp(&self, v: f32) -> (f32, SetOutcome) {
        if v < self.min_value {
            (self.min_value, SetOutcome::Clamped)
        } else if v > self.max_value {
            (self.max_value, SetOutcome::Clamped)
        } else {
            (v, SetOutcome::Exact)
        }
    }
}
