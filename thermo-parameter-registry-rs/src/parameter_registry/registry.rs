use super::control::ControlState;
use super::error::ParameterError;
use super::parameter::{Parameter, SetOutcome};
use super::PARAMETERS;

/// Ordered table of tunable parameters with bounds-checked access to the
/// cells they describe.
///
/// The registry only holds descriptors. Live values stay in
/// [`ControlState`], which every accessor takes by reference, so the
/// control loop keeps reading its cells directly while the menu and serial
/// link go through the bounds logic here.
///
/// Table order is display order.
#[derive(Debug, Clone, Copy)]
pub struct ParameterRegistry<'a> {
    params: &'a [Parameter],
}

impl ParameterRegistry<'static> {
    /// Registry over the built-in [`PARAMETERS`] table.
    pub fn builtin() -> Self {
        Self {
            params: &PARAMETERS,
        }
    }
}

impl Default for ParameterRegistry<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> ParameterRegistry<'a> {
    /// Build a registry over `params`, validating every descriptor.
    ///
    /// Returns [`ParameterError::InvalidDescriptor`] if any descriptor
    /// fails [`Parameter::is_valid`], [`ParameterError::DuplicateName`]
    /// if two share a name, or [`ParameterError::DuplicateCell`] if two are
    /// bound to the same cell.
    pub fn new(params: &'a [Parameter]) -> Result<Self, ParameterError> {
        for (i, param) in params.iter().enumerate() {
            if !param.is_valid() {
                return Err(ParameterError::InvalidDescriptor);
            }
            if params[..i].iter().any(|other| other.name == param.name) {
                return Err(ParameterError::DuplicateName);
            }
            if params[..i].iter().any(|other| other.cell == param.cell) {
                return Err(ParameterError::DuplicateCell);
            }
        }
        Ok(Self { params })
    }

    /// Number of registered parameters.
    pub fn count(&self) -> usize {
        self.params.len()
    }

    /// Descriptor at `index`.
    pub fn parameter(&self, index: usize) -> Result<&'a Parameter, ParameterError> {
        match self.params.get(index) {
            Some(param) => Ok(param),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("parameter index {} out of range", index);
                Err(ParameterError::OutOfRange)
            }
        }
    }

    /// Iterate descriptors in display order.
    pub fn iter(&self) -> core::slice::Iter<'a, Parameter> {
        self.params.iter()
    }

    /// Display name of the parameter at `index`.
    pub fn name_of(&self, index: usize) -> Result<&'a str, ParameterError> {
        Ok(self.parameter(index)?.name)
    }

    /// Index of the parameter called `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Current value of the parameter at `index`.
    pub fn get(&self, control: &ControlState, index: usize) -> Result<f32, ParameterError> {
        let param = self.parameter(index)?;
        Ok(control.cell(param.cell))
    }

    /// Store `value` into the parameter's cell, clamped to its bounds.
    ///
    /// NaN is rejected with [`ParameterError::NotANumber`] and the cell is
    /// left untouched. Infinities clamp to the nearest bound.
    pub fn set(
        &self,
        control: &mut ControlState,
        index: usize,
        value: f32,
    ) -> Result<SetOutcome, ParameterError> {
        let param = self.parameter(index)?;
        if value.is_nan() {
            return Err(ParameterError::NotANumber);
        }

        let (stored, outcome) = param.clamp(value);
        control.set_cell(param.cell, stored);

        if outcome.is_clamped() {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} clamped to {}", param.name, stored);
        }

        Ok(outcome)
    }

    /// Move the parameter by `steps` increments (negative steps move down),
    /// clamped to its bounds. Returns the stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo::parameter_registry::{ControlState, ParameterRegistry};
    ///
    /// let registry = ParameterRegistry::builtin();
    /// let mut control = ControlState::default();
    /// let kp = registry.index_of("Kp").unwrap();
    ///
    /// registry.reset(&mut control, kp).unwrap(); // 2.0
    /// for _ in 0..5 {
    ///     registry.adjust(&mut control, kp, 1).unwrap();
    /// }
    /// assert!((registry.get(&control, kp).unwrap() - 2.5).abs() < 1e-4);
    /// ```
    pub fn adjust(
        &self,
        control: &mut ControlState,
        index: usize,
        steps: i32,
    ) -> Result<f32, ParameterError> {
        let param = self.parameter(index)?;
        let target = control.cell(param.cell) + steps as f32 * param.increment;
        if target.is_nan() {
            return Err(ParameterError::NotANumber);
        }

        let (stored, _) = param.clamp(target);
        control.set_cell(param.cell, stored);
        Ok(stored)
    }

    /// Restore the parameter's default value.
    pub fn reset(&self, control: &mut ControlState, index: usize) -> Result<(), ParameterError> {
        let param = self.parameter(index)?;
        control.set_cell(param.cell, param.default_value);
        Ok(())
    }

    /// Restore every parameter's default value.
    pub fn reset_all(&self, control: &mut ControlState) {
        for param in self.params {
            control.set_cell(param.cell, param.default_value);
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_registry::ControlCell;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    // Table matching the worked Kp example plus a setpoint.
    static TEST_PARAMS: [Parameter; 2] = [
        Parameter::new("Kp", ControlCell::Kp, 2.0, 0.0, 10.0, 0.1),
        Parameter::new("Setpoint", ControlCell::Setpoint, 25.0, 10.0, 40.0, 0.5),
    ];

    fn setup() -> (ParameterRegistry<'static>, ControlState) {
        let registry = ParameterRegistry::new(&TEST_PARAMS).unwrap();
        let mut control = ControlState::default();
        registry.reset_all(&mut control);
        (registry, control)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn builtin_table_is_valid() {
        assert!(ParameterRegistry::new(&PARAMETERS).is_ok());
        assert_eq!(ParameterRegistry::builtin().count(), PARAMETERS.len());
    }

    #[test]
    fn rejects_default_outside_bounds() {
        let bad = [Parameter::new("X", ControlCell::Kp, 11.0, 0.0, 10.0, 0.1)];
        assert_eq!(
            ParameterRegistry::new(&bad).unwrap_err(),
            ParameterError::InvalidDescriptor
        );
    }

    #[test]
    fn rejects_non_positive_increment() {
        let zero = [Parameter::new("X", ControlCell::Kp, 1.0, 0.0, 10.0, 0.0)];
        let negative = [Parameter::new("X", ControlCell::Kp, 1.0, 0.0, 10.0, -0.5)];
        assert!(ParameterRegistry::new(&zero).is_err());
        assert!(ParameterRegistry::new(&negative).is_err());
    }

    #[test]
    fn rejects_empty_and_duplicate_names() {
        let empty = [Parameter::new("", ControlCell::Kp, 1.0, 0.0, 10.0, 0.1)];
        assert_eq!(
            ParameterRegistry::new(&empty).unwrap_err(),
            ParameterError::InvalidDescriptor
        );

        let dup = [
            Parameter::new("Kp", ControlCell::Kp, 1.0, 0.0, 10.0, 0.1),
            Parameter::new("Kp", ControlCell::Ki, 1.0, 0.0, 10.0, 0.1),
        ];
        assert_eq!(
            ParameterRegistry::new(&dup).unwrap_err(),
            ParameterError::DuplicateName
        );
    }

    #[test]
    fn rejects_shared_cell() {
        // Disjoint bounds on one cell: either descriptor could store a value
        // outside the other's range.
        let shared = [
            Parameter::new("Gain", ControlCell::Kp, 1.0, 0.0, 2.0, 0.1),
            Parameter::new("Boost", ControlCell::Kp, 5.0, 4.0, 6.0, 0.1),
        ];
        assert_eq!(
            ParameterRegistry::new(&shared).unwrap_err(),
            ParameterError::DuplicateCell
        );
    }

    // ── get / name_of / count ────────────────────────────────────────

    #[test]
    fn count_and_names_match_table() {
        let registry = ParameterRegistry::builtin();
        assert_eq!(registry.count(), PARAMETERS.len());

        for i in 0..registry.count() {
            let name = registry.name_of(i).unwrap();
            assert!(!name.is_empty());
            for j in (i + 1)..registry.count() {
                assert_ne!(name, registry.name_of(j).unwrap(), "names {} and {} collide", i, j);
            }
        }
    }

    #[test]
    fn out_of_range_index() {
        let (registry, mut control) = setup();
        let n = registry.count();
        assert_eq!(registry.get(&control, n), Err(ParameterError::OutOfRange));
        assert_eq!(registry.set(&mut control, n, 1.0), Err(ParameterError::OutOfRange));
        assert_eq!(registry.adjust(&mut control, n, 1), Err(ParameterError::OutOfRange));
        assert_eq!(registry.reset(&mut control, n), Err(ParameterError::OutOfRange));
        assert_eq!(registry.name_of(100), Err(ParameterError::OutOfRange));
    }

    #[test]
    fn index_of_finds_by_exact_name() {
        let (registry, _) = setup();
        assert_eq!(registry.index_of("Kp"), Some(0));
        assert_eq!(registry.index_of("Setpoint"), Some(1));
        assert_eq!(registry.index_of("kp"), None);
        assert_eq!(registry.index_of("Kd"), None);
    }

    // ── reset ────────────────────────────────────────────────────────

    #[test]
    fn reset_restores_default() {
        let (registry, mut control) = setup();
        for i in 0..registry.count() {
            registry.set(&mut control, i, 7.0).unwrap();
            registry.reset(&mut control, i).unwrap();
            let default = registry.parameter(i).unwrap().default_value;
            assert_eq!(registry.get(&control, i).unwrap(), default);
        }
    }

    #[test]
    fn reset_all_writes_every_cell() {
        let registry = ParameterRegistry::new(&TEST_PARAMS).unwrap();
        let mut control = ControlState::default();
        registry.reset_all(&mut control);
        assert_eq!(control.kp, 2.0);
        assert_eq!(control.setpoint, 25.0);
        // Cells outside the table stay untouched.
        assert_eq!(control.ki, 0.0);
    }

    // ── set ──────────────────────────────────────────────────────────

    #[test]
    fn set_within_bounds_is_exact() {
        let (registry, mut control) = setup();
        assert_eq!(registry.set(&mut control, 0, 3.3), Ok(SetOutcome::Exact));
        assert_eq!(registry.get(&control, 0).unwrap(), 3.3);
        assert_eq!(control.kp, 3.3);
    }

    #[test]
    fn set_accepts_bounds_inclusive() {
        let (registry, mut control) = setup();
        assert_eq!(registry.set(&mut control, 0, 0.0), Ok(SetOutcome::Exact));
        assert_eq!(registry.set(&mut control, 0, 10.0), Ok(SetOutcome::Exact));
    }

    #[test]
    fn set_clamps_low() {
        let (registry, mut control) = setup();
        let min = registry.parameter(1).unwrap().min_value;
        assert_eq!(registry.set(&mut control, 1, min - 1.0), Ok(SetOutcome::Clamped));
        assert_eq!(registry.get(&control, 1).unwrap(), min);
    }

    #[test]
    fn set_clamps_high() {
        let (registry, mut control) = setup();
        let max = registry.parameter(1).unwrap().max_value;
        assert_eq!(registry.set(&mut control, 1, max + 1.0), Ok(SetOutcome::Clamped));
        assert_eq!(registry.get(&control, 1).unwrap(), max);
    }

    #[test]
    fn set_kp_example_clamps_to_ten() {
        let (registry, mut control) = setup();
        let outcome = registry.set(&mut control, 0, 15.0).unwrap();
        assert!(outcome.is_clamped());
        assert_eq!(control.kp, 10.0);
    }

    #[test]
    fn set_infinity_clamps() {
        let (registry, mut control) = setup();
        registry.set(&mut control, 0, f32::INFINITY).unwrap();
        assert_eq!(control.kp, 10.0);
        registry.set(&mut control, 0, f32::NEG_INFINITY).unwrap();
        assert_eq!(control.kp, 0.0);
    }

    #[test]
    fn set_nan_rejected_and_cell_untouched() {
        let (registry, mut control) = setup();
        assert_eq!(registry.set(&mut control, 0, f32::NAN), Err(ParameterError::NotANumber));
        assert_eq!(control.kp, 2.0);
    }

    #[test]
    fn set_always_lands_in_bounds() {
        let (registry, mut control) = setup();
        let probes = [-1000.0, -1.0, 0.0, 0.05, 5.0, 9.99, 10.0, 10.01, 25.0, 1e9];
        for i in 0..registry.count() {
            let param = *registry.parameter(i).unwrap();
            for &v in &probes {
                registry.set(&mut control, i, v).unwrap();
                let got = registry.get(&control, i).unwrap();
                assert!(got >= param.min_value && got <= param.max_value);
                if v >= param.min_value && v <= param.max_value {
                    assert_eq!(got, v);
                }
            }
        }
    }

    // ── adjust ───────────────────────────────────────────────────────

    #[test]
    fn adjust_kp_five_steps_from_default() {
        let (registry, mut control) = setup();
        let mut last = 0.0;
        for _ in 0..5 {
            last = registry.adjust(&mut control, 0, 1).unwrap();
        }
        assert!(approx(last, 2.5), "got {}", last);
        assert!(approx(control.kp, 2.5));
    }

    #[test]
    fn adjust_repeated_saturates_at_max() {
        let (registry, mut control) = setup();
        let param = *registry.parameter(1).unwrap();
        for k in 1..=50 {
            registry.adjust(&mut control, 1, 1).unwrap();
            let expected = (param.default_value + k as f32 * param.increment).min(param.max_value);
            assert!(approx(registry.get(&control, 1).unwrap(), expected), "step {}", k);
        }
        assert_eq!(control.setpoint, param.max_value);
    }

    #[test]
    fn adjust_negative_steps_saturate_at_min() {
        let (registry, mut control) = setup();
        let v = registry.adjust(&mut control, 0, -100).unwrap();
        assert_eq!(v, 0.0);
        let v = registry.adjust(&mut control, 0, 3).unwrap();
        assert!(approx(v, 0.3));
    }

    #[test]
    fn adjust_zero_steps_is_noop() {
        let (registry, mut control) = setup();
        assert_eq!(registry.adjust(&mut control, 1, 0).unwrap(), 25.0);
    }

    #[test]
    fn adjust_nan_cell_rejected() {
        let (registry, mut control) = setup();
        control.kp = f32::NAN;
        assert_eq!(registry.adjust(&mut control, 0, 1), Err(ParameterError::NotANumber));
    }
}
