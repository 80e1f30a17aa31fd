use crate::parameter_registry::{ParameterRegistry, SetOutcome};
use crate::state::ProcessState;

use super::error::CommandError;

/// Result of an applied `Name:value` command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandOutcome {
    /// Registry index of the written parameter.
    pub index: usize,
    /// Value stored after clamping.
    pub value: f32,
    /// Whether the requested value was clamped.
    pub outcome: SetOutcome,
}

/// Split a `Name:value` line into its name and numeric value.
///
/// Whitespace around either part is ignored.
pub fn parse_command(line: &str) -> Result<(&str, f32), CommandError> {
    let (name, value) = line.trim().split_once(':').ok_or(CommandError::Malformed)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::Malformed);
    }
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|_| CommandError::InvalidNumber)?;
    Ok((name, value))
}

/// Parse `line` and write the value through the registry.
///
/// Applies registry `set` semantics (clamping, NaN rejection) and requests
/// a display redraw on success so the menu shows the new value.
///
/// # Examples
///
/// ```
/// use thermo::config::MenuConfig;
/// use thermo::parameter_registry::ParameterRegistry;
/// use thermo::serial::apply_command;
/// use thermo::state::ProcessState;
///
/// let registry = ParameterRegistry::builtin();
/// let mut state = ProcessState::new(&registry, &MenuConfig::default());
///
/// let applied = apply_command(&registry, &mut state, "Kp:15").unwrap();
/// assert!(applied.outcome.is_clamped());
/// assert_eq!(state.control.kp, 10.0);
/// ```
pub fn apply_command(
    registry: &ParameterRegistry<'_>,
    state: &mut ProcessState,
    line: &str,
) -> Result<CommandOutcome, CommandError> {
    let (name, requested) = parse_command(line)?;
    let index = registry
        .index_of(name)
        .ok_or(CommandError::UnknownParameter)?;

    let outcome = registry.set(&mut state.control, index, requested)?;
    let value = registry.get(&state.control, index)?;
    state.ui.request_redraw();

    Ok(CommandOutcome {
        index,
        value,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use crate::parameter_registry::ParameterError;

    fn setup() -> (ParameterRegistry<'static>, ProcessState) {
        let registry = ParameterRegistry::builtin();
        let state = ProcessState::new(&registry, &MenuConfig::default());
        (registry, state)
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_command("  Kp : 2.5 "), Ok(("Kp", 2.5)));
        assert_eq!(parse_command("Setpoint:-3"), Ok(("Setpoint", -3.0)));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(parse_command("Kp 2.5"), Err(CommandError::Malformed));
        assert_eq!(parse_command(":2.5"), Err(CommandError::Malformed));
        assert_eq!(parse_command(""), Err(CommandError::Malformed));
    }

    #[test]
    fn parse_rejects_bad_number() {
        assert_eq!(parse_command("Kp:abc"), Err(CommandError::InvalidNumber));
        assert_eq!(parse_command("Kp:"), Err(CommandError::InvalidNumber));
    }

    #[test]
    fn apply_in_bounds_value() {
        let (registry, mut state) = setup();
        state.ui.take_redraw();

        let applied = apply_command(&registry, &mut state, "Ki:0.25").unwrap();
        assert_eq!(applied.index, 2);
        assert_eq!(applied.value, 0.25);
        assert_eq!(applied.outcome, SetOutcome::Exact);
        assert_eq!(state.control.ki, 0.25);
        assert!(state.ui.take_redraw());
    }

    #[test]
    fn apply_clamps_setpoint() {
        let (registry, mut state) = setup();
        let applied = apply_command(&registry, &mut state, "Setpoint:5").unwrap();
        assert_eq!(applied.outcome, SetOutcome::Clamped);
        assert_eq!(applied.value, 10.0);
        assert_eq!(state.control.setpoint, 10.0);
    }

    #[test]
    fn apply_unknown_name() {
        let (registry, mut state) = setup();
        state.ui.take_redraw();
        assert_eq!(
            apply_command(&registry, &mut state, "Output:3"),
            Err(CommandError::UnknownParameter)
        );
        assert!(!state.ui.display_needs_update);
    }

    #[test]
    fn apply_nan_is_rejected() {
        let (registry, mut state) = setup();
        assert_eq!(
            apply_command(&registry, &mut state, "Kd:NaN"),
            Err(CommandError::Parameter(ParameterError::NotANumber))
        );
        assert_eq!(state.control.kd, 1.0);
    }
}
