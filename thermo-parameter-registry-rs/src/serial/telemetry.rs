use core::fmt::{self, Write};

use heapless::String;

use crate::parameter_registry::{ControlCell, ControlState, ParameterRegistry};

/// Capacity of one telemetry line, newline included.
pub const TELEMETRY_CAPACITY: usize = 128;

/// Write one telemetry report (without line ending).
///
/// Layout: `Setpoint:<v>,Input:<v>,Output:<v>` followed by every other
/// registered parameter as `,<Name>:<v>`, two decimals each. The PC
/// monitor plots the first two fields and offers the rest for editing.
pub fn write_telemetry<W: Write>(
    out: &mut W,
    registry: &ParameterRegistry<'_>,
    control: &ControlState,
) -> fmt::Result {
    write!(
        out,
        "Setpoint:{:.2},Input:{:.2},Output:{:.2}",
        control.setpoint, control.input, control.output
    )?;

    for param in registry.iter().filter(|p| p.cell != ControlCell::Setpoint) {
        write!(out, ",{}:{:.2}", param.name, control.cell(param.cell))?;
    }
    Ok(())
}

/// One newline-terminated telemetry line in a fixed buffer.
///
/// Fails with [`fmt::Error`] if the line does not fit in
/// [`TELEMETRY_CAPACITY`] bytes.
pub fn telemetry_line(
    registry: &ParameterRegistry<'_>,
    control: &ControlState,
) -> Result<String<TELEMETRY_CAPACITY>, fmt::Error> {
    let mut line = String::new();
    write_telemetry(&mut line, registry, control)?;
    line.push('\n').map_err(|_| fmt::Error)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_layout() {
        let registry = ParameterRegistry::builtin();
        let mut control = ControlState::default();
        registry.reset_all(&mut control);
        control.input = 23.456;
        control.output = 120.0;

        let line = telemetry_line(&registry, &control).unwrap();
        assert_eq!(
            line.as_str(),
            "Setpoint:25.00,Input:23.46,Output:120.00,Kp:2.00,Ki:0.50,Kd:1.00\n"
        );
    }

    #[test]
    fn input_is_second_field() {
        let registry = ParameterRegistry::builtin();
        let mut control = ControlState::default();
        control.input = 19.5;

        let line = telemetry_line(&registry, &control).unwrap();
        let second = line.split(',').nth(1).unwrap();
        assert_eq!(second, "Input:19.50");
    }

    #[test]
    fn overflow_is_an_error() {
        let registry = ParameterRegistry::builtin();
        let mut small: String<16> = String::new();
        assert!(write_telemetry(&mut small, &registry, &ControlState::default()).is_err());
    }
}
