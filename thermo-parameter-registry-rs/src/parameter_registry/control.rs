use super::parameter::ControlCell;

/// Process-wide control values shared by the PID loop, the sensor reader
/// and the menu.
///
/// The tunable cells (`setpoint`, `kp`, `ki`, `kd`) are written through the
/// [`ParameterRegistry`](super::ParameterRegistry). `input`, `output` and
/// `dht_temperature_c` belong to the sensor driver and control loop and are
/// never touched by the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    /// Target temperature in °C.
    pub setpoint: f32,
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Process variable fed to the PID loop.
    pub input: f64,
    /// Last PID output.
    pub output: f64,
    /// Last temperature reported by the DHT sensor.
    pub dht_temperature_c: f32,
}

impl ControlState {
    /// Read a tunable cell.
    pub fn cell(&self, cell: ControlCell) -> f32 {
        match cell {
            ControlCell::Setpoint => self.setpoint,
            ControlCell::Kp => self.kp,
            ControlCell::Ki => self.ki,
            ControlCell::Kd => self.kd,
        }
    }

    /// Overwrite a tunable cell. No bounds are applied here; bounded writes
    /// go through the registry.
    pub fn set_cell(&mut self, cell: ControlCell, value: f32) {
        match cell {
            ControlCell::Setpoint => self.setpoint = value,
            ControlCell::Kp => self.kp = value,
            ControlCell::Ki => self.ki = value,
            ControlCell::Kd => self.kd = value,
        }
    }
}
