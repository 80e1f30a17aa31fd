//! Process-wide state: control cells plus UI session.
//!
//! Firmware creates exactly one [`ProcessState`] at startup and shares it
//! between tasks behind a mutex. It is never torn down.

use crate::config::MenuConfig;
use crate::parameter_registry::{ControlState, ParameterRegistry};
use crate::session::UiState;

/// Everything the control loop, input handler, serial link and display
/// share.
#[derive(Debug)]
pub struct ProcessState {
    /// Control cells read by the PID loop and written through the registry.
    pub control: ControlState,
    /// Menu/session flags.
    pub ui: UiState,
}

impl ProcessState {
    /// Initialise in a fixed order: zeroed cells, then every registered
    /// parameter reset to its default, then a fresh UI session.
    pub fn new(registry: &ParameterRegistry<'_>, config: &MenuConfig) -> Self {
        let mut control = ControlState::default();
        registry.reset_all(&mut control);

        Self {
            control,
            ui: UiState::new(config.debounce_delay_ms),
        }
    }
}
