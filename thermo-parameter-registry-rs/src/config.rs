//! Runtime configuration for the menu session and the serial link.
//!
//! Every tunable lives in a struct with a [`Default`] impl. Firmware builds
//! these once at startup; tests override single fields with struct update
//! syntax.

// ── MenuConfig ───────────────────────────────────────────────────────────

/// Menu input and layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuConfig {
    /// Minimum time between two accepted button presses, in ms. Default: 50.
    pub debounce_delay_ms: u64,
    /// Number of menu rows visible at once. Default: 4. Clamped to
    /// [`MAX_ROWS`](crate::session::MAX_ROWS) when building a view.
    pub visible_rows: usize,
    /// Height of one menu row in pixels. Default: 12.
    pub row_height: i32,
    /// Y coordinate of the first menu row. Default: 16.
    pub first_row_y: i32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            debounce_delay_ms: 50,
            visible_rows: 4,
            row_height: 12,
            first_row_y: 16,
        }
    }
}

// ── SerialConfig ─────────────────────────────────────────────────────────

/// Serial tuning link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// UART baud rate. Default: 9600 (what the PC monitor opens).
    pub baud_rate: u32,
    /// Telemetry emission rate in Hz. Default: 5.
    pub telemetry_frequency_hz: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            telemetry_frequency_hz: 5,
        }
    }
}

impl SerialConfig {
    /// Convert the telemetry frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / telemetry_frequency_hz`, with a zero frequency
    /// treated as 1 Hz.
    pub fn telemetry_period_ms(&self) -> u64 {
        1000 / self.telemetry_frequency_hz.max(1) as u64
    }
}
