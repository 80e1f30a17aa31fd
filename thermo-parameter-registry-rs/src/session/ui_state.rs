use core::sync::atomic::{AtomicUsize, Ordering};

/// UI session state shared by the input handler and the display.
///
/// `menu_index` may be read from interrupt context, so it is an atomic.
/// Only the menu session writes it (single writer); everyone else loads.
/// Plain loads/stores are used so the type also works on cores without
/// compare-and-swap.
#[derive(Debug)]
pub struct UiState {
    menu_index: AtomicUsize,
    /// Menu is open (otherwise the status screen is shown).
    pub menu_active: bool,
    /// The selected parameter is being edited by the encoder.
    pub editing: bool,
    /// Registry index of the parameter being edited.
    pub edit_index: usize,
    /// Last absolute encoder count seen by the menu session.
    pub last_encoder_position: i32,
    /// Time of the last accepted button press, in ms. `None` until the
    /// first press.
    pub last_debounce_time: Option<u64>,
    /// Minimum time between accepted presses, in ms.
    pub debounce_delay: u64,
    /// Pixel row of the selection cursor.
    pub cursor_y: i32,
    /// Set once the display driver reports a successful init.
    pub oled_initialized: bool,
    /// Set whenever something visible changed; cleared by the display
    /// after a redraw.
    pub display_needs_update: bool,
}

impl UiState {
    /// Fresh session: menu closed, nothing pending, display not yet up.
    pub const fn new(debounce_delay: u64) -> Self {
        Self {
            menu_index: AtomicUsize::new(0),
            menu_active: false,
            editing: false,
            edit_index: 0,
            last_encoder_position: 0,
            last_debounce_time: None,
            debounce_delay,
            cursor_y: 0,
            oled_initialized: false,
            // First frame must be drawn.
            display_needs_update: true,
        }
    }

    /// Currently selected menu row.
    pub fn menu_index(&self) -> usize {
        self.menu_index.load(Ordering::Acquire)
    }

    /// Select a menu row. Single-writer: called only by the menu session.
    pub fn set_menu_index(&self, index: usize) {
        self.menu_index.store(index, Ordering::Release);
    }

    /// Polled debounce check for a button press at `now_ms`.
    ///
    /// Returns `true` and records `now_ms` if at least `debounce_delay`
    /// has elapsed since the last accepted press (the first press is
    /// always accepted). A clock that moved backwards is treated as zero
    /// elapsed time.
    pub fn debounce(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_debounce_time {
            if now_ms.saturating_sub(last) < self.debounce_delay {
                return false;
            }
        }
        self.last_debounce_time = Some(now_ms);
        true
    }

    /// Mark the display as stale.
    pub fn request_redraw(&mut self) {
        self.display_needs_update = true;
    }

    /// Read and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.display_needs_update, false)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(crate::config::MenuConfig::default().debounce_delay_ms)
    }
}
