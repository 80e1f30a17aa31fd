use crate::config::MenuConfig;
use crate::parameter_registry::{ParameterError, ParameterRegistry};
use crate::state::ProcessState;

/// One selectable line of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuRow {
    /// Registry parameter at this index.
    Parameter(usize),
    /// Closes the menu.
    Exit,
}

/// What an input did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// Input had no effect (menu closed, zero delta).
    Ignored,
    /// Button press rejected by the debounce window.
    Debounced,
    /// Menu opened from the status screen.
    Opened,
    /// Menu closed via the `Exit` row.
    Closed,
    /// Started editing the parameter at this registry index.
    EditStarted(usize),
    /// Stopped editing the parameter at this registry index.
    EditFinished(usize),
    /// Selection moved to this row.
    Moved(usize),
    /// Edited parameter moved to `value`.
    Adjusted { index: usize, value: f32 },
}

/// Menu transition rules.
///
/// Rows are every registry parameter in order, followed by one
/// [`MenuRow::Exit`] row. Button presses are debounced with
/// [`UiState::debounce`](super::UiState::debounce); the encoder reports
/// absolute counts and only the delta against the last count is used.
///
/// ```text
///   status ──press──► browse ──press on param──► edit
///     ▲                 │  ▲                      │
///     └──press on Exit──┘  └────────press─────────┘
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MenuSession<'a> {
    registry: ParameterRegistry<'a>,
    config: MenuConfig,
}

impl<'a> MenuSession<'a> {
    /// Session over `registry`, laid out with `config`.
    pub fn new(registry: ParameterRegistry<'a>, config: MenuConfig) -> Self {
        Self { registry, config }
    }

    /// Registry whose parameters form the menu rows.
    pub fn registry(&self) -> &ParameterRegistry<'a> {
        &self.registry
    }

    /// Layout and debounce settings.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Parameters plus the trailing `Exit` row.
    pub fn row_count(&self) -> usize {
        self.registry.count() + 1
    }

    /// Row at `index`. Anything past the last parameter is `Exit`.
    pub fn row(&self, index: usize) -> MenuRow {
        if index < self.registry.count() {
            MenuRow::Parameter(index)
        } else {
            MenuRow::Exit
        }
    }

    /// Record the encoder count without acting on it.
    ///
    /// Call once at startup so the first real movement produces the right
    /// delta.
    pub fn sync_encoder(&self, state: &mut ProcessState, position: i32) {
        state.ui.last_encoder_position = position;
    }

    // ── Button ───────────────────────────────────────────────────────

    /// Handle a button press at `now_ms`.
    pub fn on_button(&self, state: &mut ProcessState, now_ms: u64) -> MenuEvent {
        let ui = &mut state.ui;
        if !ui.debounce(now_ms) {
            return MenuEvent::Debounced;
        }

        let event = if !ui.menu_active {
            ui.menu_active = true;
            ui.editing = false;
            ui.set_menu_index(0);
            MenuEvent::Opened
        } else if ui.editing {
            ui.editing = false;
            MenuEvent::EditFinished(ui.edit_index)
        } else {
            match self.row(ui.menu_index()) {
                MenuRow::Parameter(index) => {
                    ui.editing = true;
                    ui.edit_index = index;
                    MenuEvent::EditStarted(index)
                }
                MenuRow::Exit => {
                    ui.menu_active = false;
                    ui.set_menu_index(0);
                    MenuEvent::Closed
                }
            }
        };

        ui.cursor_y = self.cursor_y(ui.menu_index());
        ui.request_redraw();

        #[cfg(feature = "defmt")]
        defmt::debug!("menu button: {}", event);

        event
    }

    // ── Encoder ──────────────────────────────────────────────────────

    /// Handle a new absolute encoder count.
    ///
    /// The baseline is updated even when the menu is closed so that
    /// opening the menu never replays old movement.
    pub fn on_encoder(
        &self,
        state: &mut ProcessState,
        position: i32,
    ) -> Result<MenuEvent, ParameterError> {
        let delta = position.wrapping_sub(state.ui.last_encoder_position);
        state.ui.last_encoder_position = position;

        if delta == 0 || !state.ui.menu_active {
            return Ok(MenuEvent::Ignored);
        }

        let event = if state.ui.editing {
            let index = state.ui.edit_index;
            let value = self.registry.adjust(&mut state.control, index, delta)?;
            MenuEvent::Adjusted { index, value }
        } else {
            let last_row = self.row_count() as i64 - 1;
            let current = state.ui.menu_index() as i64;
            let next = (current + delta as i64).clamp(0, last_row) as usize;
            state.ui.set_menu_index(next);
            state.ui.cursor_y = self.cursor_y(next);
            MenuEvent::Moved(next)
        };

        state.ui.request_redraw();
        Ok(event)
    }

    // ── Layout helpers ───────────────────────────────────────────────

    /// Number of rows shown at once, at least 1 and at most
    /// [`MAX_ROWS`](super::MAX_ROWS).
    pub fn visible_rows(&self) -> usize {
        self.config.visible_rows.clamp(1, super::MAX_ROWS)
    }

    /// First visible row when `selected` is highlighted. The window
    /// scrolls just enough to keep the selection on screen.
    pub fn window_top(&self, selected: usize) -> usize {
        (selected + 1).saturating_sub(self.visible_rows())
    }

    /// Pixel row of the cursor when `selected` is highlighted.
    pub fn cursor_y(&self, selected: usize) -> i32 {
        let offset = (selected - self.window_top(selected)) as i32;
        self.config.first_row_y + offset * self.config.row_height
    }
}
