//! On-device menu session.
//!
//! [`UiState`] holds the flags shared between the input handler and the
//! display. [`MenuSession`] applies button and encoder input to that state
//! and to the [`ParameterRegistry`](crate::parameter_registry::ParameterRegistry).
//! [`MenuView`] is the snapshot a display renders.

mod menu;
mod ui_state;
mod view;

pub use menu::{MenuEvent, MenuRow, MenuSession};
pub use ui_state::UiState;
pub use view::{view_changed, MenuView, ViewMode, ViewRow, LABEL_LEN};

/// Upper bound on rows in one [`MenuView`].
pub const MAX_ROWS: usize = 6;
