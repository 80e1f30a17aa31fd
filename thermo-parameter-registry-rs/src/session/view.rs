//! Immutable snapshot of what the display should show.
//!
//! [`MenuView::build`] reads the registry and process state once; the
//! display subsystem renders the snapshot without holding any lock and
//! skips the redraw when two consecutive snapshots are equal.

use super::menu::{MenuRow, MenuSession};
use super::MAX_ROWS;
use crate::state::ProcessState;

/// Label buffer size. Labels keep at most `LABEL_LEN - 1` bytes.
pub const LABEL_LEN: usize = 16;

/// Which screen the snapshot describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewMode {
    /// Menu closed: live setpoint, temperature and output.
    #[default]
    Status,
    /// Menu open, moving the selection.
    Browse,
    /// Menu open, encoder edits the highlighted parameter.
    Edit,
}

/// One line of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ViewRow {
    /// Null-padded UTF-8 label.
    pub label: [u8; LABEL_LEN],
    /// Value to print next to the label. `None` for rows without a value
    /// (the `Exit` row).
    pub value: Option<f32>,
}

impl ViewRow {
    fn new(label: &str, value: Option<f32>) -> Self {
        let mut row = Self {
            value,
            ..Self::default()
        };

        // Truncate on a char boundary so the stored bytes stay valid UTF-8.
        let mut len = label.len().min(LABEL_LEN - 1);
        while !label.is_char_boundary(len) {
            len -= 1;
        }
        row.label[..len].copy_from_slice(&label.as_bytes()[..len]);
        row
    }

    /// Label as `&str`, stopping at the first null byte.
    pub fn label(&self) -> &str {
        let end = self.label.iter().position(|&b| b == 0).unwrap_or(LABEL_LEN);
        core::str::from_utf8(&self.label[..end]).unwrap_or("")
    }

    /// Bitwise equality, so a NaN value matches itself.
    fn same_as(&self, other: &Self) -> bool {
        self.label == other.label && self.value.map(f32::to_bits) == other.value.map(f32::to_bits)
    }
}

/// Everything the display needs to draw one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuView {
    /// Screen the rows belong to.
    pub mode: ViewMode,
    rows: [ViewRow; MAX_ROWS],
    row_count: usize,
    /// Highlighted position within [`rows()`](Self::rows), if any.
    pub highlighted: Option<usize>,
    /// Cursor pixel row, copied from the UI state.
    pub cursor_y: i32,
}

impl MenuView {
    /// Snapshot the current screen.
    pub fn build(menu: &MenuSession<'_>, state: &ProcessState) -> Self {
        let ui = &state.ui;
        let control = &state.control;
        let mut view = Self {
            cursor_y: ui.cursor_y,
            ..Self::default()
        };

        if !ui.menu_active {
            view.push(ViewRow::new("Setpoint", Some(control.setpoint)));
            view.push(ViewRow::new("Temp", Some(control.dht_temperature_c)));
            view.push(ViewRow::new("Output", Some(control.output as f32)));
            return view;
        }

        view.mode = if ui.editing {
            ViewMode::Edit
        } else {
            ViewMode::Browse
        };

        let selected = ui.menu_index().min(menu.row_count() - 1);
        let top = menu.window_top(selected);
        let bottom = (top + menu.visible_rows()).min(menu.row_count());
        let registry = menu.registry();

        for row_idx in top..bottom {
            let row = match menu.row(row_idx) {
                MenuRow::Parameter(i) => {
                    // Indices come from the registry's own range.
                    let name = registry.name_of(i).unwrap_or("");
                    ViewRow::new(name, registry.get(control, i).ok())
                }
                MenuRow::Exit => ViewRow::new("Exit", None),
            };
            view.push(row);
        }
        view.highlighted = Some(selected - top);
        view
    }

    /// Visible rows, top to bottom.
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows[..self.row_count]
    }

    fn push(&mut self, row: ViewRow) {
        if self.row_count < MAX_ROWS {
            self.rows[self.row_count] = row;
            self.row_count += 1;
        }
    }
}

/// Whether `new` differs from `old` and needs a redraw.
///
/// Values compare by bit pattern: a failed sensor read stored as NaN does
/// not force a redraw on every frame.
pub fn view_changed(old: &MenuView, new: &MenuView) -> bool {
    old.mode != new.mode
        || old.highlighted != new.highlighted
        || old.cursor_y != new.cursor_y
        || old.row_count != new.row_count
        || !old
            .rows()
            .iter()
            .zip(new.rows())
            .all(|(a, b)| a.same_as(b))
}
