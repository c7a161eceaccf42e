//! Toggle-selection state machine for category cells.
//!
//! At most one cell is active at a time. Toggling the active cell returns
//! the widget to idle; toggling any other cell makes that cell the active
//! one. The state survives refresh passes, only [`SelectionState::toggle`]
//! and [`SelectionState::clear`] change it.

/// Identity of a category cell, stable across refresh passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellKey {
    /// Identity of the owning row.
    pub row_id: String,
    /// Column index within the column list.
    pub column: usize,
}

impl CellKey {
    /// Creates a key for the cell at `column` in the row identified by
    /// `row_id`.
    pub fn new(row_id: impl Into<String>, column: usize) -> Self {
        Self {
            row_id: row_id.into(),
            column,
        }
    }
}

/// Current toggle-selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No cell is active.
    #[default]
    Idle,
    /// Exactly this cell is active.
    Active(CellKey),
}

impl SelectionState {
    /// Applies a toggle on `key` and reports whether the toggle applied the
    /// selection (`true`) or removed it (`false`).
    ///
    /// Toggling the already-active cell goes back to idle; toggling while
    /// idle, or on a different cell, activates `key`.
    pub fn toggle(&mut self, key: CellKey) -> bool {
        match self {
            SelectionState::Active(active) if *active == key => {
                *self = SelectionState::Idle;
                false
            }
            _ => {
                *self = SelectionState::Active(key);
                true
            }
        }
    }

    /// Returns the active cell, if any.
    pub fn active(&self) -> Option<&CellKey> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Active(key) => Some(key),
        }
    }

    /// Reports whether `key` is the active cell.
    pub fn is_active(&self, key: &CellKey) -> bool {
        self.active() == Some(key)
    }

    /// Drops any active selection.
    pub fn clear(&mut self) {
        *self = SelectionState::Idle;
    }
}
