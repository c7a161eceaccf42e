//! Data table component with grouping, cell formatting, and toggleable
//! category cells.
//!
//! This module exposes a generic `Model<R: TableRow>` plus supporting traits
//! and submodules:
//! - `TableRow`: Implement for your row type; must be `Clone` and expose a
//!   stable `id()` plus named `field()` values
//! - `Dimension`: Data source the table pulls its rows from
//! - Submodules: `keys` and `style`
//!
//! ## Architecture Overview
//!
//! The table is a retained-tree widget built around three passes:
//!
//! 1. **Partition**: Rows are fetched from the dimension (capped by `size`),
//!    sorted by the optional sort accessor, and bucketed into groups by the
//!    group accessor. Groups are ordered by the comparator on their keys.
//! 2. **Reconcile**: The new groups are matched against the previous tree by
//!    group key, and rows within a surviving group by row id. Surviving
//!    nodes are kept (marks and all), entering nodes are built fresh, and
//!    exiting nodes are dropped.
//! 3. **Render**: `view()` derives the header from the column list every
//!    time and prints group labels, rows, and the footer from the retained
//!    tree. Nothing in `view()` mutates state.
//!
//! ## Cell Formatting
//!
//! Each [`ColumnSpec`] controls how its cells are displayed:
//! - `data_type: Date` formats values with a chrono pattern
//!   (default `"%B %d, %Y %H:%M"`); `need_translate` first converts an
//!   epoch-seconds number into a date
//! - `data_type: Number` with a `data_format` applies a printf-flavored
//!   numeric pattern such as `",.2f"` or `".0%"`
//! - Null or missing fields render as empty cells, never as errors
//!
//! ## Category Cells
//!
//! Columns flagged `category` react to the toggle key. At most one cell is
//! toggled at a time; toggling it again removes the selection. The category
//! click callback receives the affected row, its column, the full uncapped
//! row set, and whether the toggle applied or removed the selection.

// Module declarations

/// Key bindings for cursor movement and cell toggling.
///
/// Defines [`TableKeyMap`] with arrow/vim defaults for moving the cursor
/// and enter/space for toggling the category cell under it. Bindings can
/// be replaced individually.
pub mod keys;

/// Visual styling for all regions of the table.
///
/// Defines [`TableStyles`] with adaptive light/dark defaults for the
/// header, group labels, cells, the toggled cell and row, the keyboard
/// cursor, and the footer.
pub mod style;

// Internal modules
mod columns;
mod format;
mod model;
mod node;
mod partition;
mod reconcile;
mod rendering;
mod selection;
mod types;

mod tests;

// Re-export public types from submodules

/// The main data table component model.
///
/// `Model<R>` displays rows implementing [`TableRow`], grouped and sorted
/// according to its accessors, with per-column formatting and toggleable
/// category cells.
pub use model::Model;

/// Default row cap and render width used by new tables.
pub use model::{DEFAULT_SIZE, DEFAULT_WIDTH};

/// Column definitions and proportional width computation.
pub use columns::{compute_widths, ColumnSpec, DataType, DEFAULT_COLUMN_WEIGHT};

/// Default chrono pattern used by date columns without a `data_format`.
pub use format::DEFAULT_DATE_FORMAT;

/// Key binding configuration for table navigation and toggling.
pub use keys::TableKeyMap;

/// Toggle-selection state and the identity of the toggled cell.
pub use selection::{CellKey, SelectionState};

/// Visual styling configuration for the table.
pub use style::TableStyles;

/// Core value, row, and data-source abstractions.
///
/// - [`Value`]: Dynamically typed cell value with `Null`, booleans,
///   numbers, strings, and timestamps
/// - [`TableRow`]: Trait row types implement to expose an id and fields
/// - [`Dimension`] / [`VecDimension`]: Data sources the table reads from
/// - [`ascending`] / [`descending`]: Ready-made key comparators
pub use types::{
    ascending, descending, CategoryClickFn, Dimension, Error, GroupKeyFn, OrderFn, SortKeyFn,
    TableRow, Value, VecDimension,
};

use crate::key::{self, KeyMap as KeyMapTrait};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};

// Help integration - exposes the table's bindings to help renderers
impl<R: TableRow> KeyMapTrait for Model<R> {
    fn short_help(&self) -> Vec<&key::Binding> {
        self.keymap.short_help()
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}

// BubbleTeaModel implementation - integrates with the bubbletea-rs runtime
impl<R: TableRow + Send + Sync + 'static> BubbleTeaModel for Model<R> {
    /// Initializes an unconfigured table with no columns and no data.
    ///
    /// This is called by the bubbletea runtime when the model is first
    /// created. Attach columns, a dimension, and a group accessor before
    /// the first [`refresh`](Model::refresh).
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new()), None)
    }

    /// Handles window size and keyboard messages.
    ///
    /// Window size messages adjust the render width. Key messages move the
    /// keyboard cursor or toggle the category cell under it; they are
    /// ignored while the table is blurred. Toggling may return a command
    /// produced by the category click callback.
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size_msg) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size_msg.width as usize;
            return None;
        }

        if !self.focused {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.row_up.matches(key_msg) {
                self.move_cursor_up();
            } else if self.keymap.row_down.matches(key_msg) {
                self.move_cursor_down();
            } else if self.keymap.col_left.matches(key_msg) {
                self.move_cursor_left();
            } else if self.keymap.col_right.matches(key_msg) {
                self.move_cursor_right();
            } else if self.keymap.toggle.matches(key_msg) {
                return self.toggle_at_cursor();
            }
        }
        None
    }

    /// Renders the header, the grouped rows, and the footer.
    ///
    /// The header is rebuilt from the column list on every call while the
    /// body comes from the retained tree, so surviving rows render exactly
    /// the nodes (and marks) the last refresh left behind.
    fn view(&self) -> String {
        let mut sections = Vec::new();

        let header = self.view_header();
        if !header.is_empty() {
            sections.push(header);
        }

        sections.push(self.view_rows());

        let footer = self.view_footer();
        if !footer.is_empty() {
            sections.push(footer);
        }

        sections.join("\n")
    }
}

// Focus management - blurred tables ignore key input
impl<R: TableRow + Send + Sync + 'static> Component for Model<R> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
