#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datatable/")]

//! # bubbletea-datatable
//!
//! A grouped data table widget for [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs),
//! styled with [lipgloss-extras](https://crates.io/crates/lipgloss-extras).
//!
//! ## Overview
//!
//! bubbletea-datatable displays rows pulled from a data source as a grouped,
//! formatted table. The widget follows the Elm Architecture pattern with
//! `init()`, `update()`, and `view()` methods, so it drops into any
//! bubbletea-rs application like the other widgets in this family.
//!
//! On every refresh the table fetches its rows, sorts and groups them, and
//! reconciles the result against what is already displayed by group key and
//! row id. Rows that survive keep their nodes, which is what lets the
//! toggle mark on a category cell ride through data updates instead of
//! being wiped by every redraw.
//!
//! ## Features
//!
//! - **Grouped display** with a full-width label line per group
//! - **Keyed diffing** so surviving rows keep their state across refreshes
//! - **Per-column formatting** for dates (chrono patterns, with optional
//!   epoch-seconds translation) and numbers (printf-flavored patterns)
//! - **Toggleable category cells** with an application callback that
//!   receives the full, uncapped row set
//! - **Proportional column widths** computed from per-column weights
//! - **Type-safe key bindings** and focus management shared with the rest
//!   of the widget family
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//! use bubbletea_rs::Model as BubbleTeaModel;
//!
//! #[derive(Clone)]
//! struct Trade {
//!     id: u32,
//!     symbol: String,
//!     price: f64,
//!     executed_at: i64,
//! }
//!
//! impl TableRow for Trade {
//!     fn id(&self) -> String {
//!         self.id.to_string()
//!     }
//!
//!     fn field(&self, key: &str) -> Value {
//!         match key {
//!             "symbol" => Value::from(self.symbol.clone()),
//!             "price" => Value::from(self.price),
//!             "executed_at" => Value::from(self.executed_at),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let trades = vec![
//!     Trade { id: 1, symbol: "ACME".into(), price: 12.5, executed_at: 1_425_220_200 },
//!     Trade { id: 2, symbol: "GLOBEX".into(), price: 8.25, executed_at: 1_425_306_600 },
//! ];
//!
//! let mut table = DataTable::new(vec![
//!     ColumnSpec::new("symbol").with_category(true),
//!     ColumnSpec::new("price")
//!         .with_data_type(DataType::Number)
//!         .with_data_format(",.2f"),
//!     ColumnSpec::new("executed_at")
//!         .with_title("Executed")
//!         .with_data_type(DataType::Date)
//!         .with_need_translate(true),
//! ])
//! .with_dimension(VecDimension::new(trades))
//! .with_group_by(|trade: &Trade| Value::from(trade.symbol.clone()))
//! .with_sort_by(|trade: &Trade| Value::from(trade.executed_at));
//!
//! table.refresh().unwrap();
//! let output = table.view();
//! assert!(output.contains("ACME"));
//! ```
//!
//! ## Key Bindings
//!
//! The table moves a cell cursor with the arrow keys (or hjkl) and toggles
//! the category cell under it with enter or space. Bindings come from the
//! type-safe key binding system in the `key` module and can be replaced
//! per table through [`with_keymap`](datatable::Model::with_keymap):
//!
//! ```rust
//! use bubbletea_datatable::{key, KeyMap, TableKeyMap};
//!
//! // Rebind the toggle to "x" and drop column movement entirely.
//! let mut keymap = TableKeyMap::default();
//! keymap.toggle = key::new_binding(vec![
//!     key::with_keys_str(&["x"]),
//!     key::with_help("x", "toggle cell"),
//! ]);
//! keymap.col_left.set_enabled(false);
//! keymap.col_right.set_enabled(false);
//!
//! // The same bindings feed the footer help line.
//! assert_eq!(keymap.short_help().len(), 3);
//! ```
//!
//! ## Quick Start Dependencies
//!
//! Add bubbletea-datatable to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bubbletea-datatable = "0.1.0"
//! bubbletea-rs = "0.0.7"
//! crossterm = "0.29"
//! ```
//!
//! For convenience, you can import the prelude:
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//! ```

pub mod datatable;
pub mod key;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// This trait provides a standardized interface for managing keyboard focus.
/// A focused table reacts to key messages and shows its cursor; a blurred
/// table ignores keyboard input entirely while still rendering its rows.
///
/// ## Examples
///
/// ```rust
/// use bubbletea_datatable::Component;
/// use bubbletea_rs::Cmd;
///
/// fn handle_focus<T: Component>(component: &mut T) {
///     let _cmd: Option<Cmd> = component.focus();
///     assert!(component.focused());
///     component.blur();
///     assert!(!component.focused());
/// }
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization tasks like starting timers
    /// or triggering redraws.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use datatable::{
    ascending, compute_widths, descending, CategoryClickFn, CellKey, ColumnSpec, DataType,
    Dimension, Error, GroupKeyFn, Model as DataTable, OrderFn, SelectionState, SortKeyFn,
    TableKeyMap, TableRow, TableStyles, Value, VecDimension, DEFAULT_COLUMN_WEIGHT,
    DEFAULT_DATE_FORMAT, DEFAULT_SIZE, DEFAULT_WIDTH,
};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};

/// Prelude module for convenient imports.
///
/// Re-exports the types needed to define rows, configure a table, and wire
/// it into a bubbletea-rs application with a single `use` statement:
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::datatable::{
        ascending, descending, CellKey, ColumnSpec, DataType, Dimension, Error,
        Model as DataTable, SelectionState, TableKeyMap, TableRow, TableStyles, Value,
        VecDimension,
    };
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::Component;
}
