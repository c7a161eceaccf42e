//! Retained output tree diffed across refresh passes.
//!
//! The widget keeps one `GroupNode` per displayed group, each holding its
//! `RowNode`s and their `CellNode`s. Refresh passes reconcile this tree
//! against freshly partitioned data: surviving nodes are kept (so marks on
//! them persist), exiting nodes are dropped with their whole subtree, and
//! entering nodes are built from scratch. `view()` renders purely from this
//! tree.

/// One rendered cell: display text plus its visual flags.
#[derive(Debug, Clone)]
pub(super) struct CellNode {
    /// Formatted display text.
    pub content: String,
    /// Whether the owning column is a category (toggle target).
    pub category: bool,
    /// Whether this cell currently carries the clicked mark.
    pub clicked: bool,
}

impl CellNode {
    pub fn new(content: String, category: bool) -> Self {
        Self {
            content,
            category,
            clicked: false,
        }
    }
}

/// One rendered row with its bound data.
///
/// The bound `row` is re-assigned on every refresh the row survives, so
/// toggle callbacks always see current data even when the node itself is
/// old.
#[derive(Debug, Clone)]
pub(super) struct RowNode<R> {
    /// Stable identity used for reconciliation.
    pub id: String,
    /// The currently bound row datum.
    pub row: R,
    /// Cells in column order.
    pub cells: Vec<CellNode>,
    /// Whether the row carries the clicked mark alongside one of its cells.
    pub clicked: bool,
}

impl<R> RowNode<R> {
    pub fn new(id: String, row: R, cells: Vec<CellNode>) -> Self {
        Self {
            id,
            row,
            cells,
            clicked: false,
        }
    }

    /// Drops the clicked mark from the row and all of its cells.
    pub fn clear_marks(&mut self) {
        self.clicked = false;
        for cell in &mut self.cells {
            cell.clicked = false;
        }
    }
}

/// One rendered group: its label key and member rows.
#[derive(Debug, Clone)]
pub(super) struct GroupNode<R> {
    /// Display text of the group key; doubles as the label and the
    /// reconciliation identity.
    pub key: String,
    /// Member rows in display order.
    pub rows: Vec<RowNode<R>>,
}

impl<R> GroupNode<R> {
    pub fn new(key: String, rows: Vec<RowNode<R>>) -> Self {
        Self { key, rows }
    }
}

/// Drops every clicked mark in the tree.
pub(super) fn clear_all_marks<R>(groups: &mut [GroupNode<R>]) {
    for group in groups {
        for row in &mut group.rows {
            row.clear_marks();
        }
    }
}
