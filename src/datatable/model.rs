//! Main Model struct and core functionality for the data table widget.
//!
//! This module contains the primary Model struct representing a grouped data
//! table, along with its construction, configuration accessors, the refresh
//! pass that rebuilds the retained output tree, and cell toggling.

use super::columns::ColumnSpec;
use super::format;
use super::keys::TableKeyMap;
use super::node::{self, CellNode, GroupNode, RowNode};
use super::partition::{self, Group};
use super::reconcile::{self, Slot};
use super::selection::{CellKey, SelectionState};
use super::style::TableStyles;
use super::types::{
    ascending, CategoryClickFn, Dimension, Error, GroupKeyFn, OrderFn, SortKeyFn, TableRow, Value,
};
use bubbletea_rs::Cmd;
use std::cmp::Ordering;

/// Default maximum number of rows fetched per refresh.
pub const DEFAULT_SIZE: usize = 25;

/// Default render width in terminal cells, used until a window size message
/// or an explicit width arrives.
pub const DEFAULT_WIDTH: usize = 80;

/// A data table that groups, formats, and displays rows from a dimension.
///
/// The `Model<R>` pulls rows from a [`Dimension`], partitions them into
/// groups by a group-key accessor, formats each cell according to its
/// [`ColumnSpec`], and keeps the result as a retained tree that is diffed
/// on every [`refresh`](Model::refresh) instead of rebuilt. Category cells
/// can be toggled with the keyboard, invoking an application callback with
/// the full (uncapped) row set.
///
/// # Configuration
///
/// A table needs at least a column list, a dimension, and a group accessor
/// before the first refresh:
///
/// ```
/// use bubbletea_datatable::datatable::{ColumnSpec, Model, Value, VecDimension};
/// use bubbletea_datatable::TableRow;
///
/// #[derive(Clone)]
/// struct Run {
///     name: String,
///     elapsed: f64,
/// }
///
/// impl TableRow for Run {
///     fn id(&self) -> String {
///         self.name.clone()
///     }
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "name" => Value::from(self.name.clone()),
///             "elapsed" => Value::from(self.elapsed),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let runs = vec![
///     Run { name: "alpha".into(), elapsed: 1.25 },
///     Run { name: "beta".into(), elapsed: 0.75 },
/// ];
///
/// let mut table = Model::new(vec![
///     ColumnSpec::new("name"),
///     ColumnSpec::new("elapsed"),
/// ])
/// .with_dimension(VecDimension::new(runs))
/// .with_group_by(|run: &Run| Value::from(run.elapsed < 1.0));
///
/// table.refresh().unwrap();
/// assert_eq!(table.len(), 2);
/// ```
///
/// # Refresh semantics
///
/// Each refresh fetches at most [`size`](Model::size) rows, sorts and
/// groups them, and reconciles the result against the previous tree by
/// group key and row id. Surviving rows keep their nodes (and any toggle
/// marks on them) while their bound data and cell text are recomputed.
/// Rows that disappear are dropped with their marks; rows that reappear
/// later come back unmarked.
pub struct Model<R: TableRow> {
    // Data
    pub(super) columns: Vec<ColumnSpec>,
    pub(super) dimension: Option<Box<dyn Dimension<R> + Send + Sync>>,
    pub(super) group_by: Option<GroupKeyFn<R>>,
    pub(super) sort_by: Option<SortKeyFn<R>>,
    pub(super) order: OrderFn,
    pub(super) size: usize,

    // Presentation
    pub(super) show_groups: bool,
    pub(super) width: usize,
    pub(super) styles: TableStyles,
    pub(super) keymap: TableKeyMap,
    pub(super) show_status_bar: bool,
    pub(super) show_help: bool,

    // Interaction
    pub(super) on_category_click: Option<CategoryClickFn<R>>,
    pub(super) selection: SelectionState,
    pub(super) cursor_row: usize,
    pub(super) cursor_col: usize,
    pub(super) focused: bool,

    // Output tree
    pub(super) groups: Vec<GroupNode<R>>,
}

impl<R: TableRow> Model<R> {
    /// Creates a new table with the given columns and no data source.
    ///
    /// The table starts with the default row cap of [`DEFAULT_SIZE`],
    /// ascending group order, group labels shown, and the help line
    /// enabled. Attach a dimension and a group accessor before calling
    /// [`refresh`](Model::refresh).
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        let cursor_col = columns
            .iter()
            .position(|column| column.category)
            .unwrap_or(0);
        Self {
            columns,
            dimension: None,
            group_by: None,
            sort_by: None,
            order: Box::new(ascending),
            size: DEFAULT_SIZE,
            show_groups: true,
            width: DEFAULT_WIDTH,
            styles: TableStyles::default(),
            keymap: TableKeyMap::default(),
            show_status_bar: true,
            show_help: true,
            on_category_click: None,
            selection: SelectionState::default(),
            cursor_row: 0,
            cursor_col,
            focused: true,
            groups: Vec::new(),
        }
    }

    /// Sets the data source the table pulls rows from.
    pub fn with_dimension<D>(mut self, dimension: D) -> Self
    where
        D: Dimension<R> + Send + Sync + 'static,
    {
        self.set_dimension(dimension);
        self
    }

    /// Sets the data source the table pulls rows from.
    pub fn set_dimension<D>(&mut self, dimension: D)
    where
        D: Dimension<R> + Send + Sync + 'static,
    {
        self.dimension = Some(Box::new(dimension));
    }

    /// Sets the accessor that computes each row's group key.
    pub fn with_group_by<F>(mut self, group_by: F) -> Self
    where
        F: Fn(&R) -> Value + Send + 'static,
    {
        self.set_group_by(group_by);
        self
    }

    /// Sets the accessor that computes each row's group key.
    pub fn set_group_by<F>(&mut self, group_by: F)
    where
        F: Fn(&R) -> Value + Send + 'static,
    {
        self.group_by = Some(Box::new(group_by));
    }

    /// Sets the accessor rows are sorted by before grouping.
    ///
    /// Without a sort accessor rows keep the order the dimension returned
    /// them in.
    pub fn with_sort_by<F>(mut self, sort_by: F) -> Self
    where
        F: Fn(&R) -> Value + Send + 'static,
    {
        self.set_sort_by(sort_by);
        self
    }

    /// Sets the accessor rows are sorted by before grouping.
    pub fn set_sort_by<F>(&mut self, sort_by: F)
    where
        F: Fn(&R) -> Value + Send + 'static,
    {
        self.sort_by = Some(Box::new(sort_by));
    }

    /// Sets the comparator applied to sort keys and group keys.
    ///
    /// Defaults to [`ascending`]. Pass [`descending`](super::types::descending)
    /// to reverse both the row order and the group order.
    pub fn with_order<F>(mut self, order: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + 'static,
    {
        self.set_order(order);
        self
    }

    /// Sets the comparator applied to sort keys and group keys.
    pub fn set_order<F>(&mut self, order: F)
    where
        F: Fn(&Value, &Value) -> Ordering + Send + 'static,
    {
        self.order = Box::new(order);
    }

    /// Sets the maximum number of rows fetched per refresh.
    pub fn with_size(mut self, size: usize) -> Self {
        self.set_size(size);
        self
    }

    /// Sets the maximum number of rows fetched per refresh.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Returns the maximum number of rows fetched per refresh.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Controls whether group label lines are rendered.
    ///
    /// Grouping itself still happens when labels are hidden; only the
    /// label line is suppressed.
    pub fn with_show_groups(mut self, show: bool) -> Self {
        self.set_show_groups(show);
        self
    }

    /// Controls whether group label lines are rendered.
    pub fn set_show_groups(&mut self, show: bool) {
        self.show_groups = show;
    }

    /// Reports whether group label lines are rendered.
    pub fn show_groups(&self) -> bool {
        self.show_groups
    }

    /// Sets the callback invoked when a category cell is toggled.
    ///
    /// The callback receives the toggled row, its column, the full
    /// (uncapped) row set from the dimension, and whether the toggle
    /// applied (`true`) or removed (`false`) the selection.
    pub fn with_on_category_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&R, &ColumnSpec, &[R], bool) -> Option<Cmd> + Send + 'static,
    {
        self.set_on_category_click(handler);
        self
    }

    /// Sets the callback invoked when a category cell is toggled.
    pub fn set_on_category_click<F>(&mut self, handler: F)
    where
        F: Fn(&R, &ColumnSpec, &[R], bool) -> Option<Cmd> + Send + 'static,
    {
        self.on_category_click = Some(Box::new(handler));
    }

    /// Sets the render width in terminal cells.
    pub fn with_width(mut self, width: usize) -> Self {
        self.set_width(width);
        self
    }

    /// Sets the render width in terminal cells.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Returns the render width in terminal cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Replaces the column list.
    ///
    /// Because toggle marks are tied to column positions, changing the
    /// columns clears the selection and every mark. Call
    /// [`refresh`](Model::refresh) afterwards to re-render cell contents.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) {
        self.columns = columns;
        self.selection.clear();
        node::clear_all_marks(&mut self.groups);
        self.clamp_cursor();
    }

    /// Returns the column list.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Replaces the widget's styles.
    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the widget's styles.
    pub fn set_styles(&mut self, styles: TableStyles) {
        self.styles = styles;
    }

    /// Returns the widget's styles.
    pub fn styles(&self) -> &TableStyles {
        &self.styles
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, keymap: TableKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the key bindings.
    pub fn set_keymap(&mut self, keymap: TableKeyMap) {
        self.keymap = keymap;
    }

    /// Returns the key bindings.
    pub fn keymap(&self) -> &TableKeyMap {
        &self.keymap
    }

    /// Controls whether the status bar line is rendered below the rows.
    pub fn with_show_status_bar(mut self, show: bool) -> Self {
        self.show_status_bar = show;
        self
    }

    /// Controls whether the status bar line is rendered below the rows.
    pub fn set_show_status_bar(&mut self, show: bool) {
        self.show_status_bar = show;
    }

    /// Controls whether the help line is rendered below the status bar.
    pub fn with_show_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Controls whether the help line is rendered below the status bar.
    pub fn set_show_help(&mut self, show: bool) {
        self.show_help = show;
    }

    /// Returns the current toggle-selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Returns the row holding the active toggle selection, if that row is
    /// currently displayed.
    pub fn selected_row(&self) -> Option<&R> {
        let active = self.selection.active()?;
        self.groups
            .iter()
            .flat_map(|group| group.rows.iter())
            .find(|row| row.id == active.row_id)
            .map(|row| &row.row)
    }

    /// Removes the toggle selection and every mark in the tree.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        node::clear_all_marks(&mut self.groups);
    }

    /// Returns the number of rows currently displayed.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }

    /// Reports whether the table currently displays no rows.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.rows.is_empty())
    }

    /// Returns the number of groups currently displayed.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the cursor position as `(row, column)`.
    ///
    /// The row index is flat across all groups in display order. The
    /// column index sits on a category column whenever one exists.
    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Moves the cursor.
    ///
    /// The row clamps to the displayed rows. The column must name a
    /// category column; anything else snaps to the first one.
    pub fn set_cursor(&mut self, row: usize, column: usize) {
        self.cursor_row = row;
        self.cursor_col = column;
        self.clamp_cursor();
    }

    /// Rebuilds the displayed tree from the dimension.
    ///
    /// Fetches at most [`size`](Model::size) rows, sorts them by the sort
    /// accessor (when set), partitions them into groups ordered by the
    /// comparator, and reconciles the result against the previous tree.
    /// Surviving rows keep their nodes and marks; entering rows get fresh
    /// unmarked nodes; exiting rows are dropped.
    ///
    /// The toggle-selection state is never changed by a refresh.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingDimension`] or [`Error::MissingGroupBy`]
    /// when the table is not fully configured, and with a formatting error
    /// when a cell value does not fit its column's declared type. On a
    /// formatting error the previous contents are discarded and the table
    /// is left empty.
    pub fn refresh(&mut self) -> Result<(), Error> {
        let rows = self
            .dimension
            .as_ref()
            .ok_or(Error::MissingDimension)?
            .top(Some(self.size));
        let group_by = self.group_by.as_ref().ok_or(Error::MissingGroupBy)?;
        let partitioned =
            partition::partition(rows, group_by, self.sort_by.as_ref(), &self.order, self.size);

        let previous = std::mem::take(&mut self.groups);
        let recon = reconcile::reconcile(
            previous,
            partitioned,
            |node: &GroupNode<R>| node.key.clone(),
            |group: &Group<R>| group.key.to_string(),
        );

        let mut groups = Vec::with_capacity(recon.slots.len());
        for slot in recon.slots {
            match slot {
                Slot::Enter(data) => groups.push(self.build_group(data)?),
                Slot::Update(node, data) => groups.push(self.update_group(node, data)?),
            }
        }
        self.groups = groups;
        self.clamp_cursor();
        Ok(())
    }

    /// Re-runs the full refresh pass.
    ///
    /// Incremental updates already happen inside [`refresh`](Model::refresh),
    /// so a redraw and a refresh are the same operation.
    pub fn redraw(&mut self) -> Result<(), Error> {
        self.refresh()
    }

    /// Toggles the category cell at the given flat row and column index.
    ///
    /// All marks are cleared first, so at most one cell in the table is
    /// marked afterwards. Toggling the already-active cell removes the
    /// selection. When a category click callback is set it is invoked
    /// with the row, the column, the full (uncapped) row set, and the
    /// apply flag, and its command is returned.
    ///
    /// Indices outside the displayed rows, or columns not flagged as
    /// category, are ignored.
    pub fn toggle_cell(&mut self, row_index: usize, column_index: usize) -> Option<Cmd> {
        if !self
            .columns
            .get(column_index)
            .is_some_and(|column| column.category)
        {
            return None;
        }
        let (group_index, row_in_group) = self.locate_row(row_index)?;
        let row_id = self.groups[group_index].rows[row_in_group].id.clone();

        node::clear_all_marks(&mut self.groups);
        let applied = self.selection.toggle(CellKey::new(row_id, column_index));
        if applied {
            let row_node = &mut self.groups[group_index].rows[row_in_group];
            row_node.clicked = true;
            if let Some(cell) = row_node.cells.get_mut(column_index) {
                cell.clicked = true;
            }
        }

        let handler = self.on_category_click.as_ref()?;
        let all_rows = self.dimension.as_ref()?.top(None);
        handler(
            &self.groups[group_index].rows[row_in_group].row,
            &self.columns[column_index],
            &all_rows,
            applied,
        )
    }

    /// Toggles the category cell under the keyboard cursor.
    pub(super) fn toggle_at_cursor(&mut self) -> Option<Cmd> {
        self.toggle_cell(self.cursor_row, self.cursor_col)
    }

    pub(super) fn move_cursor_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub(super) fn move_cursor_down(&mut self) {
        if self.cursor_row + 1 < self.len() {
            self.cursor_row += 1;
        }
    }

    pub(super) fn move_cursor_left(&mut self) {
        let previous = self.columns[..self.cursor_col]
            .iter()
            .rposition(|column| column.category);
        if let Some(index) = previous {
            self.cursor_col = index;
        }
    }

    pub(super) fn move_cursor_right(&mut self) {
        let next = self
            .columns
            .iter()
            .skip(self.cursor_col + 1)
            .position(|column| column.category);
        if let Some(offset) = next {
            self.cursor_col += offset + 1;
        }
    }

    /// Maps a flat row index to `(group index, row index within group)`.
    fn locate_row(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (group_index, group) in self.groups.iter().enumerate() {
            if remaining < group.rows.len() {
                return Some((group_index, remaining));
            }
            remaining -= group.rows.len();
        }
        None
    }

    fn clamp_cursor(&mut self) {
        let rows = self.len();
        if rows == 0 {
            self.cursor_row = 0;
        } else if self.cursor_row >= rows {
            self.cursor_row = rows - 1;
        }
        let on_category = self
            .columns
            .get(self.cursor_col)
            .is_some_and(|column| column.category);
        if !on_category {
            self.cursor_col = self
                .columns
                .iter()
                .position(|column| column.category)
                .unwrap_or(0);
        }
    }

    fn build_group(&self, data: Group<R>) -> Result<GroupNode<R>, Error> {
        let key = data.key.to_string();
        let mut rows = Vec::with_capacity(data.rows.len());
        for row in data.rows {
            rows.push(self.build_row(row)?);
        }
        Ok(GroupNode::new(key, rows))
    }

    fn build_row(&self, row: R) -> Result<RowNode<R>, Error> {
        let id = row.id();
        let cells = self.build_cells(&row)?;
        Ok(RowNode::new(id, row, cells))
    }

    fn build_cells(&self, row: &R) -> Result<Vec<CellNode>, Error> {
        let mut cells = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let content = format::format_cell(column, &row.field(&column.key))?;
            cells.push(CellNode::new(content, column.category));
        }
        Ok(cells)
    }

    /// Reconciles one surviving group's rows against fresh data.
    ///
    /// Surviving rows re-bind their datum and re-render their cell text
    /// while keeping their marks. Marks are tied to column positions, so
    /// they carry over by index.
    fn update_group(&self, node: GroupNode<R>, data: Group<R>) -> Result<GroupNode<R>, Error> {
        let GroupNode { key, rows } = node;
        let recon = reconcile::reconcile(
            rows,
            data.rows,
            |row: &RowNode<R>| row.id.clone(),
            |row: &R| row.id(),
        );

        let mut next_rows = Vec::with_capacity(recon.slots.len());
        for slot in recon.slots {
            match slot {
                Slot::Enter(row) => next_rows.push(self.build_row(row)?),
                Slot::Update(mut row_node, row) => {
                    row_node.row = row;
                    let mut cells = self.build_cells(&row_node.row)?;
                    for (cell, old) in cells.iter_mut().zip(&row_node.cells) {
                        cell.clicked = old.clicked;
                    }
                    row_node.cells = cells;
                    next_rows.push(row_node);
                }
            }
        }
        Ok(GroupNode::new(key, next_rows))
    }
}
