//! Column specifications and proportional width layout.
//!
//! Columns are declared once, in display order, and drive everything the
//! table shows: header order, cell order, formatting, and which cells are
//! toggleable. Widths are relative weights, not absolute sizes; the layout
//! divides the container width proportionally.

/// Weight assumed for columns that don't declare one.
pub const DEFAULT_COLUMN_WEIGHT: usize = 100;

/// How a column's raw values are formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Values are timestamps, formatted with a strftime pattern.
    Date,
    /// Values are numeric, formatted only when a pattern is present.
    Number,
}

/// Declarative description of one table column.
///
/// The column list is ordered: it defines both header order and cell order.
/// `width` is a relative weight participating in a proportional split of
/// the container width (see [`compute_widths`]); unset or zero weights fall
/// back to [`DEFAULT_COLUMN_WEIGHT`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{ColumnSpec, DataType};
///
/// let columns = vec![
///     ColumnSpec::new("symbol").with_title("Symbol").with_category(true),
///     ColumnSpec::new("volume")
///         .with_title("Volume")
///         .with_width(150)
///         .with_data_type(DataType::Number)
///         .with_data_format(",.2f"),
///     ColumnSpec::new("traded_at")
///         .with_title("Traded")
///         .with_data_type(DataType::Date)
///         .with_need_translate(true),
/// ];
/// assert_eq!(columns[0].header_title(), "Symbol");
/// ```
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Field key resolved against each row.
    pub key: String,
    /// Header label; falls back to `key` when unset.
    pub title: Option<String>,
    /// Relative width weight; defaults to [`DEFAULT_COLUMN_WEIGHT`].
    pub width: Option<usize>,
    /// Formatting family for the column's values.
    pub data_type: Option<DataType>,
    /// Format pattern: strftime for dates, a printf-flavored pattern for
    /// numbers.
    pub data_format: Option<String>,
    /// When set, raw numeric values are epoch seconds and are converted to
    /// UTC timestamps before date formatting.
    pub need_translate: bool,
    /// When set, the column's cells are toggle targets driving the category
    /// click callback.
    pub category: bool,
}

impl ColumnSpec {
    /// Creates a column for the given field key with all options unset.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            width: None,
            data_type: None,
            data_format: None,
            need_translate: false,
            category: false,
        }
    }

    /// Sets the header label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the relative width weight.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the formatting family.
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Sets the format pattern.
    pub fn with_data_format(mut self, format: impl Into<String>) -> Self {
        self.data_format = Some(format.into());
        self
    }

    /// Marks raw values as epoch seconds needing conversion before date
    /// formatting.
    pub fn with_need_translate(mut self, need_translate: bool) -> Self {
        self.need_translate = need_translate;
        self
    }

    /// Marks the column's cells as toggle targets.
    pub fn with_category(mut self, category: bool) -> Self {
        self.category = category;
        self
    }

    /// The label shown in the header: `title`, or `key` when unset.
    pub fn header_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }

    /// Effective weight: the declared width, or the default when unset or
    /// zero.
    pub fn weight(&self) -> usize {
        match self.width {
            Some(w) if w > 0 => w,
            _ => DEFAULT_COLUMN_WEIGHT,
        }
    }
}

/// Divides `total_width` among the columns proportionally to their weights.
///
/// Each column receives `floor((weight / sum_of_weights) * total_width)`
/// character cells. No rounding correction is applied, so the widths may sum
/// to slightly less than `total_width`; the leftover cells are simply not
/// used.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{compute_widths, ColumnSpec};
///
/// let columns = vec![
///     ColumnSpec::new("a").with_width(50),
///     ColumnSpec::new("b").with_width(150),
/// ];
/// assert_eq!(compute_widths(&columns, 200), vec![50, 150]);
/// ```
pub fn compute_widths(columns: &[ColumnSpec], total_width: usize) -> Vec<usize> {
    if columns.is_empty() {
        return Vec::new();
    }
    let agg: f64 = columns.iter().map(|c| c.weight() as f64).sum();
    columns
        .iter()
        .map(|c| ((c.weight() as f64 / agg) * total_width as f64).floor() as usize)
        .collect()
}
