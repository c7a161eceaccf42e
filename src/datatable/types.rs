//! Core types for the data table: cell values, row/dimension traits,
//! callback signatures, and the error type.

use bubbletea_rs::Cmd;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error as ThisError;

use super::columns::ColumnSpec;

/// A dynamic cell value.
///
/// Rows surface their fields as `Value`s so the table can sort, group, and
/// format them without knowing the row type. `Null` stands for an absent
/// field and renders as an empty cell.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::Value;
///
/// let v: Value = 42.into();
/// assert_eq!(v.to_string(), "42");
/// assert!(Value::Null.is_null());
/// assert_eq!(Value::Null.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent field.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
    /// Timestamp value.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Reports whether this is the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the numeric content of `Int`/`Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Human-readable name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::DateTime(_) => 4,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Ascending comparison over [`Value`]s.
///
/// Same-kind values compare naturally (numbers numerically across
/// `Int`/`Float`, strings lexically, timestamps chronologically). Mixed
/// kinds order by a fixed rank with `Null` first. This is the table's
/// default comparator.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{ascending, Value};
/// use std::cmp::Ordering;
///
/// assert_eq!(ascending(&Value::Int(1), &Value::Float(2.0)), Ordering::Less);
/// assert_eq!(ascending(&Value::from("a"), &Value::from("b")), Ordering::Less);
/// ```
pub fn ascending(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::Int(x), Value::Float(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Value::Float(x), Value::Int(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Descending comparison over [`Value`]s, the reverse of [`ascending`].
pub fn descending(a: &Value, b: &Value) -> Ordering {
    ascending(b, a)
}

/// A record the table can display.
///
/// Implementations supply a *unique, stable* identity and field access by
/// column key. The identity is what lets the table match rows across refresh
/// passes, so it must not change when the row's field values do, and two
/// distinct rows must never share one. In particular, the group key is not a
/// valid identity: groups collapse many rows onto one key.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct Trade {
///     id: u64,
///     symbol: String,
///     volume: f64,
/// }
///
/// impl TableRow for Trade {
///     fn id(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "symbol" => self.symbol.as_str().into(),
///             "volume" => self.volume.into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone {
    /// Unique, stable identity used to match this row across refreshes.
    fn id(&self) -> String;

    /// The value of the named field, or `Value::Null` when absent.
    fn field(&self, key: &str) -> Value;
}

/// Upstream source of filtered rows.
///
/// The table never stores the data set; every refresh pulls the current
/// rows from the bound dimension, which is expected to reflect whatever
/// filtering the host application applies elsewhere.
pub trait Dimension<R> {
    /// Returns the rows currently passing the upstream filter, best-first
    /// as defined by the source, capped at `limit` rows when one is given.
    /// `None` retrieves the entire filtered set.
    fn top(&self, limit: Option<usize>) -> Vec<R>;
}

/// An in-memory [`Dimension`] over a plain vector.
///
/// Useful in tests and in hosts that don't run a real filter engine;
/// `top` returns rows in stored order.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{Dimension, VecDimension};
///
/// let dim = VecDimension::new(vec![1, 2, 3, 4]);
/// assert_eq!(dim.top(Some(2)), vec![1, 2]);
/// assert_eq!(dim.top(None).len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VecDimension<R> {
    rows: Vec<R>,
}

impl<R> VecDimension<R> {
    /// Creates a dimension over the given rows.
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Replaces the backing rows.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Returns the backing rows.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }
}

impl<R: Clone> Dimension<R> for VecDimension<R> {
    fn top(&self, limit: Option<usize>) -> Vec<R> {
        match limit {
            Some(n) => self.rows.iter().take(n).cloned().collect(),
            None => self.rows.clone(),
        }
    }
}

/// Accessor deriving a group key from a row.
pub type GroupKeyFn<R> = Box<dyn Fn(&R) -> Value + Send>;

/// Accessor deriving a sort key from a row.
pub type SortKeyFn<R> = Box<dyn Fn(&R) -> Value + Send>;

/// Comparator over two key values.
pub type OrderFn = Box<dyn Fn(&Value, &Value) -> Ordering + Send>;

/// Callback invoked when a category cell is toggled.
///
/// Receives the toggled row, the column spec, the *entire* current filtered
/// row set (an unbounded retrieval, not the capped display set), and whether
/// the mark was applied (`true`) or removed (`false`). May return a command
/// for the runtime, typically one that mutates an external filter.
pub type CategoryClickFn<R> =
    Box<dyn Fn(&R, &ColumnSpec, &[R], bool) -> Option<Cmd> + Send>;

/// Errors surfaced by the data table.
///
/// Configuration gaps that would silently render a broken table are
/// reported at refresh time; formatting problems carry the offending
/// pattern or value.
#[derive(Debug, ThisError)]
pub enum Error {
    /// `refresh` was called with no dimension bound.
    #[error("no dimension bound; call set_dimension before refreshing")]
    MissingDimension,

    /// `refresh` was called with no group-key accessor bound.
    #[error("no group-key accessor bound; call set_group_by before refreshing")]
    MissingGroupBy,

    /// A date column's strftime pattern failed to format.
    #[error("invalid date format pattern {pattern:?}")]
    DateFormat {
        /// The pattern that failed.
        pattern: String,
    },

    /// A number column's format pattern is not supported.
    #[error("unsupported number format pattern {pattern:?}")]
    NumberFormat {
        /// The pattern that failed.
        pattern: String,
    },

    /// A date column received a value that is not a timestamp.
    #[error("cannot format {value:?} as a date")]
    DateValue {
        /// Display form of the offending value.
        value: String,
    },

    /// An epoch-seconds translation received a non-numeric or out-of-range
    /// value.
    #[error("cannot interpret {value:?} as epoch seconds")]
    EpochValue {
        /// Display form of the offending value.
        value: String,
    },

    /// A number column received a non-numeric value.
    #[error("cannot format {value:?} as a number")]
    NumberValue {
        /// Display form of the offending value.
        value: String,
    },
}
