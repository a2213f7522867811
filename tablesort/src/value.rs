//! Tagged cell values and their natural ordering.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Value of one cell as seen by the comparator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value; sorts after every present value under the base comparator.
    #[default]
    Absent,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text used by the lexical comparison; `None` when absent.
    pub fn lexical(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Absent => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s)),
            CellValue::Number(_) => Some(Cow::Owned(self.to_string())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            // Integral values print without a fractional part, as a page would.
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Number(n.into())
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n.into())
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n.into())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Absent, Into::into)
    }
}

/// How present values of one column are compared.
///
/// Decided per column rather than per pair so the comparator stays a total
/// order: a column with a single textual value compares everything as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Lexical,
}

impl ColumnKind {
    /// Numeric when every present value is a number.
    pub fn detect<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let all_numeric = values
            .into_iter()
            .filter(|v| !v.is_absent())
            .all(|v| v.as_number().is_some());
        if all_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Lexical
        }
    }
}

/// Ascending comparison of two cells: absent values sort last, present
/// values use the column's natural order.
pub fn natural_cmp(a: &CellValue, b: &CellValue, kind: ColumnKind) -> Ordering {
    match (a, b) {
        (CellValue::Absent, CellValue::Absent) => Ordering::Equal,
        (CellValue::Absent, _) => Ordering::Greater,
        (_, CellValue::Absent) => Ordering::Less,
        (CellValue::Number(x), CellValue::Number(y)) if kind == ColumnKind::Numeric => {
            x.partial_cmp(y).unwrap_or_else(|| x.total_cmp(y))
        }
        // Text order is by UTF-16 code unit, as a browser compares strings.
        _ => match (a.lexical(), b.lexical()) {
            (Some(x), Some(y)) => x.encode_utf16().cmp(y.encode_utf16()),
            (x, y) => x.cmp(&y),
        },
    }
}
