// ********* Input data structures ***********

use indexmap::IndexMap;
use snafu::Snafu;

use std::fmt::Display;
use std::ops::{Add, AddAssign};

/// The content of one spreadsheet cell, as handed over by the readers.
///
/// Readers are expected to numericise text cells that look like numbers before
/// building the rows: a `Text("8")` in a scoring column is a type mismatch.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// The score carried by this cell, if the cell is numeric.
    pub fn as_score(&self) -> Option<Score> {
        match self {
            CellValue::Int(i) => Some(Score::Int(*i)),
            CellValue::Float(f) => Some(Score::Real(*f)),
            _ => None,
        }
    }
}

impl From<Score> for CellValue {
    fn from(score: Score) -> CellValue {
        match score {
            Score::Int(i) => CellValue::Int(i),
            Score::Real(f) => CellValue::Float(f),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> CellValue {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> CellValue {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> CellValue {
        CellValue::Float(f)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => write!(f, "an empty cell"),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => write!(f, "text {:?}", s),
            CellValue::Bool(b) => write!(f, "boolean {}", b),
        }
    }
}

/// One response of the form: the column label mapped to the value of the cell,
/// in the order of the columns.
pub type ResponseRow = IndexMap<String, CellValue>;

/// A cumulative score.
///
/// Scores stay integers as long as only integers are added to them.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Score {
    Int(i64),
    Real(f64),
}

impl Score {
    pub const ZERO: Score = Score::Int(0);

    pub fn as_f64(&self) -> f64 {
        match *self {
            Score::Int(i) => i as f64,
            Score::Real(f) => f,
        }
    }
}

impl Default for Score {
    fn default() -> Score {
        Score::ZERO
    }
}

impl Add for Score {
    type Output = Score;
    fn add(self: Score, rhs: Score) -> Score {
        match (self, rhs) {
            (Score::Int(a), Score::Int(b)) => match a.checked_add(b) {
                Some(s) => Score::Int(s),
                None => Score::Real(a as f64 + b as f64),
            },
            (a, b) => Score::Real(a.as_f64() + b.as_f64()),
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, |acc, s| acc + s)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Int(i) => write!(f, "{}", i),
            Score::Real(x) => write!(f, "{}", x),
        }
    }
}

// ********* Configuration **********

/// The labels of the columns that carry information about the response itself
/// (who answered and when). They are never interpreted as scores.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MetadataLabels {
    pub judge: String,
    pub timestamp: String,
}

impl MetadataLabels {
    pub fn new(judge: &str, timestamp: &str) -> MetadataLabels {
        MetadataLabels {
            judge: judge.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// Exact match only: no trimming, no case folding.
    pub fn is_metadata(&self, label: &str) -> bool {
        label == self.judge || label == self.timestamp
    }
}

// ******** Errors *********

/// Errors that prevent the aggregation from completing.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AggregationError {
    #[snafu(display(
        "Column label {label:?} does not follow the pattern '<index>) <performer> [<category>]'"
    ))]
    MalformedLabel { label: String },

    #[snafu(display("Response {row}, column {column:?}: expected a numeric score, found {content}"))]
    TypeMismatch {
        row: usize,
        column: String,
        content: String,
    },

    #[snafu(display(
        "Performer {performer:?} was scored in categories {found:?}, but the header uses {expected:?}"
    ))]
    InconsistentCategories {
        performer: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}
