// netpulse-core/src/domain/dataset.rs

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A single nullable cell.
///
/// Integers and floats compare numerically with each other, so a key read
/// as `1` and a key read as `1.0` land in the same grain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell. `Null` and text yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::Text(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Int(i), Value::Float(f)) => cmp_int_float(*i, *f),
            (Value::Float(f), Value::Int(i)) => cmp_int_float(*i, *f).reverse(),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Total order on floats where `-0.0 == 0.0`, so it agrees with the
/// integer comparison below.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}

/// Exact comparison: the integer is never widened to `f64`, which would
/// merge distinct integers above 2^53.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.total_cmp(&(f - whole)),
        other => other,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// In-memory table: ordered column names plus row-major cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a dataset and checks every row against the column count.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new(columns);
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), DomainError> {
        if row.len() != self.columns.len() {
            return Err(DomainError::RowArity {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column, or a contract error if the column is absent.
    pub fn column_index(&self, name: &str) -> Result<usize, DomainError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DomainError::MissingColumn(name.to_string()))
    }

    /// Resolves several columns at once, failing on the first missing one.
    pub fn column_indices<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, DomainError> {
        names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value>, DomainError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric cells of a column. Nulls are kept as `None` and text that
    /// parses as a number is accepted; the first text cell that does not
    /// parse is a contract error naming its row.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, DomainError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| match &cells[idx] {
                Value::Text(s) => s.trim().parse::<f64>().map(Some).map_err(|_| {
                    DomainError::NonNumeric {
                        column: name.to_string(),
                        row,
                    }
                }),
                other => Ok(other.as_f64()),
            })
            .collect()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column).ok()?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Projects each row onto the given column positions.
    pub fn keys<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = Vec<&'a Value>> + 'a {
        self.rows
            .iter()
            .map(move |row| indices.iter().map(|&i| &row[i]).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn sample() -> Result<Dataset> {
        Ok(Dataset::from_rows(
            ["date_key", "avg_latency_ms"],
            vec![
                vec![Value::Int(202401), Value::Float(20.5)],
                vec![Value::Int(202402), Value::Null],
            ],
        )?)
    }

    #[test]
    fn test_int_and_float_keys_compare_equal() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::Null < Value::Int(-5));
        assert!(Value::Float(9.0) < Value::Text("a".into()));
    }

    #[test]
    fn test_large_int_keys_stay_distinct_from_nearby_floats() {
        let two_53 = 1_i64 << 53;
        let as_float = Value::Float(two_53 as f64);
        assert_eq!(Value::Int(two_53), as_float);
        assert!(Value::Int(two_53 + 1) > as_float);
        assert!(Value::Int(two_53 + 1) != Value::Int(two_53));
        assert!(Value::Int(i64::MAX) < Value::Float(9.3e18));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn test_negative_fractions_and_signed_zero() {
        assert!(Value::Int(-1) > Value::Float(-1.5));
        assert!(Value::Float(-1.5) < Value::Int(-1));
        assert_eq!(Value::Float(-0.0), Value::Int(0));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn test_row_arity_is_enforced() -> Result<()> {
        let mut ds = sample()?;
        let err = ds.push_row(vec![Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            DomainError::RowArity {
                row: 2,
                expected: 2,
                found: 1
            }
        );
        Ok(())
    }

    #[test]
    fn test_missing_column_is_contract_error() -> Result<()> {
        let ds = sample()?;
        assert_eq!(
            ds.column_index("site_key"),
            Err(DomainError::MissingColumn("site_key".into()))
        );
        Ok(())
    }

    #[test]
    fn test_numeric_column_keeps_nulls() -> Result<()> {
        let ds = sample()?;
        assert_eq!(ds.numeric_column("avg_latency_ms")?, vec![Some(20.5), None]);
        Ok(())
    }

    #[test]
    fn test_numeric_column_rejects_text() -> Result<()> {
        let ds = Dataset::from_rows(["avg_latency_ms"], vec![vec!["fast".into()]])?;
        assert!(matches!(
            ds.numeric_column("avg_latency_ms"),
            Err(DomainError::NonNumeric { row: 0, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_numeric_column_parses_text_and_names_the_bad_row() -> Result<()> {
        let ds = Dataset::from_rows(
            ["avg_latency_ms"],
            vec![vec!["20".into()], vec![" 41.5 ".into()], vec!["slow".into()]],
        )?;
        assert_eq!(
            ds.numeric_column("avg_latency_ms"),
            Err(DomainError::NonNumeric {
                column: "avg_latency_ms".into(),
                row: 2
            })
        );

        let ok = Dataset::from_rows(
            ["avg_latency_ms"],
            vec![vec!["20".into()], vec![Value::Null]],
        )?;
        assert_eq!(ok.numeric_column("avg_latency_ms")?, vec![Some(20.0), None]);
        Ok(())
    }
}
