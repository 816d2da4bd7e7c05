// netpulse-core/src/infrastructure/adapters/duckdb.rs

use std::path::{Path, PathBuf};

use duckdb::types::{Value as SqlValue, ValueRef};
use duckdb::{Connection, params_from_iter};
use tracing::info;

use crate::domain::dataset::{Dataset, Value};
use crate::error::NetpulseError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::ensure_parent_dir;
use crate::ports::{CuratedPublisher, KpiSource};

const INPUT_VIEW: &str = "csv_input";
const OUTPUT_TABLE: &str = "csv_output";

/// Cell spellings read as missing values, on top of the empty cell.
const NULL_TOKENS: [&str; 7] = ["", "NA", "N/A", "NULL", "NaN", "nan", "<NA>"];

/// CSV reader/writer backed by an in-memory DuckDB connection.
pub struct DuckDbCsv {
    conn: Connection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    BigInt,
    Double,
    Varchar,
}

impl ColumnType {
    fn sql(&self) -> &'static str {
        match self {
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Varchar => "VARCHAR",
        }
    }

    /// Narrowest type able to hold every cell of the column.
    fn infer<'a>(cells: impl Iterator<Item = &'a Value>) -> Self {
        cells.fold(ColumnType::BigInt, |acc, cell| match (acc, cell) {
            (ColumnType::Varchar, _) | (_, Value::Text(_)) => ColumnType::Varchar,
            (_, Value::Float(_)) => ColumnType::Double,
            (acc, Value::Int(_) | Value::Null) => acc,
        })
    }

    fn bind(&self, cell: &Value) -> SqlValue {
        match (self, cell) {
            (_, Value::Null) => SqlValue::Null,
            (ColumnType::Varchar, v) => SqlValue::Text(v.to_string()),
            (ColumnType::Double, Value::Int(i)) => SqlValue::Double(*i as f64),
            (_, Value::Int(i)) => SqlValue::BigInt(*i),
            (_, Value::Float(f)) => SqlValue::Double(*f),
            (_, Value::Text(s)) => SqlValue::Text(s.clone()),
        }
    }
}

impl DuckDbCsv {
    pub fn in_memory() -> Result<Self, InfrastructureError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Reads a headered CSV file. Column types come from DuckDB's sniffer;
    /// every spelling in [`NULL_TOKENS`] becomes `Value::Null`.
    pub fn read_csv(&self, path: &Path) -> Result<Dataset, NetpulseError> {
        if !path.exists() {
            return Err(InfrastructureError::InputNotFound(path.display().to_string()).into());
        }

        let null_tokens = NULL_TOKENS
            .iter()
            .map(|t| format!("'{}'", t.replace('\'', "''")))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn.execute(
            &format!(
                "CREATE OR REPLACE VIEW \"{INPUT_VIEW}\" AS SELECT * FROM read_csv_auto('{}', header = true, nullstr = [{null_tokens}])",
                sql_literal(path)
            ),
            [],
        )?;

        let columns = self.fetch_columns(INPUT_VIEW)?;
        let mut dataset = Dataset::new(columns.iter().cloned());

        let mut stmt = self.conn.prepare(&format!("SELECT * FROM \"{INPUT_VIEW}\""))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                cells.push(from_sql(row.get_ref(i)?));
            }
            dataset.push_row(cells)?;
        }

        info!(path = ?path, rows = dataset.len(), "CSV extracted");
        Ok(dataset)
    }

    /// Writes `dataset` with a header row, replacing `path` atomically.
    pub fn write_csv(&self, dataset: &Dataset, path: &Path) -> Result<(), NetpulseError> {
        let types: Vec<ColumnType> = (0..dataset.columns().len())
            .map(|i| ColumnType::infer(dataset.rows().iter().map(|r| &r[i])))
            .collect();

        let ddl = dataset
            .columns()
            .iter()
            .zip(&types)
            .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.sql()))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn.execute(
            &format!("CREATE OR REPLACE TEMP TABLE \"{OUTPUT_TABLE}\" ({ddl})"),
            [],
        )?;

        self.conn.execute("BEGIN TRANSACTION", [])?;
        {
            let placeholders = vec!["?"; types.len()].join(", ");
            let mut insert = self
                .conn
                .prepare(&format!("INSERT INTO \"{OUTPUT_TABLE}\" VALUES ({placeholders})"))?;
            for row in dataset.rows() {
                let params = row.iter().zip(&types).map(|(cell, ty)| ty.bind(cell));
                insert.execute(params_from_iter(params))?;
            }
        }
        self.conn.execute("COMMIT", [])?;

        // COPY into a sibling temp file, then rename over the target.
        let parent = ensure_parent_dir(path)?;
        let staging = tempfile::Builder::new()
            .prefix(".netpulse-")
            .suffix(".csv")
            .tempfile_in(parent)?
            .into_temp_path();

        self.conn.execute(
            &format!(
                "COPY \"{OUTPUT_TABLE}\" TO '{}' (HEADER, DELIMITER ',')",
                sql_literal(&staging)
            ),
            [],
        )?;
        self.conn.execute(&format!("DROP TABLE \"{OUTPUT_TABLE}\""), [])?;

        staging
            .persist(path)
            .map_err(|e| InfrastructureError::Io(e.error))?;

        info!(path = ?path, rows = dataset.len(), "CSV written");
        Ok(())
    }

    fn fetch_columns(&self, relation: &str) -> Result<Vec<String>, InfrastructureError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info('{relation}')"))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn from_sql(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Int(i64::from(b)),
        ValueRef::TinyInt(i) => Value::Int(i64::from(i)),
        ValueRef::SmallInt(i) => Value::Int(i64::from(i)),
        ValueRef::Int(i) => Value::Int(i64::from(i)),
        ValueRef::BigInt(i) => Value::Int(i),
        ValueRef::UTinyInt(i) => Value::Int(i64::from(i)),
        ValueRef::USmallInt(i) => Value::Int(i64::from(i)),
        ValueRef::UInt(i) => Value::Int(i64::from(i)),
        ValueRef::UBigInt(i) => i64::try_from(i).map_or(Value::Float(i as f64), Value::Int),
        ValueRef::HugeInt(i) => i64::try_from(i).map_or(Value::Float(i as f64), Value::Int),
        ValueRef::Float(f) => Value::Float(f64::from(f)),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        other => Value::Text(format!("{:?}", other)),
    }
}

fn sql_literal(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "''")
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `KpiSource` reading the raw fact from a CSV file.
pub struct CsvKpiSource {
    path: PathBuf,
}

impl CsvKpiSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KpiSource for CsvKpiSource {
    fn extract_raw(&self) -> Result<Dataset, NetpulseError> {
        DuckDbCsv::in_memory()?.read_csv(&self.path)
    }
}

/// `CuratedPublisher` overwriting a CSV file.
pub struct CsvCuratedPublisher {
    path: PathBuf,
}

impl CsvCuratedPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CuratedPublisher for CsvCuratedPublisher {
    fn publish(&self, dataset: &Dataset) -> Result<(), NetpulseError> {
        DuckDbCsv::in_memory()?.write_csv(dataset, &self.path)
    }
}
