//! DuckDB-backed query source
//!
//! A [`DatabaseEngine`] owns a DuckDB connection; [`TableQuery`] pages
//! through a table or arbitrary SQL query on it, yielding rows as JSON
//! objects.

use crate::error::{Error, Result};
use crate::loader::SourceDefinition;
use crate::query::{Query, Slice};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use duckdb::types::{TimeUnit, Value as DbValue};
use duckdb::Connection;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory database location
pub const IN_MEMORY: &str = ":memory:";

/// Shared DuckDB connection
#[derive(Clone)]
pub struct DatabaseEngine {
    conn: Arc<Mutex<Connection>>,
    location: String,
}

impl DatabaseEngine {
    /// Open a database file, or an in-memory database for `":memory:"`
    pub fn open(location: &str) -> Result<Self> {
        let opened = if location == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(location)
        };
        let conn = opened.map_err(|e| {
            Error::config(format!("Failed to open DuckDB database '{location}': {e}"))
        })?;

        tracing::debug!("Opened DuckDB database at {location}");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: location.to_string(),
        })
    }

    /// Open a fresh in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY)
    }

    /// Open the database named by a source definition and run its setup SQL
    pub fn for_source(def: &SourceDefinition) -> Result<Self> {
        let engine = Self::open(&def.database)?;
        if let Some(ref setup) = def.setup {
            engine
                .execute_batch(setup)
                .map_err(|e| Error::config(format!("Setup for source '{}' failed: {e}", def.name)))?;
        }
        Ok(engine)
    }

    /// Where the database lives (file path or `:memory:`)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Execute one or more statements, discarding results
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!("Executing batch: {}", sql);
        self.lock()?.execute_batch(sql)?;
        Ok(())
    }

    /// Get list of tables in the database
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT schema_name || '.' || table_name AS full_name
             FROM duckdb_tables()
             ORDER BY schema_name, table_name",
        )?;

        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(tables)
    }

    /// Query every row of a table
    pub fn table(&self, table: &str) -> TableQuery {
        TableQuery::new(Arc::clone(&self.conn), format!("SELECT * FROM {table}"))
    }

    /// Query the rows produced by arbitrary SQL
    pub fn query(&self, sql: &str) -> TableQuery {
        TableQuery::new(Arc::clone(&self.conn), sql.to_string())
    }

    /// Build the query described by a source definition
    pub fn source_query(&self, def: &SourceDefinition) -> Result<TableQuery> {
        let query = match (&def.table, &def.query) {
            (Some(table), None) => self.table(table),
            (None, Some(sql)) => self.query(sql),
            _ => {
                return Err(Error::config(format!(
                    "Source '{}' must have exactly one of 'table' or 'query' defined",
                    def.name
                )))
            }
        };

        Ok(match def.order_by {
            Some(ref order) => query.order_by(order),
            None => query,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        lock_connection(&self.conn)
    }
}

fn lock_connection(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| Error::query("DuckDB connection lock poisoned"))
}

/// Pageable query over a DuckDB table or SQL statement
///
/// `count` ignores the window; `materialize` applies it as
/// `LIMIT`/`OFFSET` around the base statement.
#[derive(Clone)]
pub struct TableQuery {
    conn: Arc<Mutex<Connection>>,
    base: String,
    order_by: Option<String>,
    skip: i64,
    limit: i64,
}

impl TableQuery {
    fn new(conn: Arc<Mutex<Connection>>, base: String) -> Self {
        Self {
            conn,
            base,
            order_by: None,
            skip: 0,
            limit: 0,
        }
    }

    /// Order fetched rows by the given SQL expression
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    /// SQL counting every row of the base statement
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ({}) AS q", self.base)
    }

    /// SQL fetching the configured window
    pub fn window_sql(&self) -> String {
        let slice = Slice::new(self.skip, self.limit);
        let mut sql = format!("SELECT * FROM ({}) AS q", self.base);

        if let Some(ref order) = self.order_by {
            sql = format!("{sql} ORDER BY {order}");
        }
        if let Some(limit) = slice.limit {
            sql = format!("{sql} LIMIT {limit}");
        }
        if slice.offset > 0 {
            sql = format!("{sql} OFFSET {}", slice.offset);
        }

        sql
    }

    fn count_rows(&self) -> Result<u64> {
        let sql = self.count_sql();
        tracing::debug!("Executing query: {}", sql);

        let conn = lock_connection(&self.conn)?;
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;

        u64::try_from(count).map_err(|_| Error::query(format!("Negative row count: {count}")))
    }

    fn fetch_rows(&self) -> Result<Vec<Value>> {
        let sql = self.window_sql();
        tracing::debug!("Executing query: {}", sql);

        let conn = lock_connection(&self.conn)?;
        let columns = describe_columns(&conn, &sql)?;

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([], |row| {
                let mut record = Map::with_capacity(columns.len());
                for (idx, name) in columns.iter().enumerate() {
                    let value: DbValue = row.get(idx)?;
                    record.insert(name.clone(), cell_to_json(value));
                }
                Ok(Value::Object(record))
            })?
            .collect::<std::result::Result<Vec<Value>, _>>()?;

        Ok(records)
    }
}

#[async_trait]
impl Query for TableQuery {
    type Item = Value;

    fn skip(mut self, n: i64) -> Self {
        self.skip = n;
        self
    }

    fn limit(mut self, n: i64) -> Self {
        self.limit = n;
        self
    }

    async fn count(&self) -> Result<u64> {
        self.count_rows()
    }

    async fn materialize(&self) -> Result<Vec<Value>> {
        self.fetch_rows()
    }
}

/// Column names of a statement, in output order
fn describe_columns(conn: &Connection, sql: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("DESCRIBE {sql}"))?;
    let columns = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(columns)
}

/// Render one result cell as JSON
///
/// Integers that fit in 64 bits stay numbers, wider ones become strings.
/// Non-finite floats become `null`. Temporal values are rendered as ISO 8601
/// strings in UTC, whatever their storage unit. Nested lists and structs are
/// converted element by element.
fn cell_to_json(cell: DbValue) -> Value {
    match cell {
        DbValue::Null => Value::Null,
        DbValue::Boolean(b) => Value::Bool(b),
        DbValue::TinyInt(n) => n.into(),
        DbValue::SmallInt(n) => n.into(),
        DbValue::Int(n) => n.into(),
        DbValue::BigInt(n) => n.into(),
        DbValue::UTinyInt(n) => n.into(),
        DbValue::USmallInt(n) => n.into(),
        DbValue::UInt(n) => n.into(),
        DbValue::UBigInt(n) => n.into(),
        DbValue::HugeInt(n) => i64::try_from(n).map_or_else(|_| n.to_string().into(), Value::from),
        DbValue::UHugeInt(n) => u64::try_from(n).map_or_else(|_| n.to_string().into(), Value::from),
        DbValue::Float(f) => float_to_json(f64::from(f)),
        DbValue::Double(f) => float_to_json(f),
        DbValue::Text(s) | DbValue::Enum(s) => Value::String(s),
        DbValue::Blob(bytes) => Value::String(BASE64.encode(bytes)),
        DbValue::Timestamp(unit, ticks) => timestamp_to_json(unit, ticks),
        DbValue::Date32(days) => date_to_json(days),
        DbValue::Time64(unit, ticks) => time_to_json(unit, ticks),
        DbValue::List(cells) | DbValue::Array(cells) => {
            Value::Array(cells.into_iter().map(cell_to_json).collect())
        }
        DbValue::Struct(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, cell)| (name.clone(), cell_to_json(cell.clone())))
                .collect(),
        ),
        DbValue::Union(cell) => cell_to_json(*cell),
        other => Value::String(format!("{other:?}")),
    }
}

fn float_to_json(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}

// Ticks in `unit` converted to microseconds, None on overflow
fn to_micros(unit: TimeUnit, ticks: i64) -> Option<i64> {
    match unit {
        TimeUnit::Second => ticks.checked_mul(1_000_000),
        TimeUnit::Millisecond => ticks.checked_mul(1_000),
        TimeUnit::Microsecond => Some(ticks),
        TimeUnit::Nanosecond => Some(ticks.div_euclid(1_000)),
    }
}

fn timestamp_to_json(unit: TimeUnit, ticks: i64) -> Value {
    to_micros(unit, ticks)
        .and_then(DateTime::from_timestamp_micros)
        .map_or(Value::from(ticks), |at| {
            Value::String(at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
        })
}

fn date_to_json(days_since_epoch: i32) -> Value {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(TimeDelta::try_days(days_since_epoch.into())?))
        .map_or(Value::from(days_since_epoch), |date| {
            Value::String(date.format("%Y-%m-%d").to_string())
        })
}

fn time_to_json(unit: TimeUnit, ticks: i64) -> Value {
    to_micros(unit, ticks)
        .and_then(|micros| {
            let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
            let nanos = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok()?;
            NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        })
        .map_or(Value::from(ticks), |time| {
            Value::String(time.format("%H:%M:%S%.6f").to_string())
        })
}
