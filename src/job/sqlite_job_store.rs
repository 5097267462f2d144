use super::job_models::{Job, JobInput, JobStatus, NewJob};
use super::job_query::{JobQuery, LOWER_FN};
use super::job_store::JobStore;
use crate::sqlite_column;
use crate::sqlite_persistence::{open_versioned_db, Column, SqlType, Table, VersionedSchema};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{
    functions::FunctionFlags,
    params, params_from_iter,
    types::{Type, Value},
    Connection, OptionalExtension, Row,
};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::debug;

/// V 0
const JOB_TABLE_V_0: Table = Table {
    name: "job",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("company", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text, non_null = true),
        sqlite_column!("publish_date", &SqlType::Integer, non_null = true),
        sqlite_column!("expiration_date", &SqlType::Integer),
        sqlite_column!("status", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_job_title", "title")],
};

pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[JOB_TABLE_V_0],
    migration: None,
}];

const JOB_COLUMNS: &str =
    "id, title, description, company, location, publish_date, expiration_date, status";

fn to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn job_from_row(row: &Row) -> rusqlite::Result<Job> {
    let status = row
        .get::<_, String>(7)?
        .parse::<JobStatus>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, err.into()))?;
    Ok(Job {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        company: row.get(3)?,
        location: row.get(4)?,
        publish_date: to_datetime(row.get(5)?),
        expiration_date: row.get::<_, Option<i64>>(6)?.map(to_datetime),
        status,
    })
}

/// Registers the lowercase function used by the `LIKE` filters of
/// [`JobQuery`]. SQLite's own `lower()` only folds ASCII.
fn register_lower_fn(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text = ctx.get::<Option<String>>(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
    .with_context(|| format!("Failed to register SQL function {}", LOWER_FN))
}

fn fetch_job(conn: &Connection, id: i64) -> Result<Option<Job>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM {} WHERE id = ?1",
            JOB_COLUMNS, JOB_TABLE_V_0.name
        ),
        params![id],
        job_from_row,
    )
    .optional()
    .with_context(|| format!("Failed to read job {}", id))
}

#[derive(Clone)]
pub struct SqliteJobStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteJobStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, VERSIONED_SCHEMAS)?;
        register_lower_fn(&conn)?;
        Ok(SqliteJobStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl JobStore for SqliteJobStore {
    fn list_jobs(&self, query: &JobQuery) -> Result<Vec<Job>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY id",
            JOB_COLUMNS,
            JOB_TABLE_V_0.name,
            query.where_clause()
        );
        debug!("list_jobs() {}", sql);
        let mut stmt = conn.prepare(&sql)?;
        let jobs = stmt
            .query_map(params_from_iter(query.params()), job_from_row)?
            .collect::<Result<Vec<Job>, _>>()?;
        Ok(jobs)
    }

    fn get_job(&self, id: i64) -> Result<Option<Job>> {
        let conn = self.conn.lock().unwrap();
        fetch_job(&conn, id)
    }

    fn create_job(&self, job: NewJob) -> Result<Job> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (title, description, company, location, publish_date, expiration_date, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                JOB_TABLE_V_0.name
            ),
            params![
                job.title,
                job.description,
                job.company,
                job.location,
                job.publish_date.timestamp(),
                job.expiration_date.map(|d| d.timestamp()),
                job.status.as_str(),
            ],
        )
        .with_context(|| format!("Failed to create job {}", job.title))?;
        let id = conn.last_insert_rowid();
        fetch_job(&conn, id)?.with_context(|| format!("Job {} vanished after insert", id))
    }

    fn update_job(&self, id: i64, update: &JobInput) -> Result<Option<Job>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        if fetch_job(&tx, id)?.is_none() {
            return Ok(None);
        }

        let mut assignments: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        let mut set = |column: &str, value: Value| {
            values.push(value);
            assignments.push(format!("{} = ?{}", column, values.len()));
        };
        if let Some(title) = update.title() {
            set("title", Value::Text(title.to_owned()));
        }
        if let Some(description) = update.description() {
            set("description", Value::Text(description.to_owned()));
        }
        if let Some(company) = update.company() {
            set("company", Value::Text(company.to_owned()));
        }
        if let Some(location) = update.location() {
            set("location", Value::Text(location.to_owned()));
        }
        if let Some(expiration_date) = update.expiration_date {
            set("expiration_date", Value::Integer(expiration_date.timestamp()));
        }
        if let Some(status) = update.status {
            set("status", Value::Text(status.as_str().to_owned()));
        }

        if !assignments.is_empty() {
            values.push(Value::Integer(id));
            let sql = format!(
                "UPDATE {} SET {} WHERE id = ?{}",
                JOB_TABLE_V_0.name,
                assignments.join(", "),
                values.len()
            );
            debug!("update_job({id}) {sql}");
            tx.execute(&sql, params_from_iter(values.iter()))?;
        }

        let job = fetch_job(&tx, id)?;
        tx.commit()?;
        Ok(job)
    }

    fn delete_job(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", JOB_TABLE_V_0.name),
            params![id],
        )?;
        Ok(deleted > 0)
    }
}
