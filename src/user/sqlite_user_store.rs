use super::user_models::{NewUser, User, UserRole, UserUpdate};
use super::user_store::UserStore;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    open_versioned_db, Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};
use anyhow::{Context, Result};
use chrono::DateTime;
use rusqlite::{
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
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("username", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("email", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("password_hash", &SqlType::Text, non_null = true),
        sqlite_column!("role", &SqlType::Text, non_null = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[],
};

pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[USER_TABLE_V_0],
    migration: None,
}];

const USER_COLUMNS: &str = "id, username, email, role, first_name, last_name, created";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let role = row
        .get::<_, String>(3)?
        .parse::<UserRole>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, err.into()))?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        role,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        created: DateTime::from_timestamp(row.get(6)?, 0).unwrap_or_default(),
    })
}

fn fetch_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM {} WHERE id = ?1",
            USER_COLUMNS, USER_TABLE_V_0.name
        ),
        params![id],
        user_from_row,
    )
    .optional()
    .with_context(|| format!("Failed to read user {}", id))
}

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, VERSIONED_SCHEMAS)?;
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl UserStore for SqliteUserStore {
    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY id",
            USER_COLUMNS, USER_TABLE_V_0.name
        ))?;
        let users = stmt
            .query_map(params![], user_from_row)?
            .collect::<Result<Vec<User>, _>>()?;
        Ok(users)
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        fetch_user(&conn, id)
    }

    fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!(
                "SELECT {} FROM {} WHERE username = ?1 OR email = ?2 ORDER BY id LIMIT 1",
                USER_COLUMNS, USER_TABLE_V_0.name
            ),
            params![username, email],
            user_from_row,
        )
        .optional()
        .context("Failed to look up user by username or email")
    }

    fn create_user(&self, user: NewUser) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (username, email, password_hash, role, first_name, last_name) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                USER_TABLE_V_0.name
            ),
            params![
                user.username,
                user.email,
                user.password_hash,
                user.role.as_str(),
                user.first_name,
                user.last_name,
            ],
        )
        .with_context(|| format!("Failed to create user {}", user.username))?;
        let id = conn.last_insert_rowid();
        fetch_user(&conn, id)?.with_context(|| format!("User {} vanished after insert", id))
    }

    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        if fetch_user(&tx, id)?.is_none() {
            return Ok(None);
        }

        let fields = [
            ("password_hash", update.password_hash.clone()),
            ("role", update.role.map(|r| r.as_str().to_owned())),
            ("first_name", update.first_name.clone()),
            ("last_name", update.last_name.clone()),
        ];
        let mut assignments = Vec::new();
        let mut values = Vec::new();
        for (column, value) in fields {
            if let Some(value) = value {
                values.push(Value::Text(value));
                assignments.push(format!("{} = ?{}", column, values.len()));
            }
        }

        if !assignments.is_empty() {
            values.push(Value::Integer(id));
            let sql = format!(
                "UPDATE {} SET {} WHERE id = ?{}",
                USER_TABLE_V_0.name,
                assignments.join(", "),
                values.len()
            );
            debug!("update_user({id}) {sql}");
            tx.execute(&sql, params_from_iter(values.iter()))?;
        }

        let user = fetch_user(&tx, id)?;
        tx.commit()?;
        Ok(user)
    }

    fn delete_user(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", USER_TABLE_V_0.name),
            params![id],
        )?;
        Ok(deleted > 0)
    }
}
