use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::User;

/// Insert a user. `password_hash` must already be a salted PBKDF2 hash —
/// plaintext never reaches this layer.
pub fn create_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
) -> Result<User, DatabaseError> {
    conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        params![username, password_hash],
    )?;
    let id = conn.last_insert_rowid();
    get_user(conn, id)?.ok_or(DatabaseError::NotFound {
        entity_type: "User".into(),
        id,
    })
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, DatabaseError> {
    let user = conn
        .query_row(
            "SELECT id, username, password FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn get_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = conn
        .query_row(
            "SELECT id, username, password FROM users WHERE username = ?1",
            params![username],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}
