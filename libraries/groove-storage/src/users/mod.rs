//! User account queries

use groove_core::{
    error::{GrooveError, Result},
    types::{CreateUser, Role, User, UserId},
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        password: row.get("password"),
        role: role.parse::<Role>().map_err(GrooveError::storage)?,
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, password, role FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Exact, case-sensitive username lookup
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, password, role FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users ordered by username
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, password, role FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Create a user
///
/// `password` must already be hashed. A taken username surfaces as
/// [`GrooveError::Duplicate`].
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| GrooveError::not_found("user", id))
}
