//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Register users and resolve them by username.
//!
//! # Invariants
//! - Usernames are unique; duplicates surface as validation errors.

use crate::model::user::{normalize_username, User};
use crate::model::validation::ValidationError;
use crate::repo::{ensure_tables, RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

/// Repository interface for user accounts.
pub trait UserRepository {
    fn create_user(&self, username: &str, created_at: i64) -> RepoResult<User>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, username: &str, created_at: i64) -> RepoResult<User> {
        let username = normalize_username(username)?;

        let inserted = self.conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2);",
            params![username.as_str(), created_at],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                return Err(RepoError::Validation(ValidationError::Duplicate {
                    field: "username",
                    value: username,
                }));
            }
            Err(err) => return Err(err.into()),
        }

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username,
            created_at,
        })
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, created_at FROM users WHERE username = ?1;",
                [username.trim()],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        created_at: row.get("created_at")?,
    })
}
