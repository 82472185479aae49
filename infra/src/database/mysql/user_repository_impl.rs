//! MySQL implementation of the UserRepository trait.
//!
//! Partial updates run as read-merge-write inside one transaction with the
//! row held by `SELECT ... FOR UPDATE`, so concurrent writers on other
//! processes cannot interleave between the read and the write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use std::str::FromStr;

use tally_core::domain::entities::user::{BalanceLimits, User, UserRole, UserUpdate};
use tally_core::errors::{AuthError, DomainError};
use tally_core::repositories::UserRepository;

use crate::database::schema::{BALANCE_PRECISION, BALANCE_SCALE};

const USER_COLUMNS: &str = "username, password_hash, role, is_blocked, failed_attempts, \
                            balance, created_at, updated_at";

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    pub(crate) fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role: String = row.try_get("role").map_err(|e| column_error("role", e))?;

        Ok(User {
            username: row
                .try_get("username")
                .map_err(|e| column_error("username", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            role: parse_stored_role(&role)?,
            is_blocked: row
                .try_get("is_blocked")
                .map_err(|e| column_error("is_blocked", e))?,
            failed_attempts: row
                .try_get::<u32, _>("failed_attempts")
                .map_err(|e| column_error("failed_attempts", e))?,
            balance: row
                .try_get::<Decimal, _>("balance")
                .map_err(|e| column_error("balance", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

/// Roles are written by `UserRole::as_str`; anything else is corruption
pub(crate) fn parse_stored_role(role: &str) -> Result<UserRole, DomainError> {
    UserRole::from_str(role).map_err(|_| DomainError::Internal {
        message: format!("Unknown role stored for user: {}", role),
    })
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, e),
    }
}

/// Map a driver error to the domain taxonomy
///
/// Unique-key violations become `DuplicateUsername`; values the columns
/// cannot hold and decode failures are `Internal`; connectivity and query
/// failures become the retryable `StoreUnavailable`.
pub(crate) fn map_sqlx_error(operation: &str, e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::Auth(AuthError::DuplicateUsername);
        }
        // SQLSTATE class 22: the value does not fit the column.
        if db_err.code().is_some_and(|code| code.starts_with("22")) {
            return DomainError::Internal {
                message: format!("{} rejected by the store: {}", operation, db_err),
            };
        }
    }

    let decode_failure = matches!(
        e,
        sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    );
    if decode_failure {
        return DomainError::Internal {
            message: format!("{} failed: {}", operation, e),
        };
    }

    tracing::error!(operation = operation, error = %e, "User store failure");
    DomainError::StoreUnavailable {
        message: format!("{} failed: {}", operation, e),
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE username = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_username", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                username, password_hash, role, is_blocked,
                failed_attempts, balance, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.is_blocked)
            .bind(user.failed_attempts)
            .bind(user.balance)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create", e))?;

        Ok(user)
    }

    async fn update(&self, username: &str, update: UserUpdate) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        let select = format!(
            "SELECT {} FROM users WHERE username = ? LIMIT 1 FOR UPDATE",
            USER_COLUMNS
        );
        let row = sqlx::query(&select)
            .bind(username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update", e))?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let mut user = Self::row_to_user(&row)?;
        user.apply(&update);

        sqlx::query(
            r#"
            UPDATE users SET
                is_blocked = ?,
                failed_attempts = ?,
                balance = ?,
                updated_at = ?
            WHERE username = ?
            "#,
        )
        .bind(user.is_blocked)
        .bind(user.failed_attempts)
        .bind(user.balance)
        .bind(user.updated_at)
        .bind(username)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("update", e))?;
        Ok(user)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;

        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total.max(0) as u64)
    }

    fn balance_limits(&self) -> BalanceLimits {
        BalanceLimits::for_decimal_column(BALANCE_PRECISION, BALANCE_SCALE)
    }
}
