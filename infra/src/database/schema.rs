//! Table layout for the user store

/// Creates the `users` table when it does not exist yet
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        username        VARCHAR(64)   NOT NULL PRIMARY KEY,
        password_hash   VARCHAR(255)  NOT NULL,
        role            VARCHAR(16)   NOT NULL,
        is_blocked      BOOLEAN       NOT NULL DEFAULT FALSE,
        failed_attempts INT UNSIGNED  NOT NULL DEFAULT 0,
        balance         DECIMAL(28,8) NOT NULL DEFAULT 0,
        created_at      DATETIME(6)   NOT NULL,
        updated_at      DATETIME(6)   NOT NULL
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_bin
"#;

/// `balance` column precision and scale, as declared above
pub const BALANCE_PRECISION: u32 = 28;
pub const BALANCE_SCALE: u32 = 8;
