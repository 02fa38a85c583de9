//! Database schema migrations for taskdeck.
//!
//! Migrations are applied in order and tracked in the `schema_version`
//! table. Never edit an existing migration; append a new one instead.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    "CREATE TABLE users (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        username     TEXT NOT NULL UNIQUE,
        password     TEXT NOT NULL,
        display_name TEXT,
        created_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );",
    // v2: tasks table
    "CREATE TABLE tasks (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title      TEXT NOT NULL,
        completed  INTEGER NOT NULL DEFAULT 0,
        shared     INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_tasks_user_id ON tasks(user_id);
    CREATE INDEX idx_tasks_shared ON tasks(shared);",
];
