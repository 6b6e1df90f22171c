pub const SCHEMA: &str = r#"
-- Users that can be granted report access
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL
);

-- Reporting groups, loaded upstream
CREATE TABLE IF NOT EXISTS groups (
    group_key INTEGER PRIMARY KEY,
    group_name TEXT NOT NULL,
    level2_name TEXT,
    level3_name TEXT
);

-- Access grants. No uniqueness on (user_id, group_key) and no cascade:
-- both are handled by the application.
CREATE TABLE IF NOT EXISTS user_access (
    access_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    group_key INTEGER NOT NULL REFERENCES groups(group_key),
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
CREATE INDEX IF NOT EXISTS idx_groups_level2 ON groups(level2_name);
CREATE INDEX IF NOT EXISTS idx_groups_level3 ON groups(level3_name);
CREATE INDEX IF NOT EXISTS idx_user_access_user ON user_access(user_id);
"#;
