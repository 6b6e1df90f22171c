use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use super::schema::SCHEMA;
use super::{Connector, Store};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// Groups are maintained outside this tool; loaders use this to write them.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }

    fn search_in_column(&self, column: SearchColumn, pattern: &str) -> Result<Vec<SearchResult>> {
        let sql = match column {
            SearchColumn::Level2 => {
                "SELECT DISTINCT group_key, group_name FROM groups
                 WHERE level2_name LIKE ?1 ORDER BY group_name"
            }
            SearchColumn::Level3 => {
                "SELECT DISTINCT group_key, group_name FROM groups
                 WHERE level3_name LIKE ?1 ORDER BY group_name"
            }
        };

        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(SearchResult {
                group_key: row.get(0)?,
                group_name: row.get(1)?,
                matched_on: column,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // User operations

    fn list_users(&self, filter: &str, sort: UserSort, dir: SortDir) -> Result<Vec<User>> {
        // Only these fixed identifiers ever reach the ORDER BY clause.
        let column = match sort {
            UserSort::Id => "id",
            UserSort::Email => "email",
        };
        let direction = match dir {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        };

        let mut sql = String::from("SELECT id, email FROM users");
        let mut args = Vec::new();
        if !filter.is_empty() {
            sql.push_str(" WHERE email LIKE ?1");
            args.push(format!("%{filter}%"));
        }
        sql.push_str(&format!(" ORDER BY {column} {direction}"));

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
            Ok(User {
                id: row.get(0)?,
                email: row.get(1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, email FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn create_user(&self, email: &str) -> Result<i64> {
        let id = self.conn().query_row(
            "INSERT INTO users (email) VALUES (?1) RETURNING id",
            params![email],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn update_user(&self, id: i64, email: &str) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE users SET email = ?1 WHERE id = ?2",
            params![email, id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_user(&self, id: i64) -> Result<()> {
        let conn = self.conn();

        conn.execute("DELETE FROM user_access WHERE user_id = ?1", params![id])?;
        let rows = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    // Access operations

    fn list_user_access(&self, user_id: i64) -> Result<Vec<AccessGrant>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT ua.access_id, ua.user_id, ua.group_key, g.group_name, ua.created_at
             FROM user_access ua
             JOIN groups g ON ua.group_key = g.group_key
             WHERE ua.user_id = ?1
             ORDER BY g.group_name",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(AccessGrant {
                access_id: row.get(0)?,
                user_id: row.get(1)?,
                group_key: row.get(2)?,
                group_name: row.get(3)?,
                created_at: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn access_exists(&self, user_id: i64, group_key: i64) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM user_access WHERE user_id = ?1 AND group_key = ?2",
            params![user_id, group_key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn add_user_groups(&self, user_id: i64, group_keys: &[i64]) -> Result<()> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "INSERT INTO user_access (user_id, group_key, created_at) VALUES (?1, ?2, ?3)",
        )?;

        for group_key in group_keys {
            stmt.execute(params![user_id, group_key, format_datetime(&Utc::now())])
                .inspect_err(|e| {
                    tracing::warn!("Failed to add group {group_key} for user {user_id}: {e}");
                })?;
        }
        Ok(())
    }

    fn remove_access(&self, access_id: i64) -> Result<()> {
        let rows = self.conn().execute(
            "DELETE FROM user_access WHERE access_id = ?1",
            params![access_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    // Group operations

    fn search_groups(&self, term: &str) -> Result<Vec<SearchResult>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{term}%");
        let results = self.search_in_column(SearchColumn::Level2, &pattern)?;
        if !results.is_empty() {
            return Ok(results);
        }
        self.search_in_column(SearchColumn::Level3, &pattern)
    }

    fn get_group(&self, group_key: i64) -> Result<Option<Group>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT group_key, group_name FROM groups WHERE group_key = ?1",
            params![group_key],
            |row| {
                Ok(Group {
                    group_key: row.get(0)?,
                    group_name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }
}

/// Opens SQLite databases as `<root>/<server>/<database>.db`.
///
/// SQLite has no accounts, so the credentials only gate whether a
/// connection is attempted at all.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    root: PathBuf,
}

impl SqliteConnector {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn database_path(&self, settings: &Settings) -> Result<PathBuf> {
        let name = settings.database.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(Error::Config(format!(
                "invalid database name: {:?}",
                settings.database
            )));
        }

        let mut dir = self.root.clone();
        for component in Path::new(settings.server.trim()).components() {
            match component {
                Component::Normal(segment) => dir.push(segment),
                Component::CurDir => {}
                _ => {
                    return Err(Error::Config(format!(
                        "invalid server directory: {:?}",
                        settings.server
                    )));
                }
            }
        }
        if dir == self.root {
            return Err(Error::Config("server directory is required".to_string()));
        }

        Ok(dir.join(format!("{name}.db")))
    }
}

impl Connector for SqliteConnector {
    fn connect(&self, settings: &Settings) -> Result<Arc<dyn Store>> {
        let path = self.database_path(settings)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = SqliteStore::new(&path)?;
        store.initialize()?;
        Ok(Arc::new(store))
    }
}
