mod schema;
mod sqlite;

pub use sqlite::{SqliteConnector, SqliteStore};

use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Multi-row mutations (`delete_user`, `add_user_groups`) run statement by
/// statement; a failure part-way leaves the earlier statements applied.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn list_users(&self, filter: &str, sort: UserSort, dir: SortDir) -> Result<Vec<User>>;
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn create_user(&self, email: &str) -> Result<i64>;
    fn update_user(&self, id: i64, email: &str) -> Result<()>;
    /// Removes the user's grants, then the user.
    fn delete_user(&self, id: i64) -> Result<()>;

    // Access operations
    fn list_user_access(&self, user_id: i64) -> Result<Vec<AccessGrant>>;
    fn access_exists(&self, user_id: i64, group_key: i64) -> Result<bool>;
    fn add_user_groups(&self, user_id: i64, group_keys: &[i64]) -> Result<()>;
    fn remove_access(&self, access_id: i64) -> Result<()>;

    // Group operations
    /// Matches `level2_name` first and falls back to `level3_name` only when
    /// that finds nothing. An empty term matches nothing.
    fn search_groups(&self, term: &str) -> Result<Vec<SearchResult>>;
    fn get_group(&self, group_key: i64) -> Result<Option<Group>>;
}

/// Opens a [`Store`] for the given connection settings.
pub trait Connector: Send + Sync {
    fn connect(&self, settings: &Settings) -> Result<Arc<dyn Store>>;
}
