use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Reporting group. Groups are maintained upstream and never written here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "groupBkey")]
    pub group_key: i64,
    #[serde(rename = "groupName")]
    pub group_name: String,
}

/// A user's access to one reporting group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    #[serde(rename = "id")]
    pub access_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "groupBkey")]
    pub group_key: i64,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "creationDate")]
    pub created_at: DateTime<Utc>,
}

/// Group attribute a search term matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchColumn {
    #[serde(rename = "level2name")]
    Level2,
    #[serde(rename = "level3name")]
    Level3,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "groupBkey")]
    pub group_key: i64,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "matchedOn")]
    pub matched_on: SearchColumn,
}

/// Allowed sort columns for the user list. Anything else sorts by email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    Id,
    #[default]
    Email,
}

impl UserSort {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "id" => Self::Id,
            _ => Self::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }
}
