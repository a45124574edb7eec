//! Repository port for sheet storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sheetkeep_domain::{CharacterId, SheetData};

use super::error::RepoError;

// =============================================================================
// Sheet Storage
// =============================================================================

/// A stored sheet and its owning character.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub character_id: CharacterId,
    pub name: String,
    pub sheet: SheetData,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<SheetRecord>, RepoError>;
    async fn save(&self, record: &SheetRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<SheetRecord>, RepoError>;
}
