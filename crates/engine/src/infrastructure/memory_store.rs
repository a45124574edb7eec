//! In-memory sheet storage.

use std::collections::HashMap;

use async_trait::async_trait;
use sheetkeep_domain::CharacterId;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{RepoError, SheetRecord, SheetRepo};

/// Sheet records keyed by owning character, held for the process lifetime.
#[derive(Default)]
pub struct InMemorySheetRepo {
    records: RwLock<HashMap<CharacterId, SheetRecord>>,
}

impl InMemorySheetRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SheetRepo for InMemorySheetRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<SheetRecord>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, record: &SheetRecord) -> Result<(), RepoError> {
        self.records
            .write()
            .await
            .insert(record.character_id, record.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("CharacterSheet", id))
    }

    async fn list(&self) -> Result<Vec<SheetRecord>, RepoError> {
        let mut records: Vec<SheetRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
        Ok(records)
    }
}
