//! Persistence collaborator
//!
//! Receives the full snapshot on save. Only a logging stub exists; a real
//! backend must accept the whole snapshot and report success or failure.

use serde::Serialize;

use crate::error::PersistError;
use crate::models::PreferencesSnapshot;

pub trait Persistence {
    fn persist(&mut self, snapshot: &PreferencesSnapshot) -> Result<(), PersistError>;
}

#[derive(Serialize)]
struct SaveRecord<'a> {
    saved_at: String,
    #[serde(flatten)]
    snapshot: &'a PreferencesSnapshot,
}

/// Logs the payload and reports success
#[derive(Debug, Default, Clone)]
pub struct LogPersistence {
    saves: u64,
}

impl LogPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots accepted since startup
    pub fn saves(&self) -> u64 {
        self.saves
    }
}

impl Persistence for LogPersistence {
    fn persist(&mut self, snapshot: &PreferencesSnapshot) -> Result<(), PersistError> {
        let record = SaveRecord {
            saved_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            snapshot,
        };
        let payload = serde_json::to_string(&record)?;
        tracing::info!(payload = %payload, "Saving meal preferences");
        self.saves += 1;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_persistence_counts_saves() {
        let mut persistence = LogPersistence::new();
        persistence.persist(&PreferencesSnapshot::default()).unwrap();
        persistence.persist(&PreferencesSnapshot::default()).unwrap();
        assert_eq!(persistence.saves(), 2);
    }
}
