//! Durable store of reusable client booking details.
//!
//! Profiles live in one JSON array under a fixed, namespaced file name.
//! The client name is the key: saving an existing name overwrites the
//! record, last writer wins. There is no delete operation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::error;

pub static PROFILES_FILE_NAME: &str = "dj_success_kit_profiles.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientProfile {
    pub client_name: String,
    pub dj_name: String,
    pub event_date: String,
    pub venue: String,
    pub total_cost: String,
    pub deposit_amount: String,
    pub deposit_due_date: String,
    pub payment_methods: String,
    pub event_start_time: String,
    pub event_end_time: String,
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(PROFILES_FILE_NAME) }
    }

    /// All saved profiles. A missing file is an empty store; a corrupt
    /// file is logged and treated as empty, matching the tolerant reads
    /// the rest of the app expects.
    pub fn load(&self) -> Vec<ClientProfile> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Vec::new();
            }
            Err(e) => {
                error!(task = "load profiles", error = e.to_string());
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(profiles) => profiles,
            Err(e) => {
                error!(task = "parse profiles", error = e.to_string());
                Vec::new()
            }
        }
    }

    /// Upsert by client name and persist. Returns the full list after
    /// the write.
    pub fn save(
        &self,
        profile: ClientProfile,
    ) -> anyhow::Result<Vec<ClientProfile>> {
        let mut profiles = self.load();

        match profiles
            .iter_mut()
            .find(|p| p.client_name == profile.client_name)
        {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }

        self.write_all(&profiles)?;

        Ok(profiles)
    }

    fn write_all(&self, profiles: &[ClientProfile]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(profiles)
            .context("failed to serialize profiles")?;

        // Write-then-rename keeps the store intact if the write dies.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("failed to write profiles")?;
        fs::rename(&tmp, &self.path).context("failed to replace profiles")?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn profile(name: &str, venue: &str) -> ClientProfile {
        ClientProfile {
            client_name: name.to_string(),
            venue: venue.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();

        let store = ProfileStore::new(dir.path());

        assert!(store.load().is_empty());
    }

    #[test]
    fn saved_profile_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        let alice = profile("Alice", "The Grand Hall");

        store.save(alice.clone()).unwrap();

        assert_eq!(store.load(), vec![alice]);
    }

    #[test]
    fn saving_the_same_name_overwrites_instead_of_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        store.save(profile("Alice", "The Grand Hall")).unwrap();
        store.save(profile("Bob", "Pier 9")).unwrap();
        let profiles = store.save(profile("Alice", "Sunset Terrace")).unwrap();

        assert_eq!(profiles.len(), 2);
        let alice = profiles
            .iter()
            .find(|p| p.client_name == "Alice")
            .unwrap();
        assert_eq!(alice.venue, "Sunset Terrace");
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        fs::write(dir.path().join(PROFILES_FILE_NAME), "not json").unwrap();

        assert!(store.load().is_empty());

        // And the store recovers on the next save.
        store.save(profile("Alice", "The Grand Hall")).unwrap();
        assert_eq!(store.load().len(), 1);
    }
}
