//! Archive of generated summaries
//!
//! The archive is an ordered list of [`MeetingSummary`] records mirrored to
//! local storage as one JSON array. Every mutation rewrites the stored array
//! in full.

use crate::error::{Result, SummarizerError};
use crate::storage::{LocalStore, ARCHIVE_KEY};
use crate::summary::MeetingSummary;
use std::sync::Arc;

/// Persistent, insertion-ordered summary archive
pub struct ArchiveStore {
    store: Arc<dyn LocalStore>,
    summaries: Vec<MeetingSummary>,
}

impl ArchiveStore {
    /// Load the archive from `store`
    ///
    /// A stored value that does not parse is logged and treated as an empty
    /// archive.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be read
    pub fn load(store: Arc<dyn LocalStore>) -> Result<Self> {
        let summaries = match store.get(ARCHIVE_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<MeetingSummary>>(&raw) {
                Ok(summaries) => summaries,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable summary archive: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!("Loaded {} archived summaries", summaries.len());
        Ok(Self { store, summaries })
    }

    /// Write `next` to storage, then make it the in-memory list
    fn commit(&mut self, next: Vec<MeetingSummary>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.store.set(ARCHIVE_KEY, &json)?;
        self.summaries = next;
        Ok(())
    }

    /// Append a summary and persist
    ///
    /// # Errors
    ///
    /// Returns error if the archive cannot be written; the archive is then
    /// unchanged
    pub fn append(&mut self, summary: MeetingSummary) -> Result<()> {
        tracing::info!("Archiving summary {} ({})", summary.id, summary.title);
        let mut next = self.summaries.clone();
        next.push(summary);
        self.commit(next)
    }

    /// Remove the summary with `id` and persist
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::NotFound`] if no summary has `id`, or a
    /// storage error if the archive cannot be written
    pub fn remove(&mut self, id: i64) -> Result<MeetingSummary> {
        let index = self
            .summaries
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", id)))?;

        let mut next = self.summaries.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::info!("Deleted summary {}", id);
        Ok(removed)
    }

    /// Flip the completion flag of one action item and persist
    ///
    /// Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::NotFound`] if the summary or item does not
    /// exist
    pub fn toggle_action_item(&mut self, summary_id: i64, item_id: u32) -> Result<MeetingSummary> {
        let index = self
            .summaries
            .iter()
            .position(|s| s.id == summary_id)
            .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", summary_id)))?;

        let updated = self.summaries[index]
            .with_item_toggled(item_id)
            .ok_or_else(|| {
                SummarizerError::NotFound(format!(
                    "action item {} in summary {}",
                    item_id, summary_id
                ))
            })?;

        let mut next = self.summaries.clone();
        next[index] = updated.clone();
        self.commit(next)?;
        Ok(updated)
    }

    /// Look up a summary by ID
    pub fn get(&self, id: i64) -> Option<&MeetingSummary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    /// All summaries in insertion order
    pub fn list(&self) -> &[MeetingSummary] {
        &self.summaries
    }

    /// Number of archived summaries
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// True when nothing is archived
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// IDs of all archived summaries
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.summaries.iter().map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use crate::summary::ActionItem;
    use crate::test_utils::ReadOnlyStore;
    use tempfile::TempDir;

    fn summary(id: i64) -> MeetingSummary {
        MeetingSummary {
            id,
            title: format!("Meeting {}", id),
            date: "1/5/2024".to_string(),
            duration: "Unknown".to_string(),
            summary: String::new(),
            action_items: vec![ActionItem {
                id: 1,
                task: "Follow up".to_string(),
                assignee: "Unassigned".to_string(),
                due_date: None,
                completed: false,
            }],
            participants: vec![],
            decisions: vec![],
            raw_transcript: "text".to_string(),
        }
    }

    fn store() -> (Arc<dyn LocalStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new_with_path(dir.path().join("storage.db")).unwrap();
        (Arc::new(storage), dir)
    }

    #[test]
    fn test_append_and_reload() {
        let (store, _dir) = store();
        let mut archive = ArchiveStore::load(store.clone()).unwrap();
        archive.append(summary(1)).unwrap();
        archive.append(summary(2)).unwrap();

        let reloaded = ArchiveStore::load(store).unwrap();
        assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(reloaded.get(2), Some(&summary(2)));
    }

    #[test]
    fn test_remove() {
        let (store, _dir) = store();
        let mut archive = ArchiveStore::load(store.clone()).unwrap();
        archive.append(summary(1)).unwrap();
        archive.append(summary(2)).unwrap();

        let removed = archive.remove(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(archive.get(1).is_none());
        assert!(archive.remove(1).is_err());

        let reloaded = ArchiveStore::load(store).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_toggle_persists() {
        let (store, _dir) = store();
        let mut archive = ArchiveStore::load(store.clone()).unwrap();
        archive.append(summary(1)).unwrap();

        let updated = archive.toggle_action_item(1, 1).unwrap();
        assert!(updated.action_items[0].completed);

        let reloaded = ArchiveStore::load(store).unwrap();
        assert!(reloaded.get(1).unwrap().action_items[0].completed);
    }

    #[test]
    fn test_toggle_unknown_item() {
        let (store, _dir) = store();
        let mut archive = ArchiveStore::load(store).unwrap();
        archive.append(summary(1)).unwrap();
        assert!(archive.toggle_action_item(1, 9).is_err());
        assert!(archive.toggle_action_item(9, 1).is_err());
    }

    #[test]
    fn test_failed_write_leaves_archive_unchanged() {
        let mut archive = ArchiveStore::load(Arc::new(ReadOnlyStore)).unwrap();
        assert!(archive.append(summary(1)).is_err());
        assert!(archive.is_empty());

        // Seed memory directly, then check remove and toggle roll back too
        archive.summaries.push(summary(2));
        assert!(archive.remove(2).is_err());
        assert_eq!(archive.len(), 1);
        assert!(archive.toggle_action_item(2, 1).is_err());
        assert!(!archive.get(2).unwrap().action_items[0].completed);
    }

    #[test]
    fn test_corrupt_archive_starts_empty() {
        let (store, _dir) = store();
        store.set(ARCHIVE_KEY, "{not json").unwrap();
        let archive = ArchiveStore::load(store).unwrap();
        assert!(archive.is_empty());
    }
}
