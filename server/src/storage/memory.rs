//! In-memory event and template store.
//!
//! Records live in concurrent maps. When a data file is configured, the
//! whole store is written to it as a [`BoardSnapshot`] on every flush and
//! read back on startup.

use std::path::{Path, PathBuf};

use cronos_engine::{collate, BoardSnapshot, Event, EventId, Template};
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::StorageError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Store for one user's events and templates.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: DashMap<EventId, Event>,
    templates: DashMap<String, Template>,
    data_file: Option<PathBuf>,
    /// Serializes writes to the data file
    flush_lock: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty store that is never written to disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store, loading the data file if it exists.
    pub async fn open(data_file: Option<PathBuf>) -> Result<Self> {
        let mut store = Self::new();

        if let Some(path) = &data_file {
            if tokio::fs::try_exists(path).await? {
                let json = tokio::fs::read_to_string(path).await?;
                let snapshot = BoardSnapshot::from_json(&json)?;
                tracing::info!(
                    path = %path.display(),
                    events = snapshot.events.len(),
                    templates = snapshot.templates.len(),
                    "Loaded data file"
                );
                store.load(snapshot);
            }
        }

        store.data_file = data_file;
        Ok(store)
    }

    fn load(&mut self, snapshot: BoardSnapshot) {
        for event in snapshot.events {
            let event = with_event_id(event);
            self.events.insert(event.id.clone(), event);
        }
        for template in snapshot.templates {
            let template = with_template_id(template);
            self.templates.insert(template.id.clone(), template);
        }
    }

    /// List all events.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.iter().map(|e| e.value().clone()).collect();
        events.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.rank.cmp(&b.rank))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(events)
    }

    /// Insert or replace an event, assigning an id on first write.
    pub async fn upsert_event(&self, event: Event) -> Result<Event> {
        let event = with_event_id(event);
        self.events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    /// Delete an event. Returns false if it did not exist.
    pub async fn delete_event(&self, id: &EventId) -> Result<bool> {
        Ok(self.events.remove(id).is_some())
    }

    /// List all templates, ordered by collated title.
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let mut templates: Vec<Template> =
            self.templates.iter().map(|t| t.value().clone()).collect();
        templates.sort_by(|a, b| collate(&a.title, &b.title).then_with(|| a.id.cmp(&b.id)));
        Ok(templates)
    }

    /// Get a template by ID.
    pub async fn get_template(&self, id: &str) -> Result<Option<Template>> {
        Ok(self.templates.get(id).map(|t| t.value().clone()))
    }

    /// Insert or replace a template, assigning an id on first write.
    pub async fn save_template(&self, template: Template) -> Result<Template> {
        let template = with_template_id(template);
        self.templates
            .insert(template.id.clone(), template.clone());
        Ok(template)
    }

    /// Delete a template. Returns false if it did not exist.
    pub async fn delete_template(&self, id: &str) -> Result<bool> {
        Ok(self.templates.remove(id).is_some())
    }

    /// Create the default templates if the store has none.
    ///
    /// Returns the templates that were created.
    pub async fn seed_templates(&self) -> Result<Vec<Template>> {
        if !self.templates.is_empty() {
            return Ok(Vec::new());
        }

        let mut created = Vec::new();
        for template in Template::default_seeds() {
            created.push(self.save_template(template).await?);
        }
        tracing::info!(count = created.len(), "Seeded default templates");
        Ok(created)
    }

    /// Current contents as a snapshot.
    pub async fn snapshot(&self) -> Result<BoardSnapshot> {
        Ok(BoardSnapshot::new(
            self.list_events().await?,
            self.list_templates().await?,
        ))
    }

    /// Write the data file, if one is configured.
    pub async fn flush(&self) -> Result<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        let _guard = self.flush_lock.lock().await;
        let json = self.snapshot().await?.to_json_pretty()?;
        write_atomically(path, &json).await?;
        tracing::debug!(path = %path.display(), "Flushed store");
        Ok(())
    }
}

async fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn with_event_id(mut event: Event) -> Event {
    if !event.is_persisted() {
        event.id = EventId::new(new_id());
    }
    event
}

fn with_template_id(mut template: Template) -> Template {
    if template.id.is_empty() {
        template.id = new_id();
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronos_engine::EventKind;

    #[tokio::test]
    async fn upsert_assigns_id_once() {
        let store = MemoryStore::new();

        let saved = store
            .upsert_event(Event::new("", "2024-05-01", EventKind::Due, "Card"))
            .await
            .unwrap();
        assert!(saved.is_persisted());

        let again = store.upsert_event(saved.clone().with_rank(1)).await.unwrap();
        assert_eq!(again.id, saved.id);
        assert_eq!(store.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_event() {
        let store = MemoryStore::new();
        let saved = store
            .upsert_event(Event::new("evt-1", "2024-05-01", EventKind::Due, "Card"))
            .await
            .unwrap();

        assert!(store.delete_event(&saved.id).await.unwrap());
        assert!(!store.delete_event(&saved.id).await.unwrap());
    }

    #[tokio::test]
    async fn seeds_only_when_empty() {
        let store = MemoryStore::new();

        let seeded = store.seed_templates().await.unwrap();
        assert_eq!(seeded.len(), 3);
        assert!(seeded.iter().all(|t| !t.id.is_empty()));

        assert!(store.seed_templates().await.unwrap().is_empty());
        assert_eq!(store.list_templates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn templates_sort_by_collated_title() {
        let store = MemoryStore::new();
        for title in ["Zebra", "Água", "banco"] {
            store
                .save_template(Template::new("", EventKind::Push, title, ""))
                .await
                .unwrap();
        }

        let titles: Vec<String> = store
            .list_templates()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Água", "banco", "Zebra"]);
    }

    #[tokio::test]
    async fn delete_template() {
        let store = MemoryStore::new();
        let saved = store
            .save_template(Template::new("", EventKind::Due, "Vencimento", ""))
            .await
            .unwrap();

        assert!(store.delete_template(&saved.id).await.unwrap());
        assert!(!store.delete_template(&saved.id).await.unwrap());
        assert!(store.get_template(&saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn data_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");

        let store = MemoryStore::open(Some(path.clone())).await.unwrap();
        store
            .upsert_event(Event::new("evt-1", "2024-05-01", EventKind::Push, "Promo").with_rank(0))
            .await
            .unwrap();
        store.seed_templates().await.unwrap();
        store.flush().await.unwrap();

        let reopened = MemoryStore::open(Some(path)).await.unwrap();
        assert_eq!(
            reopened.list_events().await.unwrap(),
            store.list_events().await.unwrap()
        );
        assert_eq!(reopened.list_templates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_data_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::open(Some(dir.path().join("absent.json")))
            .await
            .unwrap();
        assert!(store.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_data_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = MemoryStore::open(Some(path)).await;
        assert!(matches!(result, Err(StorageError::Snapshot(_))));
    }
}
