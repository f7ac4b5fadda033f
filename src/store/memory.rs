use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{CandidateStore, Item, ScanPage, StorageError};
use crate::candidate::CandidateRecord;

#[derive(Default)]
pub struct MemoryCandidateStore {
    items: Mutex<BTreeMap<String, Item>>,
    writes: AtomicUsize,
    scans: AtomicUsize,
    failing: AtomicBool,
    /// Items per scan page; zero means the whole table fits in one page.
    page_size: usize,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose scans stop after `page_size` items and report where to resume.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Makes every following call fail with a backend error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("poisoned mutex").len()
    }

    pub fn insert_raw(&self, item: Item) {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .expect("raw item needs a string id")
            .to_string();
        self.items.lock().expect("poisoned mutex").insert(id, item);
    }

    fn check(&self, operation: &'static str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::backend(operation, "injected failure"));
        }
        Ok(())
    }
}

impl CandidateStore for MemoryCandidateStore {
    async fn put(&self, record: &CandidateRecord) -> Result<(), StorageError> {
        self.check("PutItem")?;
        let item = match serde_json::to_value(record) {
            Ok(Value::Object(item)) => item,
            Ok(_) => return Err(StorageError::Decode("record is not an object".into())),
            Err(err) => return Err(StorageError::Decode(err.to_string())),
        };

        self.items
            .lock()
            .expect("poisoned mutex")
            .insert(record.id.clone(), item);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, StorageError> {
        self.check("GetItem")?;
        Ok(self.items.lock().expect("poisoned mutex").get(id).cloned())
    }

    async fn scan(&self, projection: &[&str]) -> Result<ScanPage, StorageError> {
        self.check("Scan")?;
        self.scans.fetch_add(1, Ordering::SeqCst);

        let stored = self.items.lock().expect("poisoned mutex");
        let limit = if self.page_size == 0 {
            stored.len()
        } else {
            self.page_size
        };
        let continuation = (stored.len() > limit)
            .then(|| stored.keys().nth(limit - 1))
            .flatten()
            .map(|last_id| Item::from_iter([("id".to_string(), Value::from(last_id.clone()))]));

        let items = stored
            .values()
            .take(limit)
            .map(|item| {
                item.iter()
                    .filter(|(name, _)| projection.contains(&name.as_str()))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .collect();

        Ok(ScanPage {
            items,
            continuation,
        })
    }
}
