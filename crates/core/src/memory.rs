//! In-memory ObjectStore used by the engine tests
//!
//! Listing follows S3 delimiter rules: keys past the next delimiter collapse
//! into one common prefix, and prefixes count toward the page size.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::path::RemoteLocator;
use crate::traits::{CannedAcl, ListingPage, ObjectReader, ObjectStore};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub acl: CannedAcl,
}

enum Entry {
    Object(String),
    Prefix(String),
}

pub struct MemoryStore {
    page_size: usize,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    gets: Mutex<Vec<String>>,
    lists: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            objects: Mutex::new(BTreeMap::new()),
            gets: Mutex::new(Vec::new()),
            lists: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: None,
                acl: CannedAcl::Private,
            },
        );
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn listed_prefixes(&self) -> Vec<String> {
        self.lists.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(
        &self,
        location: &RemoteLocator,
        delimiter: &str,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        self.lists.lock().unwrap().push(location.key.clone());

        let prefix = location.key.as_str();
        let mut entries: Vec<Entry> = Vec::new();
        for key in self.objects.lock().unwrap().keys() {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            match rest.find(delimiter) {
                Some(pos) if !delimiter.is_empty() => {
                    let common = &key[..prefix.len() + pos + delimiter.len()];
                    let repeated = matches!(entries.last(), Some(Entry::Prefix(p)) if p == common);
                    if !repeated {
                        entries.push(Entry::Prefix(common.to_string()));
                    }
                }
                _ => entries.push(Entry::Object(key.clone())),
            }
        }

        let start: usize = match continuation_token {
            Some(token) => token
                .parse()
                .map_err(|_| Error::Network(format!("bad continuation token {token}")))?,
            None => 0,
        };
        let total = entries.len();
        let start = start.min(total);
        let end = (start + self.page_size).min(total);

        let mut page = ListingPage::default();
        for entry in entries.drain(start..end) {
            match entry {
                Entry::Object(key) => page.objects.push(key),
                Entry::Prefix(p) => page.common_prefixes.push(p),
            }
        }
        if end < total {
            page.next_continuation_token = Some(end.to_string());
        }
        Ok(page)
    }

    async fn get_object(&self, location: &RemoteLocator) -> Result<ObjectReader> {
        self.gets.lock().unwrap().push(location.key.clone());
        let object = self
            .object(&location.key)
            .ok_or_else(|| Error::NotFound(location.to_string()))?;
        Ok(Box::new(std::io::Cursor::new(object.data)))
    }

    async fn put_object(
        &self,
        location: &RemoteLocator,
        data: Vec<u8>,
        content_type: Option<String>,
        acl: CannedAcl,
    ) -> Result<()> {
        self.objects.lock().unwrap().insert(
            location.key.clone(),
            StoredObject {
                data,
                content_type,
                acl,
            },
        );
        Ok(())
    }
}
