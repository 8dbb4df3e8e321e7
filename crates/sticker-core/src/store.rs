//! In-memory store for uploaded images awaiting sticker generation.
//!
//! The store owns no clock: callers pass `now` to [`ImageStore::insert`] and
//! [`ImageStore::sweep_expired`], and decide when sweeping happens. Sharing a
//! store across threads means wrapping it in the caller's own lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// How long an upload is kept before a sweep may drop it.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub uploaded_at: Instant,
    /// Set once the generated sticker has been uploaded.
    pub sticker_url: Option<String>,
}

#[derive(Debug)]
pub struct ImageStore {
    images: HashMap<String, StoredImage>,
    ttl: Duration,
    next_id: u64,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            images: HashMap::new(),
            ttl,
            next_id: 0,
        }
    }

    /// Store an upload and return its id.
    pub fn insert(&mut self, bytes: Vec<u8>, mime_type: impl Into<String>, now: Instant) -> String {
        self.next_id += 1;
        let id = format!("img-{:016x}", self.next_id);

        debug!(id = %id, bytes = bytes.len(), "Stored upload");
        self.images.insert(
            id.clone(),
            StoredImage {
                id: id.clone(),
                bytes,
                mime_type: mime_type.into(),
                uploaded_at: now,
                sticker_url: None,
            },
        );

        id
    }

    pub fn get(&self, id: &str) -> Option<&StoredImage> {
        self.images.get(id)
    }

    /// Returns the removed entry, if there was one.
    pub fn remove(&mut self, id: &str) -> Option<StoredImage> {
        self.images.remove(id)
    }

    /// Record the generated sticker's URL. Returns false for unknown ids.
    pub fn attach_sticker_url(&mut self, id: &str, url: impl Into<String>) -> bool {
        match self.images.get_mut(id) {
            Some(image) => {
                image.sticker_url = Some(url.into());
                true
            }
            None => false,
        }
    }

    /// Drop every entry older than the TTL at `now`. Returns how many were
    /// removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let before = self.images.len();
        let ttl = self.ttl;
        self.images
            .retain(|_, image| now.saturating_duration_since(image.uploaded_at) <= ttl);

        let removed = before - self.images.len();
        if removed > 0 {
            debug!(removed, remaining = self.images.len(), "Swept expired uploads");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
