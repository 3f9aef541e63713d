// src/source/cache.rs
//
// Single-slot fetch cache: one table, the instant it was fetched, and a TTL.
// Not keyed by anything; the whole process shares whatever was fetched last.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::{RawTable, SheetSource, SourceError};
use crate::config::consts::CACHE_TTL_SECS;

#[derive(Clone, Debug)]
pub struct CachedTable {
    pub table: RawTable,
    /// Wall-clock time of the fetch, for the "last refresh" caption.
    pub loaded_at: DateTime<Local>,
    fetched: Instant,
}

pub struct FetchCache {
    source: Box<dyn SheetSource>,
    ttl: Duration,
    entry: Option<CachedTable>,
    fetches: usize,
}

impl FetchCache {
    pub fn new(source: Box<dyn SheetSource>) -> Self {
        Self::with_ttl(source, Duration::from_secs(CACHE_TTL_SECS))
    }

    pub fn with_ttl(source: Box<dyn SheetSource>, ttl: Duration) -> Self {
        Self { source, ttl, entry: None, fetches: 0 }
    }

    /// Cached table if still fresh, otherwise a new fetch.
    pub fn get(&mut self) -> Result<&CachedTable, SourceError> {
        self.get_at(Instant::now())
    }

    /// `get` against an explicit clock reading.
    pub fn get_at(&mut self, now: Instant) -> Result<&CachedTable, SourceError> {
        if self.is_fresh_at(now) {
            logd!("Fetch: cache hit ({})", self.source.describe());
        } else {
            if self.entry.is_some() {
                logf!("Fetch: cache expired, refetching {}", self.source.describe());
            }
            self.fetch_into(now)?;
        }
        self.entry
            .as_ref()
            .ok_or_else(|| SourceError::Malformed(s!("fetch cache is empty")))
    }

    /// Drop the cached table and fetch again, regardless of age.
    pub fn force_refresh(&mut self) -> Result<&CachedTable, SourceError> {
        logf!("Fetch: forced refresh of {}", self.source.describe());
        self.fetch_into(Instant::now())?;
        self.entry
            .as_ref()
            .ok_or_else(|| SourceError::Malformed(s!("fetch cache is empty")))
    }

    pub fn is_fresh_at(&self, now: Instant) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| now.saturating_duration_since(e.fetched) < self.ttl)
    }

    /// Number of remote round-trips so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    fn fetch_into(&mut self, now: Instant) -> Result<(), SourceError> {
        // A failed refetch leaves the old entry in place; it stays expired.
        self.fetches += 1;
        let table = self.source.fetch()?;
        self.entry = Some(CachedTable { table, loaded_at: Local::now(), fetched: now });
        Ok(())
    }
}
