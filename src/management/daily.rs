//! Once-a-day gate for fortunes.
//!
//! The last fortune is persisted together with the local date it was drawn
//! on. While that date is today the cache is [`CacheState::Locked`] and
//! the stored fortune is reused; as soon as the local date moves on it is
//! [`CacheState::Eligible`] again. Rollover is detected by polling
//! ([`DailyFortuneCache::recheck`]), never by a countdown reaching zero.
//!
//! The gate is a UX throttle only. The server does not rate limit, and a
//! manual refresh may bypass the lock.

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    error::{ClientError, StoreError},
    management::FortuneStore,
    types::{Fortune, StoredFortuneRecord, TimeLeft},
    utils, warning,
};

/// Seconds between day-rollover checks while a fortune is locked in.
pub const RECHECK_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// A new fortune may be requested.
    Eligible,
    /// Today's fortune has been drawn and must be reused.
    Locked { fortune: Fortune },
}

impl CacheState {
    pub fn can_fetch_new_fortune(&self) -> bool {
        matches!(self, CacheState::Eligible)
    }

    pub fn fortune(&self) -> Option<&Fortune> {
        match self {
            CacheState::Eligible => None,
            CacheState::Locked { fortune } => Some(fortune),
        }
    }
}

/// What a recheck observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Unlocked,
    Locked,
}

/// Where a fortune handed out by [`DailyFortuneCache::obtain`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Obtained {
    Cached(Fortune),
    Fresh(Fortune),
}

impl Obtained {
    pub fn fortune(&self) -> &Fortune {
        match self {
            Obtained::Cached(f) | Obtained::Fresh(f) => f,
        }
    }
}

/// The remote side of a fortune round-trip.
pub trait FortuneSource {
    fn fetch(&self) -> impl Future<Output = Result<Fortune, ClientError>> + Send;
}

/// Parses a persisted value; anything that is not a complete record is `None`.
pub fn parse_record(raw: &str) -> Option<StoredFortuneRecord> {
    serde_json::from_str(raw).ok()
}

/// Decides the state for a stored record on the given local date.
pub fn evaluate(record: Option<StoredFortuneRecord>, today: NaiveDate) -> CacheState {
    match record {
        Some(r) if r.date == utils::date_string(today) => CacheState::Locked { fortune: r.fortune },
        _ => CacheState::Eligible,
    }
}

/// Display-only countdown to the next local midnight. `None` while eligible.
pub fn time_until_next_eligibility(state: &CacheState, now: NaiveDateTime) -> Option<TimeLeft> {
    match state {
        CacheState::Eligible => None,
        CacheState::Locked { .. } => Some(utils::time_until_midnight(now)),
    }
}

pub struct DailyFortuneCache<S: FortuneStore> {
    store: S,
    state: CacheState,
}

impl<S: FortuneStore> DailyFortuneCache<S> {
    /// Creates a cache in the [`CacheState::Eligible`] state. Call
    /// [`Self::load`] before using it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: CacheState::Eligible,
        }
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn can_fetch_new_fortune(&self) -> bool {
        self.state.can_fetch_new_fortune()
    }

    /// Reads the persisted record and derives the state for `today`.
    ///
    /// A value that does not parse is purged. Storage read errors are
    /// reported and treated as "nothing stored".
    pub async fn load(&mut self, today: NaiveDate) -> &CacheState {
        self.state = evaluate(self.read_record().await, today);
        &self.state
    }

    /// Re-evaluates the persisted record, as the periodic poll does.
    pub async fn recheck(&mut self, today: NaiveDate) -> Transition {
        let was_eligible = self.state.can_fetch_new_fortune();
        let eligible = self.load(today).await.can_fetch_new_fortune();

        match (was_eligible, eligible) {
            (false, true) => Transition::Unlocked,
            (true, false) => Transition::Locked,
            _ => Transition::Unchanged,
        }
    }

    /// Persists `fortune` as today's and locks the cache.
    ///
    /// The in-memory state is locked even when persisting fails, so the
    /// fortune is still shown for this session.
    pub async fn accept(&mut self, fortune: Fortune, today: NaiveDate) -> Result<(), StoreError> {
        let record = StoredFortuneRecord {
            fortune: fortune.clone(),
            date: utils::date_string(today),
        };
        self.state = CacheState::Locked { fortune };

        let raw = serde_json::to_string(&record)?;
        self.store.write(&raw).await
    }

    /// Forgets the stored fortune and becomes eligible.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        self.state = CacheState::Eligible;
        self.store.clear().await
    }

    /// Returns today's fortune, fetching a new one only when allowed.
    ///
    /// With `manual` set the lock is bypassed. On failure the previous state
    /// is kept, so the caller can simply retry.
    pub async fn obtain<F: FortuneSource>(
        &mut self,
        source: &F,
        today: NaiveDate,
        manual: bool,
    ) -> Result<Obtained, ClientError> {
        if !manual {
            if let CacheState::Locked { fortune } = self.load(today).await {
                return Ok(Obtained::Cached(fortune.clone()));
            }
        }

        let fortune = source.fetch().await?;
        if fortune.text.is_empty() {
            return Err(ClientError::Missing);
        }

        if let Err(e) = self.accept(fortune.clone(), today).await {
            warning!("Failed to store today's fortune: {}", e);
        }
        Ok(Obtained::Fresh(fortune))
    }

    async fn read_record(&self) -> Option<StoredFortuneRecord> {
        let raw = match self.store.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warning!("Failed to read stored fortune: {}", e);
                return None;
            }
        };

        let record = parse_record(&raw);
        if record.is_none() {
            warning!("Discarding unreadable stored fortune.");
            if let Err(e) = self.store.clear().await {
                warning!("Failed to discard stored fortune: {}", e);
            }
        }
        record
    }
}
