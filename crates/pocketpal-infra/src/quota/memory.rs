//! In-memory quota store backed by a concurrent map.
//!
//! Single-process state only: counters are not persisted across restarts
//! and not shared across instances (each horizontally scaled replica
//! counts independently). Records are created lazily and never deleted,
//! so the map grows with the number of distinct identities seen over the
//! process lifetime.
//!
//! Atomicity: `reserve` performs its limit check and increment under the
//! dashmap entry lock, so concurrent requests for the same identity cannot
//! both claim the last slot.

use chrono::NaiveDate;
use dashmap::DashMap;

use pocketpal_core::quota::store::QuotaStore;
use pocketpal_types::error::QuotaError;
use pocketpal_types::quota::QuotaRecord;

/// Dashmap-backed [`QuotaStore`] implementation.
#[derive(Default)]
pub struct MemoryQuotaStore {
    records: DashMap<String, QuotaRecord>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities tracked (test and diagnostics helper).
    pub fn tracked_identities(&self) -> usize {
        self.records.len()
    }
}

impl QuotaStore for MemoryQuotaStore {
    async fn usage(&self, identity_id: &str, day: NaiveDate) -> Result<u32, QuotaError> {
        Ok(self
            .records
            .get(identity_id)
            .map(|record| record.usage_on(day))
            .unwrap_or(0))
    }

    async fn reserve(
        &self,
        identity_id: &str,
        day: NaiveDate,
        limit: u32,
    ) -> Result<bool, QuotaError> {
        let mut record = self
            .records
            .entry(identity_id.to_string())
            .or_insert_with(|| QuotaRecord {
                identity_id: identity_id.to_string(),
                day,
                count: 0,
            });

        // Lazy rollover: a stale record restarts at zero for the new day.
        if record.day != day {
            record.day = day;
            record.count = 0;
        }

        if record.count >= limit {
            return Ok(false);
        }
        record.count += 1;
        Ok(true)
    }

    async fn release(&self, identity_id: &str, day: NaiveDate) -> Result<(), QuotaError> {
        if let Some(mut record) = self.records.get_mut(identity_id) {
            if record.day == day && record.count > 0 {
                record.count -= 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[tokio::test]
    async fn test_reserve_counts_up_to_limit() {
        let store = MemoryQuotaStore::new();
        for expected in 1..=25u32 {
            assert!(store.reserve("child-1", day(26), 25).await.unwrap());
            assert_eq!(store.usage("child-1", day(26)).await.unwrap(), expected);
        }
        assert!(!store.reserve("child-1", day(26), 25).await.unwrap());
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_lazy_rollover_resets_stale_record() {
        let store = MemoryQuotaStore::new();
        for _ in 0..25 {
            assert!(store.reserve("child-1", day(25), 25).await.unwrap());
        }
        assert!(!store.reserve("child-1", day(25), 25).await.unwrap());

        // Yesterday's exhausted record reads as zero today and allows a
        // fresh reservation.
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 0);
        assert!(store.reserve("child-1", day(26), 25).await.unwrap());
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_release_rolls_back_one_slot() {
        let store = MemoryQuotaStore::new();
        assert!(store.reserve("child-1", day(26), 25).await.unwrap());
        store.release("child-1", day(26)).await.unwrap();
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_release_is_noop_on_empty_or_stale_records() {
        let store = MemoryQuotaStore::new();
        // Unknown identity.
        store.release("ghost", day(26)).await.unwrap();
        assert_eq!(store.usage("ghost", day(26)).await.unwrap(), 0);

        // Reservation taken yesterday, released after rollover: the new
        // day's count must stay untouched.
        assert!(store.reserve("child-1", day(25), 25).await.unwrap());
        assert!(store.reserve("child-1", day(26), 25).await.unwrap());
        store.release("child-1", day(25)).await.unwrap();
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reserves_never_exceed_limit() {
        let store = Arc::new(MemoryQuotaStore::new());
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..100 {
            let store = Arc::clone(&store);
            tasks.spawn(async move { store.reserve("child-1", day(26), 25).await.unwrap() });
        }

        let mut granted = 0;
        while let Some(result) = tasks.join_next().await {
            if result.unwrap() {
                granted += 1;
            }
        }
        assert_eq!(granted, 25);
        assert_eq!(store.usage("child-1", day(26)).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let store = MemoryQuotaStore::new();
        assert!(store.reserve("child-1", day(26), 1).await.unwrap());
        assert!(!store.reserve("child-1", day(26), 1).await.unwrap());
        assert!(store.reserve("child-2", day(26), 1).await.unwrap());
        assert_eq!(store.tracked_identities(), 2);
    }
}
