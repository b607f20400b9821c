//! Quota guard enforcing the per-identity daily ceiling.
//!
//! Wraps a [`QuotaStore`] with the configured limit and the UTC "today".
//! Follows a reserve-then-confirm pattern: the orchestrator reserves a slot
//! immediately before invoking the provider and releases it if the provider
//! fails, so only successful completions consume quota.

use chrono::{NaiveDate, Utc};

use pocketpal_types::error::QuotaError;

use crate::quota::store::QuotaStore;

/// Outcome of a reservation attempt.
#[derive(Debug)]
pub enum QuotaDecision {
    /// A slot was reserved (or the caller is unidentified and unthrottled).
    Allowed(UsageReservation),
    /// The identity has reached today's limit.
    Limited,
}

/// A reserved usage slot, pinned to the day it was taken on so a rollback
/// after midnight does not touch the new day's count.
#[derive(Debug)]
pub struct UsageReservation {
    identity_id: Option<String>,
    day: NaiveDate,
}

/// Enforces the daily usage ceiling per identity.
pub struct QuotaGuard<S: QuotaStore> {
    store: S,
    daily_limit: u32,
}

impl<S: QuotaStore> QuotaGuard<S> {
    pub fn new(store: S, daily_limit: u32) -> Self {
        Self { store, daily_limit }
    }

    /// Try to reserve one usage slot for today.
    ///
    /// Unidentified callers are unthrottled by design: they always receive
    /// an `Allowed` decision with an empty reservation, and nothing is
    /// tracked for them.
    pub async fn try_reserve(
        &self,
        identity_id: Option<&str>,
    ) -> Result<QuotaDecision, QuotaError> {
        let day = Utc::now().date_naive();
        let Some(identity_id) = identity_id else {
            return Ok(QuotaDecision::Allowed(UsageReservation {
                identity_id: None,
                day,
            }));
        };

        if self.store.reserve(identity_id, day, self.daily_limit).await? {
            Ok(QuotaDecision::Allowed(UsageReservation {
                identity_id: Some(identity_id.to_string()),
                day,
            }))
        } else {
            Ok(QuotaDecision::Limited)
        }
    }

    /// Roll back a reservation after a failed completion.
    pub async fn release(&self, reservation: &UsageReservation) -> Result<(), QuotaError> {
        match &reservation.identity_id {
            Some(identity_id) => self.store.release(identity_id, reservation.day).await,
            None => Ok(()),
        }
    }

    /// Usage recorded for an identity today.
    pub async fn usage_today(&self, identity_id: &str) -> Result<u32, QuotaError> {
        self.store.usage(identity_id, Utc::now().date_naive()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal single-lock store for guard tests; the production dashmap
    /// store lives in pocketpal-infra.
    #[derive(Default)]
    struct TestStore {
        records: Mutex<HashMap<String, (NaiveDate, u32)>>,
    }

    impl QuotaStore for TestStore {
        async fn usage(&self, identity_id: &str, day: NaiveDate) -> Result<u32, QuotaError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(identity_id)
                .map(|(d, count)| if *d == day { *count } else { 0 })
                .unwrap_or(0))
        }

        async fn reserve(
            &self,
            identity_id: &str,
            day: NaiveDate,
            limit: u32,
        ) -> Result<bool, QuotaError> {
            let mut records = self.records.lock().unwrap();
            let entry = records.entry(identity_id.to_string()).or_insert((day, 0));
            if entry.0 != day {
                *entry = (day, 0);
            }
            if entry.1 >= limit {
                return Ok(false);
            }
            entry.1 += 1;
            Ok(true)
        }

        async fn release(&self, identity_id: &str, day: NaiveDate) -> Result<(), QuotaError> {
            let mut records = self.records.lock().unwrap();
            if let Some(entry) = records.get_mut(identity_id) {
                if entry.0 == day && entry.1 > 0 {
                    entry.1 -= 1;
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reserve_until_limit_then_blocked() {
        let guard = QuotaGuard::new(TestStore::default(), 3);
        for _ in 0..3 {
            assert!(matches!(
                guard.try_reserve(Some("child-1")).await.unwrap(),
                QuotaDecision::Allowed(_)
            ));
        }
        assert!(matches!(
            guard.try_reserve(Some("child-1")).await.unwrap(),
            QuotaDecision::Limited
        ));
        assert_eq!(guard.usage_today("child-1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unidentified_callers_never_blocked() {
        let guard = QuotaGuard::new(TestStore::default(), 1);
        for _ in 0..10 {
            assert!(matches!(
                guard.try_reserve(None).await.unwrap(),
                QuotaDecision::Allowed(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_release_frees_a_slot() {
        let guard = QuotaGuard::new(TestStore::default(), 1);
        let QuotaDecision::Allowed(reservation) =
            guard.try_reserve(Some("child-1")).await.unwrap()
        else {
            panic!("first reservation should be allowed");
        };
        assert!(matches!(
            guard.try_reserve(Some("child-1")).await.unwrap(),
            QuotaDecision::Limited
        ));

        guard.release(&reservation).await.unwrap();
        assert!(matches!(
            guard.try_reserve(Some("child-1")).await.unwrap(),
            QuotaDecision::Allowed(_)
        ));
    }

    #[tokio::test]
    async fn test_identities_tracked_independently() {
        let guard = QuotaGuard::new(TestStore::default(), 1);
        assert!(matches!(
            guard.try_reserve(Some("child-1")).await.unwrap(),
            QuotaDecision::Allowed(_)
        ));
        assert!(matches!(
            guard.try_reserve(Some("child-2")).await.unwrap(),
            QuotaDecision::Allowed(_)
        ));
        assert!(matches!(
            guard.try_reserve(Some("child-1")).await.unwrap(),
            QuotaDecision::Limited
        ));
    }
}
