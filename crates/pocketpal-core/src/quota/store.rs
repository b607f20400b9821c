//! QuotaStore trait definition.
//!
//! The store owns the per-identity daily counters and the atomicity of the
//! reserve/release pair. Keeping both operations on the store (rather than
//! a bare get/set) closes the check-then-act race: `reserve` must check the
//! limit and increment in one atomic step, so the daily cap holds even when
//! requests for the same identity are in flight concurrently.
//!
//! Implementations live in pocketpal-infra (e.g., `MemoryQuotaStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use chrono::NaiveDate;

use pocketpal_types::error::QuotaError;

/// Store of per-identity daily usage counters.
///
/// Day rollover is lazy: every operation carries the caller's notion of
/// "today", and a record stored under an older day reads as zero usage.
pub trait QuotaStore: Send + Sync {
    /// Usage recorded for `identity_id` on `day`. Stale records read as zero.
    fn usage(
        &self,
        identity_id: &str,
        day: NaiveDate,
    ) -> impl std::future::Future<Output = Result<u32, QuotaError>> + Send;

    /// Atomically reserve one usage slot for `identity_id` on `day`.
    ///
    /// Returns `false` without incrementing when the count has already
    /// reached `limit`. Initializes or rolls over the record as needed.
    fn reserve(
        &self,
        identity_id: &str,
        day: NaiveDate,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<bool, QuotaError>> + Send;

    /// Roll back one previously reserved slot for `identity_id` on `day`.
    ///
    /// A no-op when the record is absent, already at zero, or has rolled
    /// over to a newer day since the reservation.
    fn release(
        &self,
        identity_id: &str,
        day: NaiveDate,
    ) -> impl std::future::Future<Output = Result<(), QuotaError>> + Send;
}
