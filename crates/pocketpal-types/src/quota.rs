//! Per-identity daily usage records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily usage counter for one identity.
///
/// At most one record exists per identity. Records are created lazily on
/// first use and never deleted; a stale `day` is detected at read time and
/// treated as zero usage (lazy rollover, no background expiry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaRecord {
    pub identity_id: String,
    /// UTC calendar day the count applies to.
    pub day: NaiveDate,
    pub count: u32,
}

impl QuotaRecord {
    /// Usage as observed on `day`: the stored count when the record is
    /// current, zero when it is stale.
    pub fn usage_on(&self, day: NaiveDate) -> u32 {
        if self.day == day { self.count } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: NaiveDate, count: u32) -> QuotaRecord {
        QuotaRecord {
            identity_id: "child-1".to_string(),
            day,
            count,
        }
    }

    #[test]
    fn test_usage_on_current_day() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(record(day, 7).usage_on(day), 7);
    }

    #[test]
    fn test_usage_on_stale_day_reads_zero() {
        let yesterday = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(record(yesterday, 25).usage_on(today), 0);
    }
}
