pub mod guard;
pub mod store;

pub use guard::{QuotaDecision, QuotaGuard, UsageReservation};
pub use store::QuotaStore;
