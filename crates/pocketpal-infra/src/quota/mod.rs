pub mod memory;

pub use memory::MemoryQuotaStore;
