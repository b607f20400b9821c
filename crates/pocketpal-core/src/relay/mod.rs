pub mod service;

pub use service::RelayService;
