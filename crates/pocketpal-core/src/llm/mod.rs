pub mod provider;

pub use provider::CompletionProvider;
