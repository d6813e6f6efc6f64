//! Cache domain - key derivation and the cache contracts

pub mod key;
mod repository;

pub use key::{derive_key, CacheKeyDeriver};
pub use repository::{ConfigCache, ExternalCache};

#[cfg(test)]
pub use repository::MockExternalCache;
