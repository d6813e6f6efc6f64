//! External cache implementations

mod moka;
mod redis;

pub use self::moka::{InMemoryExternalCache, InMemoryExternalCacheConfig};
pub use self::redis::{RedisExternalCache, RedisExternalCacheConfig};
