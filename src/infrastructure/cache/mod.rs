//! Cache infrastructure - config cache tiers and external stores

mod external;
mod facade;
mod factory;
mod local;
pub mod store;

pub use external::ExternalConfigCache;
pub use facade::ConfigCacheFacade;
pub use factory::{CacheBackend, CacheConfig, CacheFactory};
pub use local::InMemoryConfigCache;
