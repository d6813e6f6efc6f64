//! Infrastructure layer - Cache tiers, external stores and logging

pub mod cache;
pub mod diagnostics;
pub mod logging;
