//! Config entry domain - the cached unit and its portable payload format

pub mod codec;
mod entity;

pub use codec::{deserialize, serialize, DecodeError};
pub use entity::ConfigEntry;
