//! Cache key derivation
//!
//! The key identifies one SDK key's config slot in a shared external cache.
//! Every SDK implementation derives it the same way:
//!
//! ```text
//! sha1_hex_lower("{sdk_key}_{product_type}_{product_version}.json_{format_version}")
//! ```
//!
//! For the published config resource this is
//! `sha1("{sdk_key}_config_v5.json_v2")`. The canonical string is hashed as
//! UTF-8.

use sha1::{Digest, Sha1};

/// Separator between the components of the canonical key string
const KEY_SEPARATOR: &str = "_";

/// Extension of the config resource named by product type and version
const RESOURCE_EXTENSION: &str = ".json";

/// Generation of the payload format produced by the entry codec
pub const SERIALIZATION_FORMAT_VERSION: &str = "v2";

/// Product type of the published config resource
pub const DEFAULT_PRODUCT_TYPE: &str = "config";

/// Version of the published config resource
pub const DEFAULT_PRODUCT_VERSION: &str = "v5";

/// Derives the cache key for a product identifier.
///
/// Returns 40 lowercase hexadecimal characters.
pub fn derive_key(sdk_key: &str, product_type: &str, product_version: &str) -> String {
    let canonical = canonical_key_string(sdk_key, product_type, product_version);

    let mut hasher = Sha1::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonical_key_string(sdk_key: &str, product_type: &str, product_version: &str) -> String {
    [
        sdk_key,
        KEY_SEPARATOR,
        product_type,
        KEY_SEPARATOR,
        product_version,
        RESOURCE_EXTENSION,
        KEY_SEPARATOR,
        SERIALIZATION_FORMAT_VERSION,
    ]
    .concat()
}

/// Builder over the inputs of [`derive_key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyDeriver {
    sdk_key: String,
    product_type: String,
    product_version: String,
}

impl CacheKeyDeriver {
    /// Creates a deriver for the published config resource of `sdk_key`
    pub fn new(sdk_key: impl Into<String>) -> Self {
        Self {
            sdk_key: sdk_key.into(),
            product_type: DEFAULT_PRODUCT_TYPE.to_string(),
            product_version: DEFAULT_PRODUCT_VERSION.to_string(),
        }
    }

    /// Sets the product type
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Sets the product version
    pub fn with_product_version(mut self, product_version: impl Into<String>) -> Self {
        self.product_version = product_version.into();
        self
    }

    pub fn sdk_key(&self) -> &str {
        &self.sdk_key
    }

    /// Derives the cache key
    pub fn derive(&self) -> String {
        derive_key(&self.sdk_key, &self.product_type, &self.product_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_platform_independent() {
        let cases = [
            ("test1", "147c5b4c2b2d7c77e1605b1a4309f0ea6684a0c6"),
            ("test2", "c09513b1756de9e4bc48815ec7a142b2441ed4d5"),
        ];

        for (sdk_key, expected) in cases {
            assert_eq!(
                derive_key(sdk_key, DEFAULT_PRODUCT_TYPE, DEFAULT_PRODUCT_VERSION),
                expected
            );
            assert_eq!(CacheKeyDeriver::new(sdk_key).derive(), expected);
        }
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(
            canonical_key_string("test1", "config", "v5"),
            "test1_config_v5.json_v2"
        );
    }

    #[test]
    fn test_key_format() {
        let key = derive_key("PKDVCLf-Hq-h-kCzMp-L7Q/psuH7BGHoUmdONrzzUOY7A", "config", "v5");

        assert_eq!(key.len(), 40);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = CacheKeyDeriver::new("sdk-key").derive();
        let b = CacheKeyDeriver::new("sdk-key").derive();
        assert_eq!(a, b);
    }

    #[test]
    fn test_product_components_change_key() {
        let base = CacheKeyDeriver::new("sdk-key");

        let other_type = base.clone().with_product_type("settings").derive();
        let other_version = base.clone().with_product_version("v6").derive();

        assert_ne!(base.derive(), other_type);
        assert_ne!(base.derive(), other_version);
        assert_ne!(other_type, other_version);
    }

    #[test]
    fn test_non_ascii_sdk_key_is_hashed_as_utf8() {
        let key = derive_key("kulcs-ő", "config", "v5");

        let mut hasher = Sha1::new();
        hasher.update("kulcs-ő_config_v5.json_v2".as_bytes());
        assert_eq!(key, hex::encode(hasher.finalize()));
    }
}
