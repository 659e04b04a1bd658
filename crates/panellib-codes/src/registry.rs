//! The code table registry.
//!
//! [`CodeTableRegistry`] is the lookup surface the rest of the library
//! works against: an immutable, explicitly constructed catalogue of
//! [`CodeTable`]s. There is no process-wide instance; callers build one
//! (usually via [`CodeTableRegistry::builtin`]) and hand it to whatever
//! needs it, which keeps tests free to inject reduced or synthetic
//! catalogues.

use panellib_core::{Error, Result, WireCommand};

use crate::tables::{all_tables, CodeTable};

/// An immutable catalogue of vendor code tables.
///
/// Introspection ([`variants`], [`keys`]) never fails; only resolution of
/// an unknown variant or key does. Catalogue order is construction order
/// and is stable across calls.
///
/// [`variants`]: Self::variants
/// [`keys`]: Self::keys
///
/// # Example
///
/// ```
/// use panellib_codes::CodeTableRegistry;
///
/// let registry = CodeTableRegistry::builtin();
/// assert_eq!(registry.variants(), vec!["AverMedia", "KTC"]);
///
/// let cmd = registry.resolve_key("AverMedia", "POWER_ON").unwrap();
/// assert_eq!(cmd.as_bytes(), &[0x69, 0x53, 0x43]);
/// ```
#[derive(Debug, Clone)]
pub struct CodeTableRegistry {
    tables: Vec<CodeTable>,
}

impl CodeTableRegistry {
    /// Registry over the built-in vendor tables, in catalogue order.
    pub fn builtin() -> Self {
        Self::from_tables(all_tables())
    }

    /// Registry over caller-supplied tables. Order is preserved.
    pub fn from_tables(tables: Vec<CodeTable>) -> Self {
        CodeTableRegistry { tables }
    }

    /// Ordered variant identifiers.
    pub fn variants(&self) -> Vec<&'static str> {
        self.tables.iter().map(|t| t.variant).collect()
    }

    /// Ordered key names for one variant.
    ///
    /// Introspection is total: an unknown variant yields an empty list
    /// rather than an error. Resolution is where unknown names fail.
    pub fn keys(&self, variant: &str) -> Vec<&'static str> {
        self.table(variant).map(CodeTable::keys).unwrap_or_default()
    }

    /// The table for one variant, if present. Case-sensitive.
    pub fn table(&self, variant: &str) -> Option<&CodeTable> {
        self.tables.iter().find(|t| t.variant == variant)
    }

    /// Resolve `(variant, key)` to the command bytes for the wire.
    ///
    /// Both lookups are exact-string; callers that want case-insensitive
    /// entry normalize once before calling. An absent variant fails with
    /// [`Error::UnknownVariant`] before the key is ever considered; an
    /// absent key fails with [`Error::UnknownKey`].
    pub fn resolve_key(&self, variant: &str, key: &str) -> Result<WireCommand> {
        let table = self
            .table(variant)
            .ok_or_else(|| Error::UnknownVariant(variant.to_string()))?;
        let hex = table.lookup(key).ok_or_else(|| Error::UnknownKey {
            variant: variant.to_string(),
            key: key.to_string(),
        })?;
        WireCommand::from_hex(hex)
    }
}

impl Default for CodeTableRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::avermedia;

    #[test]
    fn builtin_lists_variants_in_catalogue_order() {
        let registry = CodeTableRegistry::builtin();
        assert_eq!(registry.variants(), vec!["AverMedia", "KTC"]);
    }

    #[test]
    fn resolve_known_key() {
        let registry = CodeTableRegistry::builtin();
        let cmd = registry.resolve_key("AverMedia", "POWER_ON").unwrap();
        assert_eq!(cmd.as_bytes(), &[0x69, 0x53, 0x43]);
        assert_eq!(cmd.to_hex(), "69 53 43");
    }

    #[test]
    fn resolve_unknown_variant() {
        let registry = CodeTableRegistry::builtin();
        let err = registry.resolve_key("Samsung", "POWER_ON").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(v) if v == "Samsung"));
    }

    #[test]
    fn resolve_unknown_key() {
        let registry = CodeTableRegistry::builtin();
        let err = registry.resolve_key("KTC", "NONEXISTENT").unwrap_err();
        match err {
            Error::UnknownKey { variant, key } => {
                assert_eq!(variant, "KTC");
                assert_eq!(key, "NONEXISTENT");
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn unknown_variant_wins_over_unknown_key() {
        // A bad variant must never be reported as a bad key, even when
        // the key would be unknown everywhere.
        let registry = CodeTableRegistry::builtin();
        let err = registry.resolve_key("NoSuchVendor", "NONEXISTENT").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn variant_lookup_is_case_sensitive() {
        let registry = CodeTableRegistry::builtin();
        assert!(registry.table("avermedia").is_none());
        let err = registry.resolve_key("avermedia", "POWER_ON").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn keys_empty_for_unknown_variant() {
        let registry = CodeTableRegistry::builtin();
        assert!(registry.keys("Samsung").is_empty());
    }

    #[test]
    fn keys_and_resolve_agree_for_every_variant() {
        let registry = CodeTableRegistry::builtin();
        for variant in registry.variants() {
            let keys = registry.keys(variant);
            assert!(!keys.is_empty(), "{variant}: no keys");
            for key in keys {
                registry
                    .resolve_key(variant, key)
                    .unwrap_or_else(|e| panic!("{variant}/{key}: {e}"));
            }
            assert!(matches!(
                registry.resolve_key(variant, "NOT_A_REAL_KEY"),
                Err(Error::UnknownKey { .. })
            ));
        }
    }

    #[test]
    fn custom_registry_injection() {
        let registry = CodeTableRegistry::from_tables(vec![avermedia()]);
        assert_eq!(registry.variants(), vec!["AverMedia"]);
        assert!(registry.resolve_key("KTC", "POWER_ON").is_err());
        assert!(registry.resolve_key("AverMedia", "POWER_ON").is_ok());
    }

    #[test]
    fn default_is_builtin() {
        let registry = CodeTableRegistry::default();
        assert_eq!(registry.variants(), CodeTableRegistry::builtin().variants());
    }
}
