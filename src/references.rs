//! # Reference resolution
//!
//! Single point of provenance creation: every measured field written by the engine is
//! backed by a [`Reference`] obtained through [`resolve_reference`].
//!
//! The resolver matches bibcodes **exactly**. Turning a missing or blank citation into
//! the sentinel `"Unknown"` bibcode is the caller's job, see [`bibcode_or_unknown`].
use log::debug;

use crate::{models::Reference, store::CatalogStore, stellar_errors::StellarError};

/// Get-or-create the reference identified by `bibcode`.
///
/// An existing reference is returned unchanged. Otherwise a new one is created with
/// journal, year and authors unresolved, and the store is flushed at once so that the
/// next lookup in the same run finds it.
///
/// Errors
/// ----------
/// * [`StellarError::DuplicateEntity`] if more than one stored reference carries `bibcode`.
pub fn resolve_reference<S>(store: &mut S, bibcode: &str) -> Result<Reference, StellarError>
where
    S: CatalogStore + ?Sized,
{
    let mut found = store.references_by_bibcode(bibcode);
    match found.len() {
        0 => {
            let id = store.create_reference(bibcode);
            store.flush()?;
            debug!("Created reference {bibcode}");
            store
                .reference(id)
                .ok_or_else(|| StellarError::NotFound(bibcode.to_string()))
        }
        1 => Ok(found.swap_remove(0)),
        count => Err(StellarError::DuplicateEntity {
            key: bibcode.to_string(),
            count,
        }),
    }
}

/// Normalize an optional citation: absent or blank bibcodes become `unknown`.
pub fn bibcode_or_unknown<'a>(bibcode: Option<&'a str>, unknown: &'a str) -> &'a str {
    match bibcode.map(str::trim) {
        Some(b) if !b.is_empty() => b,
        _ => unknown,
    }
}

#[cfg(test)]
mod references_test {
    use super::*;
    use crate::{constants::UNKNOWN_BIBCODE, store::MemoryStore};

    #[test]
    fn test_resolve_is_idempotent() {
        let mut store = MemoryStore::new();
        let first = resolve_reference(&mut store, "2007A&A...474..653V").unwrap();
        let second = resolve_reference(&mut store, "2007A&A...474..653V").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.references_by_bibcode("2007A&A...474..653V").len(), 1);
        assert_eq!(first.journal, None);
        assert!(first.authors.is_empty());
    }

    #[test]
    fn test_unknown_is_a_regular_reference() {
        let mut store = MemoryStore::new();
        let bibcode = bibcode_or_unknown(Some("  "), UNKNOWN_BIBCODE);
        assert_eq!(bibcode, "Unknown");
        let a = resolve_reference(&mut store, bibcode).unwrap();
        let b = resolve_reference(&mut store, bibcode_or_unknown(None, UNKNOWN_BIBCODE)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_references_surface() {
        let mut store = MemoryStore::new();
        store.create_reference("1999dup");
        store.create_reference("1999dup");
        store.flush().unwrap();
        assert_eq!(
            resolve_reference(&mut store, "1999dup"),
            Err(StellarError::DuplicateEntity {
                key: "1999dup".into(),
                count: 2
            })
        );
    }
}
