//! Public key conventions.
//!
//! Event ids and attribute keys are plain strings of the form `<mod id>/<name>`.
//! Collisions between mods are avoided by the id prefix; nothing enforces it.

use mbridge_domain::ModId;
use mbridge_domain::mod_id::NAMESPACE_SEPARATOR;

/// Builds `<mod_id>/<name>`, or `None` when `mod_id` is not a valid id or `name` is empty.
#[must_use]
pub fn namespaced(mod_id: &str, name: &str) -> Option<String> {
    (ModId::is_valid(mod_id) && !name.is_empty())
        .then(|| format!("{mod_id}{NAMESPACE_SEPARATOR}{name}"))
}

/// Splits a key at its first separator into `(mod id, name)`.
///
/// Returns `None` for keys without a valid id prefix or with an empty name.
#[must_use]
pub fn split_namespaced(key: &str) -> Option<(&str, &str)> {
    let (id, name) = key.split_once(NAMESPACE_SEPARATOR)?;
    (ModId::is_valid(id) && !name.is_empty()).then_some((id, name))
}

/// Whether `key` belongs to the namespace of `mod_id`.
#[must_use]
pub fn is_owned_by(key: &str, mod_id: &str) -> bool {
    split_namespaced(key).is_some_and(|(id, _)| id == mod_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_rejects_bad_parts() {
        assert_eq!(namespaced("alpha.core", "Score").as_deref(), Some("alpha.core/Score"));
        assert!(namespaced("Alpha", "Score").is_none());
        assert!(namespaced("alpha.core", "").is_none());
    }

    #[test]
    fn split_keeps_nested_names() {
        assert_eq!(split_namespaced("alpha.core/ui/button"), Some(("alpha.core", "ui/button")));
        assert_eq!(split_namespaced("no-separator"), None);
        assert_eq!(split_namespaced("alpha.core/"), None);
        assert!(is_owned_by("alpha.core/Score", "alpha.core"));
        assert!(!is_owned_by("alpha.core/Score", "beta.ui"));
    }
}
