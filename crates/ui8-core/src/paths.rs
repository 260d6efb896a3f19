//! Checks for manifest and registry strings that end up in file paths.

use std::path::{Component, Path};

/// A single file-name segment: no separators, no `.` or `..`.
///
/// Item names become `<folder>/<name>.json` at build time.
#[must_use]
pub fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        )
}

/// A non-empty relative path made only of normal segments.
///
/// Install targets are joined onto the project source directory, so absolute
/// paths, drive prefixes and `..` are refused.
#[must_use]
pub fn is_relative_target(target: &str) -> bool {
    !target.trim().is_empty()
        && !target.contains('\\')
        && Path::new(target)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && Path::new(target)
            .components()
            .any(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        assert!(is_plain_name("Button"));
        assert!(is_plain_name("hero-v2.client"));
        for bad in ["", ".", "..", "../escaped", "a/b", "a\\b", "/abs", "x/"] {
            assert!(!is_plain_name(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn relative_targets() {
        assert!(is_relative_target("ui"));
        assert!(is_relative_target("components/forms"));
        assert!(is_relative_target("./blocks"));
        for bad in ["", " ", ".", "/tmp/x", "../../..", "ui/../../x", "ui\\x"] {
            assert!(!is_relative_target(bad), "{bad:?} should be rejected");
        }
    }
}
