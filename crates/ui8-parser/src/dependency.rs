//! Classification of import specifiers into external package dependencies.
//!
//! The analyzer keeps any specifier that is not relative or aliased. The
//! resolver applies the stricter rule set on top: workspace packages, `file:`
//! and `node:` protocols, backslashes and non-package paths are dropped, and
//! subpath imports collapse to their package (`react-dom/client` -> `react-dom`).

/// Prefixes of relative and project-alias imports.
const LOCAL_PREFIXES: &[&str] = &[".", "/", "@/", "~/"];

/// Protocols that never name a registry package.
const PROTOCOL_PREFIXES: &[&str] = &["file:", "node:"];

/// Workspace namespace that is always internal, whatever the config says.
pub const BUILTIN_WORKSPACE_PREFIX: &str = "@ui8kit/";

/// True for relative (`./`, `../`, `/`) and alias (`@/`, `~/`) specifiers.
#[must_use]
pub fn is_local_specifier(specifier: &str) -> bool {
    LOCAL_PREFIXES.iter().any(|p| specifier.starts_with(p))
}

/// Reduce an import specifier to the package it resolves from.
///
/// `lodash/fp` -> `lodash`, `@radix-ui/react-slot/dist` -> `@radix-ui/react-slot`.
#[must_use]
pub fn package_name(specifier: &str) -> &str {
    let end = if specifier.starts_with('@') {
        specifier
            .match_indices('/')
            .nth(1)
            .map_or(specifier.len(), |(i, _)| i)
    } else {
        specifier.find('/').unwrap_or(specifier.len())
    };
    &specifier[..end]
}

/// Whether `name` is an installable third-party package.
///
/// `workspace_prefixes` lists additional workspace namespaces (e.g. `@acme/`);
/// `@ui8kit/` is always excluded.
#[must_use]
pub fn is_external_dependency(name: &str, workspace_prefixes: &[String]) -> bool {
    if name.is_empty() || name.trim() != name {
        return false;
    }
    if is_local_specifier(name) || PROTOCOL_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return false;
    }
    if name.starts_with(BUILTIN_WORKSPACE_PREFIX)
        || workspace_prefixes
            .iter()
            .any(|p| !p.is_empty() && name.starts_with(p.as_str()))
    {
        return false;
    }
    if name.contains('\\') {
        return false;
    }
    match name.strip_prefix('@') {
        Some(scoped) => {
            let mut parts = scoped.split('/');
            matches!(
                (parts.next(), parts.next(), parts.next()),
                (Some(scope), Some(pkg), None) if !scope.is_empty() && !pkg.is_empty()
            )
        }
        None => !name.contains('/'),
    }
}

/// Filter and normalize raw import specifiers into an ordered, deduplicated
/// list of package names.
pub fn external_dependencies<'a, I>(specifiers: I, workspace_prefixes: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for specifier in specifiers {
        if specifier.is_empty()
            || is_local_specifier(specifier)
            || !is_external_dependency(package_name(specifier), workspace_prefixes)
        {
            continue;
        }
        let name = package_name(specifier);
        if !out.iter().any(|d| d == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("react", true)]
    #[case("lucide-react", true)]
    #[case("@radix-ui/react-slot", true)]
    #[case("./Button", false)]
    #[case("../lib/utils", false)]
    #[case("@/lib/utils", false)]
    #[case("~/components/Card", false)]
    #[case("@ui8kit/core", false)]
    #[case("file:../local-pkg", false)]
    #[case("node:fs", false)]
    #[case("", false)]
    #[case("some\\windows\\path", false)]
    #[case("react-dom/client", false)]
    #[case("@scope/pkg/extra", false)]
    #[case("@scope", false)]
    fn classifies_package_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_external_dependency(name, &[]), expected, "{name}");
    }

    #[test]
    fn declared_workspace_prefixes_are_internal() {
        let prefixes = vec!["@acme/".to_string()];
        assert!(!is_external_dependency("@acme/tokens", &prefixes));
        assert!(is_external_dependency("@radix-ui/react-slot", &prefixes));
    }

    #[rstest]
    #[case("react", "react")]
    #[case("react-dom/client", "react-dom")]
    #[case("@radix-ui/react-slot", "@radix-ui/react-slot")]
    #[case("@radix-ui/react-slot/dist/index", "@radix-ui/react-slot")]
    #[case("@scope", "@scope")]
    fn normalizes_package_names(#[case] specifier: &str, #[case] expected: &str) {
        assert_eq!(package_name(specifier), expected);
    }

    #[test]
    fn external_dependencies_dedups_in_first_sight_order() {
        let specs = [
            "react",
            "./local",
            "lucide-react",
            "react-dom/client",
            "react",
            "@/lib/utils",
            "~/x",
            "@ui8kit/core/button",
            "react-dom",
        ];
        assert_eq!(
            external_dependencies(specs, &[]),
            vec!["react", "lucide-react", "react-dom"]
        );
    }
}
