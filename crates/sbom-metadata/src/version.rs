use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// A HeroDevs NES-style vendor-patched version looks like
/// `<upstream-semver>-<artifact-name>-<patched-semver>`: two three-part
/// semver groups separated by a lowercase artifact token. Metadata queries
/// must use the upstream version; the SBOM should report the patched one.
fn herodevs_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+\.\d+\.\d+)-([a-z][a-z0-9]*(?:-[a-z0-9]+)*)-(\d+\.\d+\.\d+)$").unwrap()
    })
}

/// The result of translating a possibly vendor-patched version string: which
/// version to query the metadata service with, which version to report in
/// the SBOM, and any vendor-patch annotations to carry onto the `Package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorVersion {
    pub query_version: String,
    pub reported_version: String,
    pub metadata: BTreeMap<String, String>,
}

/// Translate `version` through the vendor-version rules. Versions that
/// don't match a known vendor-patch pattern pass through unchanged with
/// empty metadata.
pub fn translate(version: &str) -> VendorVersion {
    if let Some(caps) = herodevs_pattern().captures(version) {
        let upstream = caps[1].to_string();
        let artifact = caps[2].to_string();
        let patched = caps[3].to_string();

        let mut metadata = BTreeMap::new();
        metadata.insert("herodevs:nes".to_string(), "true".to_string());
        metadata.insert("herodevs:upstream-version".to_string(), upstream.clone());
        metadata.insert("herodevs:patched-version".to_string(), patched.clone());
        metadata.insert("herodevs:artifact".to_string(), artifact);
        metadata.insert("supplier".to_string(), "HeroDevs".to_string());

        VendorVersion {
            query_version: upstream,
            reported_version: patched,
            metadata,
        }
    } else {
        VendorVersion {
            query_version: version.to_string(),
            reported_version: version.to_string(),
            metadata: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_version_passes_through() {
        let v = translate("2.11.0");
        assert_eq!(v.query_version, "2.11.0");
        assert_eq!(v.reported_version, "2.11.0");
        assert!(v.metadata.is_empty());
    }

    #[test]
    fn herodevs_version_splits_upstream_and_patched() {
        let v = translate("1.2.3-commons-compress-1.2.4");
        assert_eq!(v.query_version, "1.2.3");
        assert_eq!(v.reported_version, "1.2.4");
        assert_eq!(v.metadata.get("herodevs:nes").map(String::as_str), Some("true"));
        assert_eq!(
            v.metadata.get("herodevs:upstream-version").map(String::as_str),
            Some("1.2.3")
        );
        assert_eq!(
            v.metadata.get("herodevs:patched-version").map(String::as_str),
            Some("1.2.4")
        );
        assert_eq!(
            v.metadata.get("herodevs:artifact").map(String::as_str),
            Some("commons-compress")
        );
        assert_eq!(v.metadata.get("supplier").map(String::as_str), Some("HeroDevs"));
    }

    #[test]
    fn ordinary_prerelease_suffix_is_not_mistaken_for_herodevs() {
        // "1.2.3-rc1" has no second semver group after the qualifier.
        let v = translate("1.2.3-rc1");
        assert_eq!(v.query_version, "1.2.3-rc1");
        assert!(v.metadata.is_empty());
    }
}
