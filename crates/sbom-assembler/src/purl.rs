//! Package URL construction, grounded in `deptrast/formatters.py`'s
//! `_build_purl`: Maven coordinates split `group:artifact` into
//! `group/artifact` for the purl path; every other ecosystem uses
//! `pkg:{system}/{name}@{version}` directly.

use sbom_model::{Coordinate, Ecosystem};

/// `pkg:maven/group/artifact@version`, or `pkg:{system}/{name}@{version}`
/// for every other ecosystem. `version` is taken as given rather than read
/// off `coordinate` so callers can substitute a package's `reported_version`
/// (e.g. a HeroDevs NES patched version) without disturbing the coordinate
/// itself.
pub fn purl(coordinate: &Coordinate, version: &str) -> String {
    let path = match coordinate.system {
        Ecosystem::Maven => coordinate.name.replacen(':', "/", 1),
        _ => coordinate.name.clone(),
    };
    format!("pkg:{}/{}@{}", coordinate.system, path, version)
}

/// Maven components carry a `group` derived from the `group:artifact` name;
/// every other ecosystem has no group to report.
pub fn group_and_name(coordinate: &Coordinate) -> (Option<String>, String) {
    match coordinate.system {
        Ecosystem::Maven => match coordinate.name.split_once(':') {
            Some((group, name)) => (Some(group.to_string()), name.to_string()),
            None => (None, coordinate.name.clone()),
        },
        _ => (None, coordinate.name.clone()),
    }
}
