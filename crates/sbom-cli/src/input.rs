//! The one input parser this crate implements: a flat list of
//! `system:name:version` coordinates, one per line, with `#` comments.
//!
//! `mvn dependency:tree` output is tolerated too (spec §6): a line like
//! `[INFO] +- group:artifact:jar:version:scope` has its tree-drawing
//! prefix stripped and its five colon-separated fields mapped to
//! `system=maven`, `name=group:artifact`, `version`, `scope` — the
//! packaging/type field (`jar`) is dropped.

use std::path::Path;
use std::str::FromStr;

use sbom_model::{Coordinate, MavenScope};
use sbom_resolver::InputPackage;
use sbom_util::errors::{SbomError, SbomResult};

/// Parse a flat-list (or tolerated Maven-tree) input file into
/// [`InputPackage`]s, in file order.
pub fn parse_file(path: &Path) -> SbomResult<Vec<InputPackage>> {
    let contents = std::fs::read_to_string(path).map_err(SbomError::Io)?;
    parse_str(&contents)
}

fn parse_str(contents: &str) -> SbomResult<Vec<InputPackage>> {
    let mut packages = Vec::new();
    for (line_no, raw_line) in contents.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let package = if is_maven_tree_line(line) {
            parse_maven_tree_line(strip_maven_tree_prefix(line), line_no + 1)?
        } else {
            parse_flat_line(line, line_no + 1)?
        };
        packages.push(package);
    }
    Ok(packages)
}

/// `#` starts a comment that runs to the end of the line.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// `mvn dependency:tree` output always carries Maven's `[INFO] ` prefix —
/// a plain `system:name:version` line never does, so this is enough to
/// pick the right grammar without guessing from the colon count (a plain
/// Maven flat-list entry is itself `maven:group:artifact:version`, four
/// colon-separated fields, which would otherwise be indistinguishable
/// from a tree line by shape alone).
fn is_maven_tree_line(line: &str) -> bool {
    line.starts_with("[INFO]")
}

/// Strip `mvn dependency:tree`'s `[INFO] ` prefix and tree-drawing glyphs
/// (`+-`, `\-`, `|`, spaces) so the remainder is a plain colon-delimited
/// coordinate.
fn strip_maven_tree_prefix(line: &str) -> &str {
    let line = line.strip_prefix("[INFO]").unwrap_or(line).trim_start();
    line.trim_start_matches(['+', '\\', '|', '-', ' '])
}

/// `group:artifact:jar:version:scope`, Maven's `dependency:tree` shape
/// (spec §6): the four leading fields map to `system=maven`,
/// `name=group:artifact`, `version`, `scope`; the packaging field (`jar`)
/// is dropped.
fn parse_maven_tree_line(line: &str, line_no: usize) -> SbomResult<InputPackage> {
    let parts: Vec<&str> = line.split(':').collect();
    match parts.as_slice() {
        [group, artifact, _packaging, version, scope] => {
            let parsed_scope = MavenScope::from_str(scope).map_err(|e| SbomError::Input {
                message: format!("line {line_no}: {e}"),
            })?;
            Ok(InputPackage {
                coordinate: Coordinate::new("maven", format!("{group}:{artifact}"), version.to_string()),
                scope: parsed_scope,
            })
        }
        _ => Err(SbomError::Input {
            message: format!("line {line_no}: expected a Maven tree entry, got `{line}`"),
        }
        .into()),
    }
}

/// `system:name:version`, where `name` itself may contain colons (Maven's
/// `group:artifact`): the first field is always the system, the last is
/// always the version, and everything between is rejoined as the name.
fn parse_flat_line(line: &str, line_no: usize) -> SbomResult<InputPackage> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() < 3 {
        return Err(SbomError::Input {
            message: format!(
                "line {line_no}: expected `system:name:version`, got `{line}`"
            ),
        }
        .into());
    }
    let system = parts[0];
    let version = parts[parts.len() - 1];
    let name = parts[1..parts.len() - 1].join(":");
    Ok(InputPackage {
        coordinate: Coordinate::new(system, name, version.to_string()),
        scope: MavenScope::Compile,
    })
}
