//! Turns a reconciled [`DependencyGraph`] into a [`SbomDocument`].
//!
//! A pure function of graph state, a project header, and an injected
//! [`Clock`] — no wall-clock reads, no hidden randomness, so the same
//! inputs always produce the same document (spec §9, "Deterministic
//! serialization... callers may inject a clock").

use sbom_model::{DependencyGraph, NodeIndex, Scope};

use crate::clock::Clock;
use crate::cyclonedx::{Component, DependencyEntry, Metadata, Property, SbomDocument, ToolComponent, Tools};
use crate::purl::{group_and_name, purl};

/// Identifies the tool that produced the document and, optionally, the
/// command line that invoked it. Populated by the caller (`sbom-cli`), not
/// invented inside the assembler.
#[derive(Debug, Clone)]
pub struct ProjectHeader {
    pub tool_name: String,
    pub tool_version: String,
    pub tool_group: String,
    /// The exact command line that produced this document, if the caller
    /// wants it recorded in `metadata.properties`.
    pub command_line: Option<String>,
}

impl ProjectHeader {
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            tool_group: "sbom-engine".to_string(),
            command_line: None,
        }
    }

    pub fn with_command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = Some(command_line.into());
        self
    }
}

/// Assemble a [`SbomDocument`] describing every [`sbom_model::Package`] in
/// `graph` — winners and losers alike — sorted by purl, with `dependsOn`
/// arrays sorted and deduplicated.
pub fn assemble(graph: &DependencyGraph, header: &ProjectHeader, clock: &dyn Clock) -> SbomDocument {
    let indices: Vec<NodeIndex> = graph.all_indices().collect();

    let mut components: Vec<Component> = Vec::with_capacity(indices.len());
    let mut dependencies: Vec<DependencyEntry> = Vec::with_capacity(indices.len());

    for idx in &indices {
        let package = graph.package(*idx);
        let (group, name) = group_and_name(&package.coordinate);
        let purl_str = purl(&package.coordinate, &package.reported_version);

        let mut tags = Vec::new();
        if let Some(winning_version) = &package.winning_version {
            if let Some(reason) = package.scope_reason() {
                tags.push(format!("scope:{reason}"));
            }
            tags.push(format!("winner:{winning_version}"));
        }
        tags.sort();

        let scope = match package.scope {
            Scope::Required => "required",
            Scope::Optional => "optional",
            Scope::Excluded(_) => "excluded",
        }
        .to_string();

        let mut properties: Vec<Property> = package
            .version_metadata
            .iter()
            .map(|(k, v)| Property {
                name: k.clone(),
                value: v.clone(),
            })
            .collect();
        properties.sort_by(|a, b| a.name.cmp(&b.name));

        components.push(Component {
            component_type: "library".to_string(),
            bom_ref: purl_str.clone(),
            group,
            name,
            version: package.reported_version.clone(),
            scope,
            purl: purl_str.clone(),
            tags,
            properties,
        });

        let mut depends_on: Vec<String> = graph
            .children_of(*idx)
            .map(|child| {
                let child = graph.package(child);
                purl(&child.coordinate, &child.reported_version)
            })
            .collect();
        depends_on.sort();
        depends_on.dedup();

        dependencies.push(DependencyEntry {
            reference: purl_str,
            depends_on,
        });
    }

    components.sort_by(|a, b| a.purl.cmp(&b.purl));
    dependencies.sort_by(|a, b| a.reference.cmp(&b.reference));

    tracing::debug!(
        components = components.len(),
        dependencies = dependencies.len(),
        "assembled SBOM document"
    );

    let tool_purl = format!(
        "pkg:github/{}/{}@{}",
        header.tool_group, header.tool_name, header.tool_version
    );

    SbomDocument {
        bom_format: "CycloneDX".to_string(),
        spec_version: "1.6".to_string(),
        serial_number: format!("urn:uuid:{}", clock.serial_number()),
        version: 1,
        metadata: Metadata {
            timestamp: clock.timestamp(),
            tools: Tools {
                components: vec![ToolComponent {
                    component_type: "application".to_string(),
                    bom_ref: tool_purl.clone(),
                    group: header.tool_group.clone(),
                    name: header.tool_name.clone(),
                    version: header.tool_version.clone(),
                    purl: tool_purl,
                }],
            },
            properties: header.command_line.as_ref().map(|cmd| {
                vec![Property {
                    name: "commandLine".to_string(),
                    value: cmd.clone(),
                }]
            }),
        },
        components,
        dependencies,
    }
}
