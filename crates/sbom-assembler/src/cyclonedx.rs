//! Typed CycloneDX 1.6 document shapes.
//!
//! Fixed field order (`type, bom-ref, group, name, version, scope, purl,
//! tags`), a `metadata.tools.components[0]` self-description, and
//! `[ ]`-spaced empty arrays. Plain `serde` structs rather than a
//! third-party CycloneDX object model.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SbomDocument {
    #[serde(rename = "bomFormat")]
    pub bom_format: String,
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
    pub version: u32,
    pub metadata: Metadata,
    pub components: Vec<Component>,
    pub dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub timestamp: String,
    pub tools: Tools,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tools {
    pub components: Vec<ToolComponent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolComponent {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    pub group: String,
    pub name: String,
    pub version: String,
    pub purl: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Field order matches the donor SBOM's component layout exactly:
/// `type, bom-ref, group, name, version, scope, purl, tags`.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub name: String,
    pub version: String,
    pub scope: String,
    pub purl: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyEntry {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

impl SbomDocument {
    /// Serialize to pretty JSON, then apply the same cosmetic pass the
    /// donor's Python formatter applies: empty arrays render as `[ ]`
    /// rather than `[]`, matching the Java reference implementation's
    /// output byte-for-byte.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json.replace("[]", "[ ]"))
    }
}
