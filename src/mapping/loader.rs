use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::mapping::{
    element_model::{Element, MappingDefinition},
    error::MappingError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    Yaml,
    Json,
}

impl MappingFormat {
    /// `.json` is JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => MappingFormat::Json,
            _ => MappingFormat::Yaml,
        }
    }
}

// ============================================================================
// Raw (on-disk) shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawMapping {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type", default)]
    kind: RawKind,
    #[serde(default)]
    children: Option<Vec<RawElement>>,
}

/// Ids are often written unquoted in mapping files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    #[default]
    Plain,
    Component,
}

// ============================================================================
// Loading
// ============================================================================

pub fn load_mapping(path: impl AsRef<Path>) -> Result<MappingDefinition, MappingError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| MappingError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut mapping = parse_mapping(&content, MappingFormat::from_path(path))?;
    if mapping.name.is_empty() {
        mapping.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(mapping)
}

/// Parse and validate a mapping definition.
///
/// Fails on the first malformed element rather than skipping it, so the
/// flattened length always matches the declared structure.
pub fn parse_mapping(content: &str, format: MappingFormat) -> Result<MappingDefinition, MappingError> {
    let raw: RawMapping = match format {
        MappingFormat::Yaml => serde_yaml::from_str(content).map_err(|source| MappingError::Yaml {
            context: "mapping definition".into(),
            source,
        })?,
        MappingFormat::Json => serde_json::from_str(content).map_err(|source| MappingError::Json {
            context: "mapping definition".into(),
            source,
        })?,
    };

    let elements = raw
        .elements
        .into_iter()
        .enumerate()
        .map(|(i, el)| convert(el, format!("elements[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(elements = elements.len(), "mapping parsed");

    Ok(MappingDefinition {
        name: raw.name.unwrap_or_default(),
        elements,
    })
}

fn convert(raw: RawElement, path: String) -> Result<Element, MappingError> {
    let malformed = |reason: &str| MappingError::MalformedElement {
        path: path.clone(),
        reason: reason.to_string(),
    };

    let id = raw
        .id
        .map(RawId::into_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| malformed("missing id"))?;
    let label = raw.label.ok_or_else(|| malformed("missing label"))?;

    match (raw.kind, raw.children) {
        (RawKind::Plain, None) => Ok(Element::plain(id, label)),
        (RawKind::Plain, Some(_)) => Err(malformed("plain element has children")),
        (RawKind::Component, None) => Err(malformed("component has no children list")),
        (RawKind::Component, Some(children)) => {
            let children = children
                .into_iter()
                .enumerate()
                .map(|(i, child)| convert(child, format!("{}/children[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Element::component(id, label, children))
        }
    }
}
