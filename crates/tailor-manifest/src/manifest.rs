//! Manifest file formats and component definitions.

use std::path::Path;

use serde::Deserialize;
use tailor_core::{ForwardProp, Props, StyledError, VariantTable};

/// One component declared in a manifest file.
///
/// ```toml
/// [[component]]
/// name = "Button"
/// tag = "button"
/// class = "btn"
///
/// [component.variants.size]
/// small = "btn-sm"
/// big = "btn-lg"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComponentDef {
    /// Component name (e.g., "Button"), also used as the display name
    pub name: String,

    /// Tag to render (e.g., "button")
    #[serde(default)]
    pub tag: Option<String>,

    /// Name of another component in the library to wrap
    #[serde(default)]
    pub extends: Option<String>,

    /// Base class applied at this level
    #[serde(default)]
    pub class: Option<String>,

    /// Fixed component id instead of a generated one
    #[serde(default)]
    pub component_id: Option<String>,

    /// Props merged on every render
    #[serde(default)]
    pub attrs: Props,

    /// Variant classes by prop and value
    #[serde(default)]
    pub variants: VariantTable,

    /// Default props
    #[serde(default)]
    pub defaults: Props,

    /// Which props reach the rendered element
    #[serde(default)]
    pub forward: Option<ForwardRule>,
}

impl ComponentDef {
    /// A definition rendering `tag`, with everything else empty.
    pub fn tag(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::named(name)
        }
    }

    /// A definition wrapping another library component.
    pub fn extending(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            extends: Some(base.into()),
            ..Self::named(name)
        }
    }

    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            extends: None,
            class: None,
            component_id: None,
            attrs: Props::new(),
            variants: VariantTable::new(),
            defaults: Props::new(),
            forward: None,
        }
    }

    /// Check that exactly one of `tag` and `extends` is set.
    pub fn validate(&self) -> Result<(), ManifestError> {
        match (&self.tag, &self.extends) {
            (Some(_), Some(_)) => Err(ManifestError::AmbiguousTarget(self.name.clone())),
            (None, None) => Err(ManifestError::MissingTarget(self.name.clone())),
            _ => Ok(()),
        }
    }
}

/// Prop forwarding rule: `forward = { allow = [...] }` or `{ deny = [...] }`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ForwardRule {
    Allow(Vec<String>),
    Deny(Vec<String>),
}

impl ForwardRule {
    pub fn to_forward_prop(&self) -> ForwardProp {
        match self {
            ForwardRule::Allow(props) => ForwardProp::allow(props.clone()),
            ForwardRule::Deny(props) => ForwardProp::deny(props.clone()),
        }
    }
}

/// Supported manifest file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Top-level shape shared by both formats.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    component: Vec<ComponentDef>,
}

/// Parse every component definition in `source`.
///
/// `origin` names the source in error messages.
pub fn parse_manifest(
    source: &str,
    format: Format,
    origin: &str,
) -> Result<Vec<ComponentDef>, ManifestError> {
    let file: ManifestFile = match format {
        Format::Toml => toml::from_str(source).map_err(|e| ManifestError::Toml {
            path: origin.to_string(),
            message: e.to_string(),
        })?,
        Format::Yaml => {
            if source.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_yaml::from_str(source).map_err(|e| ManifestError::Yaml {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        }
    };

    Ok(file.component)
}

/// Errors that can occur when loading a component library.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Toml { path: String, message: String },

    #[error("Invalid YAML in {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Component {name} extends unknown component {base}")]
    UnknownBase { name: String, base: String },

    #[error("Cycle in extends chain: {0}")]
    Cycle(String),

    #[error("Component {0} needs either `tag` or `extends`")]
    MissingTarget(String),

    #[error("Component {0} sets both `tag` and `extends`")]
    AmbiguousTarget(String),

    #[error("Duplicate component: {0}")]
    Duplicate(String),

    #[error("Component {name}: {source}")]
    Styled {
        name: String,
        #[source]
        source: StyledError,
    },
}
