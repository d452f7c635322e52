//! Print the folded configuration of one component.

use anyhow::Result;
use serde::Serialize;
use tailor_core::{merge_variants, Props, VariantTable};
use tailor_manifest::LoadedComponent;

use crate::config::ConfigFile;

/// JSON view of a styled component.
#[derive(Debug, Serialize)]
struct ComponentReport<'a> {
    name: &'a str,
    display_name: &'a str,
    styled_component_id: &'a str,
    selector: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<&'a str>,
    base_class_name: &'a str,
    folded_component_classes: &'a [String],
    attrs: &'a Props,
    variants: VariantTable,
    default_props: Option<Props>,
    statics: &'a Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl<'a> ComponentReport<'a> {
    fn new(loaded: &'a LoadedComponent) -> Self {
        let component = &loaded.component;
        Self {
            name: &loaded.name,
            display_name: component.display_name(),
            styled_component_id: component.styled_component_id(),
            selector: component.to_string(),
            target: component.target().to_string(),
            extends: loaded.def.extends.as_deref(),
            base_class_name: component.base_class_name(),
            folded_component_classes: component.folded_component_classes(),
            attrs: &loaded.def.attrs,
            variants: merge_variants(component.variants()),
            default_props: component.default_props(),
            statics: component.statics(),
            source: loaded
                .source_path
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Run the inspect command.
pub fn run(config: &ConfigFile, name: &str) -> Result<()> {
    let library = super::load_library(config)?;
    let loaded = super::find(&library, name)?;

    println!("{}", report_json(loaded)?);

    Ok(())
}

fn report_json(loaded: &LoadedComponent) -> Result<String> {
    serde_json::to_string_pretty(&ComponentReport::new(loaded))
        .map_err(|e| anyhow::anyhow!("Failed to serialize {}: {}", loaded.name, e))
}
