//! Render one component to static HTML.

use anyhow::Result;
use tailor_core::{Props, TreeHost, Value};
use tailor_manifest::LoadedComponent;

use crate::config::ConfigFile;

/// Run the render command.
pub fn run(
    config: &ConfigFile,
    name: &str,
    props: Vec<(String, Value)>,
    as_tag: Option<String>,
    text: Option<String>,
) -> Result<()> {
    let library = super::load_library(config)?;
    let loaded = super::find(&library, name)?;

    println!("{}", render_html(loaded, props, as_tag, text));

    Ok(())
}

fn render_html(
    loaded: &LoadedComponent,
    props: Vec<(String, Value)>,
    as_tag: Option<String>,
    text: Option<String>,
) -> String {
    let mut props: Props = props.into_iter().collect();
    if let Some(tag) = as_tag {
        props.insert("as", tag);
    }
    if let Some(text) = text {
        props.insert("children", text);
    }

    loaded
        .component
        .render(&TreeHost, props, None)
        .to_html()
}

/// Parse a `key=value` prop.
///
/// `true` and `false` become booleans, finite numbers become numbers, and
/// anything else is kept as a string.
pub fn parse_prop(s: &str) -> Result<(String, Value), String> {
    let Some((key, raw)) = s.split_once('=') else {
        return Err(format!("Invalid prop '{}': expected key=value", s));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid prop '{}': empty key", s));
    }

    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::String(raw.to_string()),
        },
    };

    Ok((key.to_string(), value))
}
