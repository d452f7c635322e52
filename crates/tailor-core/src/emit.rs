//! Final assembly of the element handed to the host.

use crate::host::Host;
use crate::tags::is_dom_element;
use crate::target::{NodeRef, Target};
use crate::value::{Props, Value};

/// The element type to create: `as` from the resolved props, else the target.
pub fn resolve_element_type(context: &Props, target: &Target) -> Target {
    match context.get("as") {
        Some(Value::Target(element_type)) if element_type.is_valid() => element_type.clone(),
        Some(Value::String(tag)) if !tag.is_empty() => Target::Tag(tag.clone()),
        _ => target.clone(),
    }
}

/// Prop name carrying the class list.
///
/// Custom element tags take a literal `class`; known tags and components
/// take the framework's `className` alias.
pub fn class_attribute(element_type: &Target) -> &'static str {
    match element_type.as_tag() {
        Some(tag) if !is_dom_element(tag) => "class",
        _ => "className",
    }
}

/// Folded ancestor classes, then generated classes, then the resolved
/// `className`. `None` when nothing is left.
pub fn compose_class_names(
    folded_component_classes: &[String],
    generated: &str,
    class_name: Option<&Value>,
) -> Option<String> {
    let consumer = class_name.and_then(Value::class_text);

    let joined = folded_component_classes
        .iter()
        .map(String::as_str)
        .chain([generated])
        .chain(consumer.as_deref())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!joined.is_empty()).then_some(joined)
}

/// Attach the class list and ask the host for the element.
pub fn emit<H: Host>(
    host: &H,
    element_type: &Target,
    mut props: Props,
    class_names: Option<String>,
    node_ref: Option<NodeRef>,
) -> H::Output {
    if let Some(class_names) = class_names {
        props.insert(class_attribute(element_type), class_names);
    }

    host.create_element(element_type, props, node_ref)
}
