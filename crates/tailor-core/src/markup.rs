//! A host that builds an element tree and renders it to static HTML.

use crate::host::Host;
use crate::target::{NodeRef, Target};
use crate::value::{format_number, Props, StyleMap, Value};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// One created element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag or component that was requested
    pub element_type: Target,

    /// Props passed to the host, class list included
    pub props: Props,

    /// Forwarded ref
    pub node_ref: Option<NodeRef>,
}

impl Element {
    /// Create an element directly, as a host component's render function would.
    pub fn new(element_type: impl Into<Target>, props: Props) -> Self {
        Self {
            element_type: element_type.into(),
            props,
            node_ref: None,
        }
    }

    /// Tag name, if this element is a tag.
    pub fn tag(&self) -> Option<&str> {
        self.element_type.as_tag()
    }

    /// The class list, under whichever prop name carries it.
    pub fn class(&self) -> Option<&str> {
        self.props
            .get_str("className")
            .or_else(|| self.props.get_str("class"))
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Render to HTML, expanding components through their render functions.
    pub fn to_html(&self) -> String {
        match &self.element_type {
            Target::Tag(tag) => render_tag(tag, &self.props),
            Target::Component(component) => match component.render(&self.props) {
                Some(element) => element.to_html(),
                None => render_children(&self.props),
            },
            Target::Styled(component) => component
                .render(&TreeHost, self.props.clone(), self.node_ref.clone())
                .to_html(),
        }
    }
}

/// Host that returns the requested element as an [`Element`] value.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeHost;

impl Host for TreeHost {
    type Output = Element;

    fn create_element(
        &self,
        element_type: &Target,
        props: Props,
        node_ref: Option<NodeRef>,
    ) -> Element {
        Element {
            element_type: element_type.clone(),
            props,
            node_ref,
        }
    }
}

fn render_tag(tag: &str, props: &Props) -> String {
    // A name that would break out of the tag cannot be rendered as one
    if !is_markup_name(tag) {
        return render_children(props);
    }

    let mut html = format!("<{tag}");

    for (key, value) in props {
        if key == "children" || !is_markup_name(key) {
            continue;
        }

        let name = attribute_name(key);
        match value {
            Value::Bool(true) => html.push_str(&format!(" {name}")),
            Value::String(s) => html.push_str(&format!(r#" {name}="{}""#, html_escape(s))),
            Value::Number(n) => html.push_str(&format!(r#" {name}="{}""#, format_number(*n))),
            Value::Style(style) if !style.is_empty() => {
                html.push_str(&format!(r#" {name}="{}""#, html_escape(&style_text(style))));
            }
            Value::Bool(false) | Value::Undefined | Value::Style(_) | Value::Target(_) => {}
        }
    }

    html.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return html;
    }

    html.push_str(&render_children(props));
    html.push_str(&format!("</{tag}>"));
    html
}

/// Tag and attribute names must not contain whitespace, quotes, `=`, `<`, `>` or `/`.
fn is_markup_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/')
        })
}

fn render_children(props: &Props) -> String {
    match props.get("children") {
        Some(Value::String(text)) => html_escape(text),
        Some(Value::Number(n)) => format_number(*n),
        _ => String::new(),
    }
}

fn attribute_name(key: &str) -> &str {
    match key {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

/// `color: red; border-style: dotted;`
fn style_text(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {};", css_property(property), value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// camelCase → kebab-case. Custom properties are left alone.
fn css_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut css = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }
    css
}

/// Escape HTML special characters including single quotes for XSS prevention.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
