//! Definition-time options and the folded configuration of a styled component.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::{escape, IdRegistry};
use crate::target::Target;
use crate::value::Props;

/// Function form of an attrs entry.
pub type AttrsFn = Arc<dyn Fn(&Props) -> Props + Send + Sync>;

/// One `.attrs()` stage.
#[derive(Clone)]
pub enum AttrsEntry {
    /// Fixed props merged on every render
    Static(Props),

    /// Props computed from everything resolved so far
    Dynamic(AttrsFn),
}

impl AttrsEntry {
    /// Wrap a function of the accumulated props.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Props) -> Props + Send + Sync + 'static,
    {
        AttrsEntry::Dynamic(Arc::new(f))
    }

    /// Evaluate against the props accumulated so far.
    pub fn resolve<'a>(&'a self, accumulated: &Props) -> Cow<'a, Props> {
        match self {
            AttrsEntry::Static(props) => Cow::Borrowed(props),
            AttrsEntry::Dynamic(f) => Cow::Owned(f(accumulated)),
        }
    }
}

impl From<Props> for AttrsEntry {
    fn from(props: Props) -> Self {
        AttrsEntry::Static(props)
    }
}

impl fmt::Debug for AttrsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrsEntry::Static(props) => f.debug_tuple("Static").field(props).finish(),
            AttrsEntry::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Prop name → (prop value → class name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantTable(IndexMap<String, IndexMap<String, String>>);

impl VariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) the entries for one prop.
    ///
    /// ```
    /// use tailor_core::VariantTable;
    ///
    /// let table = VariantTable::new()
    ///     .variant("size", [("small", "s"), ("big", "b")])
    ///     .variant("outlined", [("true", "outlined")]);
    ///
    /// assert_eq!(table.lookup("size", "big"), Some("b"));
    /// ```
    pub fn variant<I, K, V>(mut self, prop: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.0
            .entry(prop.into())
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Entries for one prop.
    pub fn get(&self, prop: &str) -> Option<&IndexMap<String, String>> {
        self.0.get(prop)
    }

    /// Class name for a prop value.
    pub fn lookup(&self, prop: &str, value: &str) -> Option<&str> {
        self.get(prop)?.get(value).map(String::as_str)
    }

    /// Whether the prop is styling-only.
    pub fn contains_prop(&self, prop: &str) -> bool {
        self.0.contains_key(prop)
    }

    /// Merge `other` into this table. Later values win per prop and value.
    pub fn merge(&mut self, other: &VariantTable) {
        for (prop, entries) in &other.0 {
            self.0
                .entry(prop.clone())
                .or_default()
                .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    /// Prop names in declaration order.
    pub fn props(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, IndexMap<String, String>> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Merge a sequence of variant tables, later tables overriding earlier ones.
pub fn merge_variants(tables: &[VariantTable]) -> VariantTable {
    tables.iter().fold(VariantTable::new(), |mut merged, table| {
        merged.merge(table);
        merged
    })
}

/// Decides whether a prop reaches the rendered element.
///
/// Called with the prop name and the element type about to be created.
#[derive(Clone)]
pub struct ForwardProp(Arc<dyn Fn(&str, &Target) -> bool + Send + Sync>);

impl ForwardProp {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &Target) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Forward only the listed props.
    pub fn allow<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let props: Vec<String> = props.into_iter().map(Into::into).collect();
        Self::new(move |prop, _| props.iter().any(|p| p == prop))
    }

    /// Forward everything except the listed props.
    pub fn deny<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let props: Vec<String> = props.into_iter().map(Into::into).collect();
        Self::new(move |prop, _| !props.iter().any(|p| p == prop))
    }

    pub fn allows(&self, prop: &str, element_type: &Target) -> bool {
        (self.0)(prop, element_type)
    }

    /// Both predicates must allow the prop. `self` is asked first.
    pub fn and(&self, other: &ForwardProp) -> ForwardProp {
        let (first, second) = (self.clone(), other.clone());
        ForwardProp::new(move |prop, element_type| {
            first.allows(prop, element_type) && second.allows(prop, element_type)
        })
    }
}

impl fmt::Debug for ForwardProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ForwardProp(..)")
    }
}

/// Options accepted by `.with_config()`.
///
/// Merging keeps the last value supplied for each field.
#[derive(Debug, Clone, Default)]
pub struct StyledConfig {
    pub display_name: Option<String>,
    pub component_id: Option<String>,
    pub parent_component_id: Option<String>,
    pub should_forward_prop: Option<ForwardProp>,
}

impl StyledConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn component_id(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    pub fn parent_component_id(mut self, parent_component_id: impl Into<String>) -> Self {
        self.parent_component_id = Some(parent_component_id.into());
        self
    }

    pub fn should_forward_prop<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Target) -> bool + Send + Sync + 'static,
    {
        self.should_forward_prop = Some(ForwardProp::new(f));
        self
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(self, other: StyledConfig) -> StyledConfig {
        StyledConfig {
            display_name: other.display_name.or(self.display_name),
            component_id: other.component_id.or(self.component_id),
            parent_component_id: other.parent_component_id.or(self.parent_component_id),
            should_forward_prop: other.should_forward_prop.or(self.should_forward_prop),
        }
    }
}

/// Everything collected by a builder before the terminal call.
#[derive(Debug, Clone, Default)]
pub struct StyledOptions {
    pub attrs: Vec<AttrsEntry>,
    pub variants: Vec<VariantTable>,
    pub config: StyledConfig,
}

/// The folded statics of one styled component definition.
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    /// Original render target; never a styled component
    pub target: Target,

    /// Attrs stages, ancestors first
    pub attrs: Vec<AttrsEntry>,

    /// Variant tables, ancestors first
    pub variants: Vec<VariantTable>,

    /// Combined forwarding predicate of every level
    pub should_forward_prop: Option<ForwardProp>,

    /// Class supplied at this level only
    pub base_class_name: String,

    /// Base classes of every ancestor, outermost last
    pub folded_component_classes: Vec<String>,

    pub styled_component_id: String,

    pub display_name: String,
}

/// Errors raised while defining a styled component.
#[derive(Debug, thiserror::Error)]
pub enum StyledError {
    #[error("Cannot create styled component for component: {0:?}")]
    InvalidTarget(String),
}

/// Fold `options` with whatever `target` already carries.
///
/// Fails when the target cannot be rendered.
pub fn compose(
    target: &Target,
    options: &StyledOptions,
    base_class_name: &str,
    registry: &IdRegistry,
) -> Result<ComponentConfig, StyledError> {
    if !target.is_valid() {
        return Err(StyledError::InvalidTarget(target.to_string()));
    }

    Ok(fold(target, options, base_class_name, registry))
}

/// Compose without validating the target.
pub(crate) fn fold(
    target: &Target,
    options: &StyledOptions,
    base_class_name: &str,
    registry: &IdRegistry,
) -> ComponentConfig {
    let parent = target.as_styled();
    let config = &options.config;

    let styled_component_id = match (config.display_name.as_deref(), &config.component_id) {
        (Some(display_name), Some(id)) if !display_name.is_empty() => {
            format!("{}-{}", escape(display_name), id)
        }
        (_, Some(id)) => id.clone(),
        (display_name, None) => {
            registry.generate(display_name, config.parent_component_id.as_deref())
        }
    };

    let display_name = config
        .display_name
        .clone()
        .unwrap_or_else(|| generate_display_name(target));

    let (attrs, variants) = match parent {
        Some(parent) => (
            parent.attrs().iter().chain(&options.attrs).cloned().collect(),
            parent.variants().iter().chain(&options.variants).cloned().collect(),
        ),
        None => (options.attrs.clone(), options.variants.clone()),
    };

    let should_forward_prop = match (
        parent.and_then(|p| p.should_forward_prop()),
        &config.should_forward_prop,
    ) {
        (Some(inherited), Some(own)) => Some(inherited.and(own)),
        (Some(inherited), None) => Some(inherited.clone()),
        (None, own) => own.clone(),
    };

    let folded_component_classes = match parent {
        Some(parent) => {
            let mut classes = parent.folded_component_classes().to_vec();
            classes.push(parent.base_class_name().to_string());
            classes
        }
        None => Vec::new(),
    };

    let target = match parent {
        Some(parent) => parent.target().clone(),
        None => target.clone(),
    };

    tracing::debug!(
        component_id = %styled_component_id,
        display_name = %display_name,
        attrs = attrs.len(),
        variants = variants.len(),
        "Composed styled component"
    );

    ComponentConfig {
        target,
        attrs,
        variants,
        should_forward_prop,
        base_class_name: base_class_name.to_string(),
        folded_component_classes,
        styled_component_id,
        display_name,
    }
}

/// `styled.<tag>` for tags, `Styled(<name>)` for components.
pub fn generate_display_name(target: &Target) -> String {
    match target {
        Target::Tag(tag) => format!("styled.{tag}"),
        other => format!("Styled({})", other.component_name()),
    }
}
