//! Render targets: tags, host components and styled components.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::component::StyledComponent;
use crate::markup::Element;
use crate::value::{Props, Value};

/// Render function of a host component, used by the markup host.
pub type RenderFn = Arc<dyn Fn(&Props) -> Element + Send + Sync>;

/// What a styled wrapper renders.
#[derive(Clone)]
pub enum Target {
    /// Built-in or custom element tag name (e.g., "button", "my-widget")
    Tag(String),

    /// Opaque component owned by the host framework
    Component(HostComponent),

    /// Component produced by this crate. Folded away when composed.
    Styled(StyledComponent),
}

impl Target {
    /// Create a tag target.
    pub fn tag(name: impl Into<String>) -> Self {
        Target::Tag(name.into())
    }

    /// Whether this is a tag target.
    pub fn is_tag(&self) -> bool {
        matches!(self, Target::Tag(_))
    }

    /// Tag name, if this is a tag target.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Target::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Styled component, if this target was produced by this crate.
    pub fn as_styled(&self) -> Option<&StyledComponent> {
        match self {
            Target::Styled(component) => Some(component),
            _ => None,
        }
    }

    /// An empty tag name cannot be rendered.
    pub fn is_valid(&self) -> bool {
        match self {
            Target::Tag(tag) => !tag.is_empty(),
            _ => true,
        }
    }

    /// Human-readable name: display name, then identifier name, then `Component`.
    pub fn component_name(&self) -> String {
        match self {
            Target::Tag(tag) => tag.clone(),
            Target::Component(component) => component
                .display_name()
                .or(component.name())
                .unwrap_or("Component")
                .to_string(),
            Target::Styled(component) => match component.display_name() {
                "" => "Component".to_string(),
                name => name.to_string(),
            },
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Target::Component(component) => f.debug_tuple("Component").field(component).finish(),
            Target::Styled(component) => f
                .debug_tuple("Styled")
                .field(&component.styled_component_id())
                .finish(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.component_name())
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::Tag(a), Target::Tag(b)) => a == b,
            (Target::Component(a), Target::Component(b)) => a.ptr_eq(b),
            (Target::Styled(a), Target::Styled(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for Target {
    fn from(tag: &str) -> Self {
        Target::Tag(tag.to_string())
    }
}

impl From<String> for Target {
    fn from(tag: String) -> Self {
        Target::Tag(tag)
    }
}

impl From<HostComponent> for Target {
    fn from(component: HostComponent) -> Self {
        Target::Component(component)
    }
}

impl From<&HostComponent> for Target {
    fn from(component: &HostComponent) -> Self {
        Target::Component(component.clone())
    }
}

impl From<StyledComponent> for Target {
    fn from(component: StyledComponent) -> Self {
        Target::Styled(component)
    }
}

impl From<&StyledComponent> for Target {
    fn from(component: &StyledComponent) -> Self {
        Target::Styled(component.clone())
    }
}

/// A component owned by the host framework.
///
/// Cheap to clone; identity is the shared allocation.
#[derive(Clone)]
pub struct HostComponent {
    inner: Arc<HostComponentInner>,
}

#[derive(Clone, Default)]
struct HostComponentInner {
    name: Option<String>,
    display_name: Option<String>,
    statics: Props,
    render: Option<RenderFn>,
}

impl HostComponent {
    /// Create a component with an identifier name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_inner(HostComponentInner {
            name: Some(name.into()),
            ..Default::default()
        })
    }

    /// Create a component with neither name nor display name.
    pub fn anonymous() -> Self {
        Self::from_inner(HostComponentInner::default())
    }

    fn from_inner(inner: HostComponentInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    fn update(self, f: impl FnOnce(&mut HostComponentInner)) -> Self {
        let mut inner = Arc::unwrap_or_clone(self.inner);
        f(&mut inner);
        Self::from_inner(inner)
    }

    /// Set the display name.
    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        self.update(|inner| inner.display_name = Some(display_name))
    }

    /// Attach an extension static field.
    pub fn with_static(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let (key, value) = (key.into(), value.into());
        self.update(|inner| {
            inner.statics.insert(key, value);
        })
    }

    /// Set the function the markup host uses to expand this component.
    pub fn with_render<F>(self, render: F) -> Self
    where
        F: Fn(&Props) -> Element + Send + Sync + 'static,
    {
        self.update(|inner| inner.render = Some(Arc::new(render)))
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.inner.display_name.as_deref().filter(|n| !n.is_empty())
    }

    /// Extension static fields.
    pub fn statics(&self) -> &Props {
        &self.inner.statics
    }

    /// Expand the component with the given props, if it has a render function.
    pub fn render(&self, props: &Props) -> Option<Element> {
        self.inner.render.as_ref().map(|render| render(props))
    }

    /// Whether both handles refer to the same component.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for HostComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostComponent")
            .field("name", &self.inner.name)
            .field("display_name", &self.inner.display_name)
            .field("statics", &self.inner.statics)
            .finish_non_exhaustive()
    }
}

/// Opaque reference handle forwarded to the rendered element.
#[derive(Clone)]
pub struct NodeRef(Arc<dyn Any + Send + Sync>);

impl NodeRef {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Whether both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeRef(..)")
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_name_prefers_display_name() {
        let both = HostComponent::new("CompWithBoth").with_display_name("displayName");
        assert_eq!(Target::from(both).component_name(), "displayName");

        let named = HostComponent::new("CompWithName");
        assert_eq!(Target::from(named).component_name(), "CompWithName");

        let nothing = HostComponent::anonymous();
        assert_eq!(Target::from(nothing).component_name(), "Component");
    }

    #[test]
    fn empty_tag_is_invalid() {
        assert!(!Target::tag("").is_valid());
        assert!(Target::tag("div").is_valid());
        assert!(Target::from(HostComponent::anonymous()).is_valid());
    }

    #[test]
    fn host_components_compare_by_identity() {
        let a = HostComponent::new("A");
        let b = HostComponent::new("A");

        assert_eq!(Target::from(&a), Target::from(&a));
        assert_ne!(Target::from(&a), Target::from(&b));
    }

    #[test]
    fn node_refs_compare_by_identity() {
        let a = NodeRef::new(1u8);
        assert_eq!(a, a.clone());
        assert_ne!(a, NodeRef::new(1u8));
        assert_eq!(a.downcast_ref::<u8>(), Some(&1));
    }
}
