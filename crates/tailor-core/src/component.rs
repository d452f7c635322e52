//! The styled component descriptor and its render pipeline.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::attrs::resolve_attrs;
use crate::config::{merge_variants, AttrsEntry, ComponentConfig, ForwardProp, VariantTable};
use crate::emit::{compose_class_names, emit, resolve_element_type};
use crate::host::Host;
use crate::project::project;
use crate::target::{NodeRef, Target};
use crate::value::{deep_merge, Props, Value};
use crate::variants::resolve_variants;

/// A component produced by a [`Styled`](crate::Styled) builder.
///
/// Cheap to clone. The folded configuration is immutable; only the default
/// props can change after definition.
#[derive(Clone)]
pub struct StyledComponent {
    inner: Arc<Inner>,
}

struct Inner {
    config: ComponentConfig,

    /// Styled component this one was folded from, if any
    parent: Option<StyledComponent>,

    /// Extension statics hoisted from the wrapped component
    statics: Props,

    default_props: RwLock<Option<Props>>,
}

impl StyledComponent {
    /// A wrapped styled component's current defaults carry over.
    pub(crate) fn new(config: ComponentConfig, parent: Option<StyledComponent>, statics: Props) -> Self {
        let default_props = parent.as_ref().and_then(StyledComponent::default_props);

        Self {
            inner: Arc::new(Inner {
                config,
                parent,
                statics,
                default_props: RwLock::new(default_props),
            }),
        }
    }

    /// The full folded configuration.
    pub fn config(&self) -> &ComponentConfig {
        &self.inner.config
    }

    /// Original render target, never a styled component.
    pub fn target(&self) -> &Target {
        &self.inner.config.target
    }

    pub fn attrs(&self) -> &[AttrsEntry] {
        &self.inner.config.attrs
    }

    pub fn variants(&self) -> &[VariantTable] {
        &self.inner.config.variants
    }

    pub fn should_forward_prop(&self) -> Option<&ForwardProp> {
        self.inner.config.should_forward_prop.as_ref()
    }

    pub fn base_class_name(&self) -> &str {
        &self.inner.config.base_class_name
    }

    pub fn folded_component_classes(&self) -> &[String] {
        &self.inner.config.folded_component_classes
    }

    pub fn styled_component_id(&self) -> &str {
        &self.inner.config.styled_component_id
    }

    pub fn display_name(&self) -> &str {
        &self.inner.config.display_name
    }

    /// Extension statics hoisted from the wrapped component.
    pub fn statics(&self) -> &Props {
        &self.inner.statics
    }

    /// Current default props.
    pub fn default_props(&self) -> Option<Props> {
        self.inner
            .default_props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the default props.
    ///
    /// When this component wraps another styled component, `props` is merged
    /// recursively on top of the wrapped component's defaults.
    pub fn set_default_props(&self, props: Props) {
        let folded = match &self.inner.parent {
            Some(parent) => deep_merge(parent.default_props().unwrap_or_default(), props),
            None => props,
        };

        *self
            .inner
            .default_props
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(folded);
    }

    /// Whether both handles refer to the same definition.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Render one instance.
    ///
    /// Runs attrs, variants, prop projection and emission in that order and
    /// hands the result to `host`.
    pub fn render<H: Host>(&self, host: &H, props: Props, node_ref: Option<NodeRef>) -> H::Output {
        let config = &self.inner.config;

        let props = self.apply_default_props(props);
        let context = resolve_attrs(&config.attrs, props);

        let variants = merge_variants(&config.variants);
        let generated = resolve_variants(&config.base_class_name, &variants, &context);

        let element_type = resolve_element_type(&context, &config.target);
        let forwarded = project(
            &context,
            &variants,
            config.should_forward_prop.as_ref(),
            &element_type,
        );
        let class_names = compose_class_names(
            &config.folded_component_classes,
            &generated,
            context.get("className"),
        );

        tracing::trace!(
            component_id = %config.styled_component_id,
            element = %element_type,
            class = class_names.as_deref().unwrap_or(""),
            "Rendering styled component"
        );

        emit(host, &element_type, forwarded, class_names, node_ref)
    }

    /// Fill in defaults for props that are missing or undefined.
    fn apply_default_props(&self, mut props: Props) -> Props {
        let guard = self
            .inner
            .default_props
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(defaults) = guard.as_ref() {
            for (key, value) in defaults {
                if !props.is_set(key) {
                    props.insert(key.as_str(), value.clone());
                }
            }
        }

        props
    }
}

impl fmt::Display for StyledComponent {
    /// Selector for this component: `.<styled_component_id>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.styled_component_id())
    }
}

impl fmt::Debug for StyledComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledComponent")
            .field("display_name", &self.display_name())
            .field("styled_component_id", &self.styled_component_id())
            .field("target", self.target())
            .field("base_class_name", &self.base_class_name())
            .field("folded_component_classes", &self.folded_component_classes())
            .finish_non_exhaustive()
    }
}

impl From<&StyledComponent> for Value {
    fn from(component: &StyledComponent) -> Self {
        Value::Target(Target::Styled(component.clone()))
    }
}
