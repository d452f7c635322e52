//! The `styled()` construction surface.

use std::sync::Arc;

use crate::component::StyledComponent;
use crate::config::{fold, AttrsEntry, StyledConfig, StyledError, StyledOptions, VariantTable};
use crate::host::{hoist_statics, RESERVED_STATICS};
use crate::id::IdRegistry;
use crate::target::Target;
use crate::value::Props;

/// Start a styled component definition for `target`.
///
/// Fails immediately when the target cannot be rendered (an empty tag name).
///
/// ```
/// use tailor_core::{styled, Props, TreeHost, VariantTable};
///
/// let button = styled("button")?
///     .variants(VariantTable::new().variant("size", [("small", "s"), ("big", "b")]))
///     .build();
///
/// let element = button.render(&TreeHost, Props::new().with("size", "big"), None);
/// assert_eq!(element.to_html(), r#"<button class="b"></button>"#);
/// # Ok::<(), tailor_core::StyledError>(())
/// ```
pub fn styled(target: impl Into<Target>) -> Result<Styled, StyledError> {
    let target = target.into();
    if !target.is_valid() {
        return Err(StyledError::InvalidTarget(target.to_string()));
    }

    Ok(Styled::new(target))
}

/// Accumulates attrs, variants and config until a terminal `build` call.
///
/// Every method returns a new builder; a builder can be built any number of
/// times, each producing a distinct component.
#[derive(Debug, Clone)]
pub struct Styled {
    target: Target,
    options: StyledOptions,
    registry: Arc<IdRegistry>,
}

impl Styled {
    fn new(target: Target) -> Self {
        Self {
            target,
            options: StyledOptions::default(),
            registry: IdRegistry::global(),
        }
    }

    pub(crate) fn for_tag(tag: &'static str) -> Self {
        Self::new(Target::Tag(tag.to_string()))
    }

    /// What this builder wraps.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Options collected so far.
    pub fn options(&self) -> &StyledOptions {
        &self.options
    }

    /// Append an attrs stage.
    pub fn attrs(mut self, entry: impl Into<AttrsEntry>) -> Self {
        self.options.attrs.push(entry.into());
        self
    }

    /// Append an attrs stage computed from the props resolved so far.
    pub fn attrs_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Props) -> Props + Send + Sync + 'static,
    {
        self.attrs(AttrsEntry::dynamic(f))
    }

    /// Append a variant table.
    pub fn variants(mut self, table: VariantTable) -> Self {
        self.options.variants.push(table);
        self
    }

    /// Merge config options; later values win.
    pub fn with_config(mut self, config: StyledConfig) -> Self {
        self.options.config = self.options.config.merge(config);
        self
    }

    /// Generate identifiers from `registry` instead of the global one.
    pub fn registry(mut self, registry: Arc<IdRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Finish the definition without a base class.
    pub fn build(&self) -> StyledComponent {
        self.build_with_class("")
    }

    /// Finish the definition with `base_class_name` applied at this level.
    pub fn build_with_class(&self, base_class_name: impl AsRef<str>) -> StyledComponent {
        let config = fold(
            &self.target,
            &self.options,
            base_class_name.as_ref(),
            &self.registry,
        );

        let mut statics = Props::new();
        let parent = match &self.target {
            Target::Tag(_) => None,
            Target::Component(component) => {
                hoist_statics(component.statics(), &mut statics, RESERVED_STATICS);
                None
            }
            Target::Styled(component) => {
                hoist_statics(component.statics(), &mut statics, RESERVED_STATICS);
                Some(component.clone())
            }
        };

        StyledComponent::new(config, parent, statics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForwardProp;
    use crate::markup::{Element, TreeHost};
    use crate::tags;
    use crate::target::{HostComponent, NodeRef};
    use crate::value::{StyleMap, Value};
    use pretty_assertions::assert_eq;

    fn fresh() -> Arc<IdRegistry> {
        Arc::new(IdRegistry::new())
    }

    fn render(component: &StyledComponent, props: Props) -> Element {
        component.render(&TreeHost, props, None)
    }

    fn sizes() -> VariantTable {
        VariantTable::new().variant("size", [("small", "small"), ("big", "big")])
    }

    #[test]
    fn empty_target_fails_at_definition() {
        let err = styled("").unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"Cannot create styled component for component: """#
        );
    }

    #[test]
    fn accepts_tags_and_components() {
        assert!(styled("div").is_ok());
        assert!(styled(HostComponent::new("FunctionalComponent")).is_ok());
        assert!(styled(HostComponent::anonymous()).is_ok());
    }

    #[test]
    fn renders_nothing_extra_by_default() {
        let comp = tags::p().build();
        let element = render(&comp, Props::new());

        assert_eq!(element.tag(), Some("p"));
        assert_eq!(element.class(), None);
        assert_eq!(element.to_html(), "<p></p>");
    }

    #[test]
    fn applies_base_class() {
        let comp = tags::p().build_with_class("blue");

        assert_eq!(render(&comp, Props::new()).class(), Some("blue"));
    }

    #[test]
    fn variant_selects_class() {
        let comp = tags::button().variants(sizes()).build();

        let element = render(&comp, Props::new().with("size", "big"));
        assert_eq!(element.to_html(), r#"<button class="big"></button>"#);

        let element = render(&comp, Props::new());
        assert_eq!(element.to_html(), "<button></button>");
    }

    #[test]
    fn variants_with_base_class() {
        let comp = tags::button().variants(sizes()).build_with_class("btn");

        assert_eq!(
            render(&comp, Props::new().with("size", "big")).class(),
            Some("btn big")
        );
    }

    #[test]
    fn attrs_can_set_a_variant() {
        let comp = tags::button()
            .attrs(Props::new().with("size", "big"))
            .variants(sizes())
            .build();

        assert_eq!(render(&comp, Props::new()).class(), Some("big"));
    }

    #[test]
    fn number_variants() {
        let comp = tags::button()
            .variants(VariantTable::new().variant("borderWidth", [("2", "small"), ("3", "medium")]))
            .build();

        assert_eq!(
            render(&comp, Props::new().with("borderWidth", 2)).class(),
            Some("small")
        );
    }

    #[test]
    fn boolean_variants() {
        let comp = tags::button()
            .variants(VariantTable::new().variant("outlined", [("true", "outlined")]))
            .build();

        assert_eq!(render(&comp, Props::new()).class(), None);
        assert_eq!(render(&comp, Props::new().with("outlined", false)).class(), None);
        assert_eq!(
            render(&comp, Props::new().with("outlined", true)).class(),
            Some("outlined")
        );
    }

    #[test]
    fn extends_variants_of_wrapped_component() {
        let base = tags::button().variants(sizes()).build_with_class("btn");
        let button = styled(&base)
            .unwrap()
            .variants(VariantTable::new().variant("outlined", [("true", "outlined")]))
            .build();

        let element = render(
            &button,
            Props::new().with("size", "big").with("outlined", true),
        );

        assert_eq!(element.tag(), Some("button"));
        assert_eq!(element.class(), Some("btn big outlined"));
        assert_eq!(element.prop("size"), None);
        assert_eq!(element.prop("outlined"), None);
    }

    #[test]
    fn extends_a_variant_with_a_new_value() {
        let base = tags::button().variants(sizes()).build();
        let button = styled(&base)
            .unwrap()
            .variants(VariantTable::new().variant("size", [("medium", "medium")]))
            .build();

        assert_eq!(
            render(&button, Props::new().with("size", "medium")).class(),
            Some("medium")
        );
        assert_eq!(
            render(&button, Props::new().with("size", "big")).class(),
            Some("big")
        );
    }

    #[test]
    fn attrs_override_props() {
        let comp = tags::button()
            .attrs_fn(|p| {
                let kind = if p.is_set("$submit") { "submit" } else { "button" };
                Props::new().with("type", kind).with("tabIndex", 0)
            })
            .build();

        let element = render(&comp, Props::new().with("type", "reset").with("tabIndex", -1));
        assert_eq!(element.to_html(), r#"<button type="button" tabIndex="0"></button>"#);

        let element = render(&comp, Props::new().with("$submit", true));
        assert_eq!(element.to_html(), r#"<button type="submit" tabIndex="0"></button>"#);
    }

    #[test]
    fn later_attrs_win() {
        let comp = tags::button()
            .attrs_fn(|_| Props::new().with("type", "button").with("tabIndex", 0))
            .attrs_fn(|_| Props::new().with("type", "submit"))
            .build();

        let element = render(&comp, Props::new());

        assert_eq!(element.prop("type"), Some(&Value::from("submit")));
        assert_eq!(element.prop("tabIndex"), Some(&Value::from(0)));
    }

    #[test]
    fn attrs_fold_through_wrapping() {
        let parent = tags::button()
            .attrs_fn(|_| Props::new().with("type", "button").with("tabIndex", 0))
            .build();
        let child = styled(&parent)
            .unwrap()
            .attrs_fn(|_| Props::new().with("type", "submit"))
            .build();

        let element = render(&child, Props::new());

        assert_eq!(element.prop("type"), Some(&Value::from("submit")));
        assert_eq!(element.prop("tabIndex"), Some(&Value::from(0)));
    }

    #[test]
    fn merges_class_name_from_attrs() {
        let comp = tags::div()
            .attrs_fn(|_| Props::new().with("className", "bar baz"))
            .build_with_class("foo");

        assert_eq!(render(&comp, Props::new()).class(), Some("foo bar baz"));
        assert_eq!(
            render(&comp, Props::new().with("className", "qux")).class(),
            Some("foo qux bar baz")
        );
    }

    #[test]
    fn merges_class_name_from_folded_attrs() {
        let inner = tags::div()
            .attrs(Props::new().with("className", "foo"))
            .build();
        let comp = styled(&inner)
            .unwrap()
            .attrs_fn(|_| Props::new().with("className", "bar baz"))
            .build();

        assert_eq!(render(&comp, Props::new()).class(), Some("foo bar baz"));
    }

    #[test]
    fn merges_style_from_attrs() {
        let comp = tags::div()
            .attrs_fn(|_| {
                let style: StyleMap = [("color", "red"), ("background", "blue")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                Props::new().with("style", style)
            })
            .build();
        let style: StyleMap = [("color", "green"), ("borderStyle", "dotted")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let element = render(&comp, Props::new().with("style", style));

        assert_eq!(
            element.to_html(),
            r#"<div style="color: red; border-style: dotted; background: blue;"></div>"#
        );
    }

    #[test]
    fn filters_transient_props() {
        let inner = HostComponent::anonymous()
            .with_render(|props: &Props| Element::new("div", props.clone()));
        let comp = styled(inner).unwrap().build();

        assert_eq!(render(&comp, Props::new().with("$fg", "red")).to_html(), "<div></div>");
        assert_eq!(
            render(&comp, Props::new().with("fg", "red")).to_html(),
            r#"<div fg="red"></div>"#
        );
    }

    #[test]
    fn forwarded_as_becomes_as() {
        let comp_fn = HostComponent::new("Comp").with_render(|props: &Props| {
            let mut props = props.clone();
            let element_type = match props.remove("as") {
                Some(Value::String(tag)) => Target::Tag(tag),
                Some(Value::Target(target)) => target,
                _ => Target::tag("div"),
            };
            Element::new(element_type, props)
        });
        let comp = styled(comp_fn).unwrap().build();

        let element = render(&comp, Props::new().with("forwardedAs", "button"));

        assert_eq!(element.prop("as"), Some(&Value::from("button")));
        assert_eq!(element.to_html(), "<button></button>");
    }

    #[test]
    fn as_prop_changes_rendered_element() {
        let comp = tags::div().build();

        assert_eq!(render(&comp, Props::new().with("as", "span")).to_html(), "<span></span>");

        let override_comp = HostComponent::new("Override")
            .with_render(|props: &Props| Element::new("figure", props.clone()));
        let element = render(&comp, Props::new().with("as", Target::from(&override_comp)));
        assert_eq!(element.to_html(), "<figure></figure>");
    }

    #[test]
    fn attrs_as_wins_over_props() {
        let comp = tags::div()
            .attrs_fn(|_| Props::new().with("as", "header"))
            .build();

        assert_eq!(render(&comp, Props::new()).to_html(), "<header></header>");
        assert_eq!(
            render(&comp, Props::new().with("as", "span")).to_html(),
            "<header></header>"
        );
    }

    #[test]
    fn should_forward_prop_filters_for_elements_and_components() {
        let inner = HostComponent::new("InnerComp")
            .with_render(|props: &Props| Element::new("div", props.clone()));

        for target in [Target::tag("div"), Target::from(inner)] {
            let comp = styled(target)
                .unwrap()
                .with_config(StyledConfig::new().should_forward_prop(|prop, _| prop != "filterThis"))
                .build_with_class("foo");

            let element = render(
                &comp,
                Props::new().with("filterThis", "abc").with("passThru", "def"),
            );

            assert_eq!(element.prop("passThru"), Some(&Value::from("def")));
            assert_eq!(element.prop("filterThis"), None);
            assert_eq!(element.to_html(), r#"<div passThru="def" class="foo"></div>"#);
        }
    }

    #[test]
    fn should_forward_prop_composes() {
        let styled_div = tags::div()
            .with_config(StyledConfig::new().should_forward_prop(|prop, _| prop == "passThru"))
            .build_with_class("foo");
        let composed = styled(&styled_div)
            .unwrap()
            .with_config(StyledConfig::new().should_forward_prop(|_, _| true))
            .build();

        let element = render(
            &composed,
            Props::new().with("filterThis", true).with("passThru", true),
        );

        assert_eq!(element.prop("passThru"), Some(&Value::Bool(true)));
        assert_eq!(element.prop("filterThis"), None);
    }

    #[test]
    fn should_forward_prop_is_inherited() {
        let div1 = tags::div()
            .with_config(StyledConfig {
                should_forward_prop: Some(ForwardProp::deny(["color"])),
                ..Default::default()
            })
            .build();
        let div2 = styled(&div1).unwrap().build();

        let element = render(&div2, Props::new().with("color", "green").with("id", "test-2"));

        assert_eq!(element.to_html(), r#"<div id="test-2"></div>"#);
    }

    #[test]
    fn should_forward_prop_sees_as_target() {
        let comp = tags::div()
            .with_config(StyledConfig::new().should_forward_prop(|prop, element_type| {
                element_type.as_tag() == Some("a") && prop != "filterThis"
            }))
            .build();

        let element = render(
            &comp,
            Props::new()
                .with("as", "a")
                .with("href", "/foo")
                .with("filterThis", "abc"),
        );

        assert_eq!(element.to_html(), r#"<a href="/foo"></a>"#);
    }

    #[test]
    fn custom_elements_receive_class() {
        let comp = styled("custom-element").unwrap().build_with_class("red");

        let element = render(&comp, Props::new().with("data-testid", "Component"));

        assert_eq!(element.prop("class"), Some(&Value::from("red")));
        assert_eq!(element.prop("className"), None);
    }

    #[test]
    fn passes_full_class_name_to_wrapped_component() {
        let inner = HostComponent::new("InnerComponent")
            .with_render(|props: &Props| Element::new("div", props.clone()));
        let outer = styled(inner).unwrap().build_with_class("foo");

        let element = render(&outer, Props::new().with("className", "bar"));

        assert_eq!(element.to_html(), r#"<div class="foo bar"></div>"#);
    }

    #[test]
    fn forwards_ref() {
        let comp = tags::p().build_with_class("foo");
        let node_ref = NodeRef::new("paragraph");

        let element = comp.render(&TreeHost, Props::new(), Some(node_ref.clone()));

        assert_eq!(element.node_ref, Some(node_ref));
    }

    #[test]
    fn transfers_all_folded_classes() {
        let comp = tags::div().build_with_class("foo");
        let comp2 = styled(&comp).unwrap().build_with_class("bar");
        let comp3 = styled(&comp2).unwrap().build_with_class("baz");

        assert_eq!(comp.display_name(), "styled.div");
        assert_eq!(comp2.display_name(), "Styled(styled.div)");
        assert_eq!(comp3.display_name(), "Styled(Styled(styled.div))");

        assert_eq!(comp3.folded_component_classes(), ["foo", "bar"]);
        assert_eq!(render(&comp3, Props::new()).class(), Some("foo bar baz"));
    }

    #[test]
    fn target_folds_to_original() {
        let mut current = tags::section().build();
        for _ in 0..5 {
            current = styled(&current).unwrap().build();
        }

        assert_eq!(current.target(), &Target::tag("section"));
    }

    #[test]
    fn display_name_from_config() {
        let comp = tags::div()
            .with_config(StyledConfig::new().display_name("Comp"))
            .build();

        assert_eq!(comp.display_name(), "Comp");
    }

    #[test]
    fn component_ids_from_fresh_registry() {
        let registry = fresh();
        let comp = tags::div().registry(Arc::clone(&registry)).build();
        let comp2 = tags::div().registry(Arc::clone(&registry)).build();

        assert_eq!(comp.styled_component_id(), "sc-AxjAm");
        assert_eq!(comp2.styled_component_id(), "sc-AxirZ");
        assert_eq!(comp.to_string(), ".sc-AxjAm");
    }

    #[test]
    fn component_ids_from_display_name() {
        let registry = fresh();
        let comp = tags::div()
            .registry(Arc::clone(&registry))
            .with_config(StyledConfig::new().display_name("Comp"))
            .build();
        let comp2 = tags::div()
            .registry(Arc::clone(&registry))
            .with_config(StyledConfig::new().display_name("Comp2"))
            .build();

        assert_eq!(comp.styled_component_id(), "Comp-pYxFj");
        assert_eq!(comp2.styled_component_id(), "Comp2-jXawMF");
    }

    #[test]
    fn component_ids_supplied_or_combined() {
        let comp = tags::div()
            .with_config(StyledConfig::new().component_id("LOLOMG"))
            .build();
        let combined = tags::div()
            .with_config(StyledConfig::new().display_name("Comp").component_id("LOLOMG"))
            .build();

        assert_eq!(comp.styled_component_id(), "LOLOMG");
        assert_eq!(combined.styled_component_id(), "Comp-LOLOMG");
    }

    #[test]
    fn chained_config_keeps_last_value() {
        let comp = tags::div()
            .with_config(StyledConfig::new().display_name("dn-2").component_id("id-3"))
            .with_config(StyledConfig::new().display_name("dn-5").component_id("id-4"))
            .build();

        assert_eq!(comp.display_name(), "dn-5");
        assert_eq!(comp.styled_component_id(), "dn-5-id-4");
    }

    #[test]
    fn parent_component_id_prefixes_generated_id() {
        let comp = tags::div()
            .registry(fresh())
            .with_config(StyledConfig::new().parent_component_id("Parent-abc"))
            .build();

        assert_eq!(comp.styled_component_id(), "Parent-abc-sc-AxjAm");
    }

    #[test]
    fn default_props_reach_attrs_and_variants() {
        let comp = tags::button()
            .attrs_fn(|p| {
                let color = p.get_str("color").unwrap_or("#000").to_string();
                Props::new().with("color", color)
            })
            .variants(sizes())
            .build();
        comp.set_default_props(Props::new().with("color", "red").with("size", "big"));

        let element = render(&comp, Props::new());

        assert_eq!(element.to_html(), r#"<button color="red" class="big"></button>"#);
    }

    #[test]
    fn default_props_do_not_override_given_props() {
        let comp = tags::button().variants(sizes()).build();
        comp.set_default_props(Props::new().with("size", "big"));

        assert_eq!(
            render(&comp, Props::new().with("size", "small")).class(),
            Some("small")
        );
        assert_eq!(
            render(&comp, Props::new().with("size", Value::Undefined)).class(),
            Some("big")
        );
    }

    #[test]
    fn default_props_merge_with_wrapped_component() {
        let style: StyleMap = [("color", "red"), ("margin", "0")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let base = tags::div().build();
        base.set_default_props(Props::new().with("title", "base").with("style", style));

        let child = styled(&base).unwrap().build();
        let override_style: StyleMap = [("color", "blue")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        child.set_default_props(Props::new().with("style", override_style));

        let defaults = child.default_props().unwrap();
        assert_eq!(defaults.get_str("title"), Some("base"));
        let style = defaults.get("style").and_then(Value::as_style).unwrap();
        assert_eq!(style.get("color").map(String::as_str), Some("blue"));
        assert_eq!(style.get("margin").map(String::as_str), Some("0"));
    }

    #[test]
    fn wrapping_inherits_default_props() {
        let base = tags::button().variants(sizes()).build_with_class("btn");
        base.set_default_props(Props::new().with("size", "big"));

        let child = styled(&base).unwrap().build();

        assert_eq!(child.default_props(), Some(Props::new().with("size", "big")));
        assert_eq!(
            render(&child, Props::new()).to_html(),
            r#"<button class="btn big"></button>"#
        );
    }

    #[test]
    fn wrapping_without_defaults_has_none() {
        let base = tags::button().build();
        let child = styled(&base).unwrap().build();

        assert_eq!(child.default_props(), None);
    }

    #[test]
    fn default_props_on_plain_target_are_used_directly() {
        let comp = tags::div().build();
        assert_eq!(comp.default_props(), None);

        comp.set_default_props(Props::new().with("title", "x"));
        assert_eq!(comp.default_props(), Some(Props::new().with("title", "x")));
    }

    #[test]
    fn hoists_non_reserved_statics() {
        let inner = HostComponent::new("Page")
            .with_static("route", "/home")
            .with_static("displayName", "Ignored")
            .with_static("target", "Ignored");
        let comp = styled(inner).unwrap().build();
        let wrapped = styled(&comp).unwrap().build();

        assert_eq!(comp.statics(), &Props::new().with("route", "/home"));
        assert_eq!(wrapped.statics(), &Props::new().with("route", "/home"));
        assert_eq!(comp.display_name(), "Styled(Page)");
    }

    #[test]
    fn tags_do_not_hoist() {
        assert!(tags::div().build().statics().is_empty());
    }

    #[test]
    fn renders_styled_component_through_as() {
        let link = tags::a().build_with_class("link");
        let comp = tags::button().build_with_class("btn");

        let element = render(&comp, Props::new().with("as", &link).with("href", "/x"));

        assert_eq!(element.to_html(), r#"<a href="/x" class="link btn"></a>"#);
    }
}
