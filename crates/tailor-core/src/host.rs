//! Boundary with the host UI framework.

use crate::target::{NodeRef, Target};
use crate::value::Props;

/// Static fields owned by styled components. Never copied between components.
pub const RESERVED_STATICS: &[&str] = &[
    "attrs",
    "baseClassName",
    "defaultProps",
    "displayName",
    "foldedComponentClasses",
    "shouldForwardProp",
    "styledComponentId",
    "target",
    "variants",
];

/// Element creation, as provided by the host framework.
pub trait Host {
    /// Whatever the framework produces for one element.
    type Output;

    /// Create an element of `element_type` with `props`, attaching `node_ref`.
    fn create_element(
        &self,
        element_type: &Target,
        props: Props,
        node_ref: Option<NodeRef>,
    ) -> Self::Output;
}

/// Copy static fields from `source` onto `target`, skipping `excluded` keys.
pub fn hoist_statics(source: &Props, target: &mut Props, excluded: &[&str]) {
    for (key, value) in source {
        if !excluded.contains(&key.as_str()) {
            target.insert(key.as_str(), value.clone());
        }
    }
}
