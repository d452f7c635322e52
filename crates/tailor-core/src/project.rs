//! Render-time prop projection: what reaches the rendered element.

use crate::config::{ForwardProp, VariantTable};
use crate::target::Target;
use crate::value::Props;

/// Props starting with this character are styling-only.
pub const TRANSIENT_PREFIX: char = '$';

/// Decide, per resolved prop, whether it is forwarded, dropped or remapped.
///
/// Dropped: undefined values, variant props, transient props and `as`.
/// `forwardedAs` is forwarded as `as`. `className` is left to the emitter,
/// which folds it into the final class string. Everything else is kept if
/// the forwarding predicate (when configured) allows it.
pub fn project(
    context: &Props,
    variants: &VariantTable,
    should_forward_prop: Option<&ForwardProp>,
    element_type: &Target,
) -> Props {
    let mut forwarded = Props::new();

    for (key, value) in context {
        if value.is_undefined() || variants.contains_prop(key) {
            continue;
        }

        if key.starts_with(TRANSIENT_PREFIX) || key == "as" || key == "className" {
            continue;
        }

        if key == "forwardedAs" {
            forwarded.insert("as", value.clone());
        } else if should_forward_prop.map_or(true, |f| f.allows(key, element_type)) {
            forwarded.insert(key.as_str(), value.clone());
        }
    }

    forwarded
}
