//! Render-time variant resolution.

use crate::config::VariantTable;
use crate::value::Props;

/// Build the generated class string: the base class followed by one class
/// per prop that matches an entry of the merged variant table.
///
/// Props are visited in their resolved order. Values without a matching
/// entry contribute nothing.
pub fn resolve_variants(base_class_name: &str, variants: &VariantTable, props: &Props) -> String {
    let mut class_names = vec![base_class_name.to_string()];

    for (prop, value) in props {
        let Some(entries) = variants.get(prop) else {
            continue;
        };

        if let Some(class_name) = value.variant_key().and_then(|key| entries.get(&*key)) {
            class_names.push(class_name.clone());
        }
    }

    class_names.retain(|c| !c.is_empty());
    class_names.join(" ")
}
