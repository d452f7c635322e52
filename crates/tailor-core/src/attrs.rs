//! Render-time attrs resolution.

use crate::config::AttrsEntry;
use crate::value::{Props, Value};

/// Apply every attrs stage, in order, on top of the incoming props.
///
/// Function stages see the props accumulated by earlier stages. `className`
/// values are joined with a space, `style` maps are merged, and every other
/// key is overwritten.
pub fn resolve_attrs(entries: &[AttrsEntry], props: Props) -> Props {
    entries.iter().fold(props, |mut context, entry| {
        let resolved = entry.resolve(&context);
        for (key, value) in resolved.iter() {
            merge_attr(&mut context, key, value.clone());
        }
        context
    })
}

fn merge_attr(context: &mut Props, key: &str, value: Value) {
    match key {
        "className" => {
            let joined = join_class_values(context.get(key), value);
            context.insert(key, joined);
        }
        "style" => {
            let merged = match (context.get(key), value) {
                (Some(Value::Style(existing)), Value::Style(style)) => {
                    let mut merged = existing.clone();
                    merged.extend(style);
                    Value::Style(merged)
                }
                (_, value) => value,
            };
            context.insert(key, merged);
        }
        _ => {
            context.insert(key, value);
        }
    }
}

/// Join two class values with a space, skipping empty operands.
fn join_class_values(current: Option<&Value>, next: Value) -> Value {
    let current = current.and_then(Value::class_text).map(|c| c.into_owned());
    let addition = next.class_text().map(|c| c.into_owned());

    match (current, addition) {
        (Some(a), Some(b)) => Value::String(format!("{a} {b}")),
        (Some(a), None) => Value::String(a),
        (None, _) => next,
    }
}
