//! Phase 4: External Merge
//!
//! After the main document is built, every `#base` external acts as a
//! lower-priority source for the main document's top-level keys: the
//! external's sub-object is taken as a base and the main document's entries
//! are overlaid on top. The overlay is one level deep; nested keys come
//! along wholesale with whichever side wins at that level.

use crate::value::{Object, Value};

/// Fold the externals into `root`, in the order they were encountered. Only
/// top-level keys present in `root` participate, and only when both sides
/// hold objects; the main document's entries always win on conflict.
pub(crate) fn fold_externals(mut root: Object, externals: &[Value]) -> Object {
    if externals.is_empty() {
        return root;
    }

    let keys: Vec<String> = root.keys().cloned().collect();
    for key in keys {
        for external in externals {
            let Some(base) = external
                .as_object()
                .and_then(|obj| obj.get(&key))
                .and_then(Value::as_object)
            else {
                continue;
            };
            let merged = {
                let Some(ours) = root.get(&key).and_then(Value::as_object) else {
                    continue;
                };
                let mut merged = base.clone();
                for (k, v) in ours {
                    merged.insert(k.clone(), v.clone());
                }
                merged
            };
            // Replaces in place, so the key keeps its document position.
            root.insert(key.clone(), Value::Object(merged));
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(entries: &[(&str, Value)]) -> Object {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_main_document_wins() {
        let root = obj(&[("a", Value::Object(obj(&[("x", Value::from("1"))])))]);
        let external = Value::Object(obj(&[(
            "a",
            Value::Object(obj(&[("x", Value::from("0")), ("y", Value::from("2"))])),
        )]));

        let merged = fold_externals(root, &[external]);
        let a = merged.get("a").unwrap().as_object().unwrap();
        assert_eq!(a.get("x").unwrap().as_str(), Some("1"));
        assert_eq!(a.get("y").unwrap().as_str(), Some("2"));
    }

    #[test]
    fn test_external_only_keys_are_ignored() {
        let root = obj(&[("a", Value::Object(Object::new()))]);
        let external = Value::Object(obj(&[("b", Value::Object(Object::new()))]));

        let merged = fold_externals(root, &[external]);
        assert!(merged.get("b").is_none());
    }

    #[test]
    fn test_scalar_sides_do_not_merge() {
        let root = obj(&[("a", Value::from("main"))]);
        let external = Value::Object(obj(&[(
            "a",
            Value::Object(obj(&[("x", Value::from("0"))])),
        )]));

        let merged = fold_externals(root, &[external]);
        assert_eq!(merged.get("a").unwrap().as_str(), Some("main"));
    }

    #[test]
    fn test_earlier_externals_take_precedence() {
        let root = obj(&[("a", Value::Object(Object::new()))]);
        let first = Value::Object(obj(&[(
            "a",
            Value::Object(obj(&[("x", Value::from("first"))])),
        )]));
        let second = Value::Object(obj(&[(
            "a",
            Value::Object(obj(&[("x", Value::from("second")), ("y", Value::from("2"))])),
        )]));

        let merged = fold_externals(root, &[first, second]);
        let a = merged.get("a").unwrap().as_object().unwrap();
        assert_eq!(a.get("x").unwrap().as_str(), Some("first"));
        assert_eq!(a.get("y").unwrap().as_str(), Some("2"));
    }
}
