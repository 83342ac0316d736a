//! Pure operations on a parsed translation document.
//!
//! A document is a JSON object whose leaves are strings. Keys are addressed
//! with dotted paths (`site.title`). Nothing here touches the filesystem.

use crate::domain::error::HutirError;
use crate::domain::model::{join_path, LocalizedString, ResourceCategory, ResourceEntry};
use serde_json::{Map, Value};

/// Parse a document, ignoring a leading UTF-8 byte-order mark.
pub fn parse(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_bom(raw))
}

pub fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Walk `key` segment by segment and return the string leaf, if any.
pub fn lookup<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    let mut current = doc;
    for part in key.split('.') {
        let Value::Object(map) = current else {
            tracing::debug!("Element is not an object when looking for part: {}", part);
            return None;
        };
        match map.get(part) {
            Some(next) => current = next,
            None => {
                tracing::debug!("Could not find property: {}", part);
                return None;
            }
        }
    }
    current.as_str()
}

/// Flatten depth-first in document order, one entry per string leaf.
pub fn flatten(doc: &Value) -> Vec<LocalizedString> {
    let mut out = Vec::new();
    flatten_into(doc, "", &mut out);
    out
}

fn flatten_into(element: &Value, prefix: &str, out: &mut Vec<LocalizedString>) {
    let Value::Object(map) = element else {
        return;
    };
    for (name, value) in map {
        let key = join_path(prefix, name);
        match value {
            Value::Object(_) => flatten_into(value, &key, out),
            Value::String(s) => out.push(LocalizedString::new(key, s.clone())),
            // Arrays, numbers, booleans and null are not translations
            _ => {}
        }
    }
}

/// Set the leaf at `key`, requiring every intermediate segment to exist and
/// be an object. Missing branches are never created.
pub fn set_leaf(doc: &mut Value, key: &str, value: &str) -> Result<(), HutirError> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(HutirError::InvalidKeyPath(key.to_string()));
    }
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| HutirError::InvalidKeyPath(key.to_string()))?;

    let mut current: &mut Map<String, Value> = doc
        .as_object_mut()
        .ok_or_else(|| HutirError::InvalidKeyPath(key.to_string()))?;
    for part in parents {
        current = match current.get_mut(*part) {
            Some(Value::Object(next)) => next,
            _ => return Err(HutirError::InvalidKeyPath(key.to_string())),
        };
    }
    current.insert((*last).to_string(), Value::String(value.to_string()));
    Ok(())
}

/// Serialize with two-space indentation. Non-ASCII text is written as-is.
pub fn to_pretty(doc: &Value) -> Result<String, HutirError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Positional substitution of `{0}`, `{1}`, ... with `{{` / `}}` escapes.
///
/// Returns `None` for a malformed template or an index without an argument.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => index.push(d),
                        _ => return None,
                    }
                }
                let arg = args.get(index.parse::<usize>().ok()?)?;
                out.push_str(arg.as_ref());
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            _ => out.push(c),
        }
    }
    Some(out)
}

/// Categorized tree used by the admin editor.
pub fn build_view(doc: &Value) -> Vec<ResourceCategory> {
    build_categories(doc, "")
}

fn build_categories(element: &Value, parent_path: &str) -> Vec<ResourceCategory> {
    let Value::Object(map) = element else {
        return Vec::new();
    };
    map.iter()
        .map(|(name, value)| {
            let mut category = ResourceCategory {
                key: name.clone(),
                path: parent_path.to_string(),
                ..Default::default()
            };
            match value {
                Value::Object(_) => {
                    category.categories = build_categories(value, &join_path(parent_path, name));
                }
                Value::String(s) => category.resources.push(ResourceEntry {
                    key: name.clone(),
                    value: s.clone(),
                    path: parent_path.to_string(),
                }),
                _ => {}
            }
            category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_skips_byte_order_mark() {
        let doc = parse("\u{feff}{\"site\":{\"title\":\"Hutir\"}}").unwrap();
        assert_eq!(lookup(&doc, "site.title"), Some("Hutir"));
    }

    #[test]
    fn lookup_walks_nested_objects() {
        let doc = json!({"site": {"title": "Hutir", "menu": {"home": "Home"}}});
        assert_eq!(lookup(&doc, "site.title"), Some("Hutir"));
        assert_eq!(lookup(&doc, "site.menu.home"), Some("Home"));
        assert_eq!(lookup(&doc, "site.missing"), None);
        assert_eq!(lookup(&doc, "site.title.deeper"), None);
        assert_eq!(lookup(&doc, "site"), None);
    }

    #[test]
    fn flatten_keeps_document_order_and_skips_non_strings() {
        let doc = parse(r#"{"b":"2","a":{"z":"26","y":{"x":"24"}},"n":5,"l":["x"],"c":"3"}"#)
            .unwrap();
        let keys: Vec<String> = flatten(&doc).into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["b", "a.z", "a.y.x", "c"]);
    }

    #[test]
    fn set_leaf_replaces_and_adds_under_existing_parent() {
        let mut doc = json!({"site": {"title": "Hutir"}});
        set_leaf(&mut doc, "site.title", "New").unwrap();
        set_leaf(&mut doc, "site.subtitle", "Sub").unwrap();
        assert_eq!(doc, json!({"site": {"title": "New", "subtitle": "Sub"}}));
    }

    #[test]
    fn set_leaf_never_creates_branches() {
        let mut doc = json!({"site": {"title": "Hutir"}});
        assert!(matches!(
            set_leaf(&mut doc, "footer.text", "x"),
            Err(HutirError::InvalidKeyPath(_))
        ));
        assert!(matches!(
            set_leaf(&mut doc, "site.title.deeper", "x"),
            Err(HutirError::InvalidKeyPath(_))
        ));
        assert!(matches!(
            set_leaf(&mut doc, "site..title", "x"),
            Err(HutirError::InvalidKeyPath(_))
        ));
        assert_eq!(doc, json!({"site": {"title": "Hutir"}}));
    }

    #[test]
    fn format_positional_substitutes_and_escapes() {
        assert_eq!(
            format_positional("{0} of {1}", &["3", "10"]).as_deref(),
            Some("3 of 10")
        );
        assert_eq!(
            format_positional("{{literal}} {0}", &["x"]).as_deref(),
            Some("{literal} x")
        );
        assert_eq!(format_positional("{1}", &["only one"]), None);
        assert_eq!(format_positional("{oops}", &["x"]), None);
        assert_eq!(format_positional("dangling }", &["x"]), None);
    }

    #[test]
    fn build_view_groups_by_object() {
        let doc = json!({"site": {"title": "Hutir", "nav": {"home": "Home"}}, "footer": "F"});
        let view = build_view(&doc);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].full_path(), "site");
        assert_eq!(view[0].categories[0].resources[0].full_key(), "site.title");
        assert_eq!(view[0].categories[1].categories[0].resources[0].full_key(), "site.nav.home");
        assert_eq!(view[1].resources[0].full_key(), "footer");
    }
}
