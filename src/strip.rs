use serde_json::Value;

/// Removes a literal path prefix from manifest strings.
///
/// Only the first occurrence is removed from each string, so
/// `"dist/dist/a.js"` with prefix `"dist/"` becomes `"dist/a.js"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixStrip {
    prefix: String,
}

impl PrefixStrip {
    /// Returns `None` for an empty prefix, which would match nothing useful.
    pub fn new(prefix: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            None
        } else {
            Some(Self { prefix })
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn strip_str(&self, s: &str) -> String {
        s.replacen(&self.prefix, "", 1)
    }

    /// Strips `value` only if it is a string. Returns whether it was one.
    pub fn strip_string_value(&self, value: &mut Value) -> bool {
        match value {
            Value::String(s) => {
                *s = self.strip_str(s);
                true
            }
            _ => false,
        }
    }

    /// Strips every string found inside the arrays and objects under
    /// `value`. A bare string at the root is not inside anything and is
    /// left as it is, as are structure and non-string leaves.
    pub fn strip_tree(&self, value: &mut Value) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.strip_child(item);
                }
            }
            Value::Object(map) => {
                for (_, item) in map.iter_mut() {
                    self.strip_child(item);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    fn strip_child(&self, value: &mut Value) {
        if !self.strip_string_value(value) {
            self.strip_tree(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strip(prefix: &str) -> PrefixStrip {
        PrefixStrip::new(prefix).unwrap()
    }

    #[test]
    fn test_removes_first_occurrence_only() {
        let s = strip("dist/");
        assert_eq!(s.strip_str("dist/index.js"), "index.js");
        assert_eq!(s.strip_str("./dist/index.js"), "./index.js");
        assert_eq!(s.strip_str("dist/dist/index.js"), "dist/index.js");
        assert_eq!(s.strip_str("lib/index.js"), "lib/index.js");
    }

    #[test]
    fn test_strip_is_idempotent_for_single_occurrence() {
        let s = strip("dist/foo/");
        let once = s.strip_str("./dist/foo/index.js");
        assert_eq!(s.strip_str(&once), once);
    }

    #[test]
    fn test_empty_prefix_is_absent() {
        assert!(PrefixStrip::new("").is_none());
    }

    #[test]
    fn test_strip_string_value_ignores_non_strings() {
        let s = strip("dist/");

        let mut value = json!(42);
        assert!(!s.strip_string_value(&mut value));
        assert_eq!(value, json!(42));

        let mut value = json!("dist/index.js");
        assert!(s.strip_string_value(&mut value));
        assert_eq!(value, json!("index.js"));
    }

    #[test]
    fn test_strip_tree_nested_exports() {
        let s = strip("dist/foo/");
        let mut exports = json!({
            ".": { "import": "./dist/foo/index.js" }
        });

        s.strip_tree(&mut exports);

        assert_eq!(exports, json!({ ".": { "import": "./index.js" } }));
    }

    #[test]
    fn test_strip_tree_mixed_arrays_and_leaves() {
        let s = strip("dist/");
        let mut types_versions = json!({
            ">=4.0": {
                "*": ["dist/types/*", { "deep": ["dist/x.d.ts", null, true, 3] }]
            }
        });

        s.strip_tree(&mut types_versions);

        assert_eq!(
            types_versions,
            json!({
                ">=4.0": {
                    "*": ["types/*", { "deep": ["x.d.ts", null, true, 3] }]
                }
            })
        );
    }

    #[test]
    fn test_strip_tree_leaves_root_string_alone() {
        let s = strip("dist/");
        let mut exports = json!("./dist/index.js");
        s.strip_tree(&mut exports);
        assert_eq!(exports, json!("./dist/index.js"));
    }

    #[test]
    fn test_strip_tree_strips_strings_directly_in_root_array() {
        let s = strip("dist/");
        let mut files = json!(["dist/a.js", "dist/b.js"]);
        s.strip_tree(&mut files);
        assert_eq!(files, json!(["a.js", "b.js"]));
    }
}
