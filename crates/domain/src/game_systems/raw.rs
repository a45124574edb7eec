//! Tolerant readers over loosely shaped sheet JSON.
//!
//! Every accessor returns a default instead of failing: wrong types read as
//! absent, non-object list elements read as all-default entries.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Raw<'a>(Option<&'a Map<String, Value>>);

impl<'a> Raw<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self(value.as_object())
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key))
    }

    /// Nested object, or an empty reader.
    pub(crate) fn object(&self, key: &str) -> Raw<'a> {
        Raw(self.get(key).and_then(Value::as_object))
    }

    /// Numeric field clamped into `i32`; floats are truncated.
    pub(crate) fn int(&self, key: &str) -> Option<i32> {
        let value = self.get(key)?;
        let wide = match value.as_i64() {
            Some(n) => n,
            None => {
                let f = value.as_f64().filter(|f| f.is_finite())?;
                f as i64
            }
        };
        Some(wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    pub(crate) fn int_or(&self, key: &str, default: i32) -> i32 {
        self.int(key).unwrap_or(default)
    }

    /// String field, or `""`.
    pub(crate) fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Non-empty string field.
    pub(crate) fn opt_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Array elements as readers; absent or non-array reads as empty.
    pub(crate) fn list(&self, key: &str) -> impl Iterator<Item = Raw<'a>> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.as_slice())
            .unwrap_or_default()
            .iter()
            .map(Raw::new)
    }

    /// String elements of an array, skipping anything else.
    pub(crate) fn strings(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_types_read_as_defaults() {
        let value = json!({ "n": "12", "s": 5, "b": "yes", "l": {} });
        let raw = Raw::new(&value);
        assert_eq!(raw.int("n"), None);
        assert_eq!(raw.text("s"), "");
        assert!(!raw.flag("b"));
        assert_eq!(raw.list("l").count(), 0);
    }

    #[test]
    fn numbers_are_clamped_and_truncated() {
        let value = json!({ "big": 1e12, "neg": -5_000_000_000i64, "f": 12.9 });
        let raw = Raw::new(&value);
        assert_eq!(raw.int("big"), Some(i32::MAX));
        assert_eq!(raw.int("neg"), Some(i32::MIN));
        assert_eq!(raw.int("f"), Some(12));
    }

    #[test]
    fn non_object_root_reads_empty() {
        let value = json!([1, 2, 3]);
        let raw = Raw::new(&value);
        assert_eq!(raw.int_or("x", 7), 7);
        assert_eq!(raw.object("y").text("z"), "");
    }

    #[test]
    fn list_elements_default_independently() {
        let value = json!({ "items": [{ "name": "a" }, 3, null] });
        let names: Vec<String> = Raw::new(&value).list("items").map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["a", "", ""]);
    }

    #[test]
    fn strings_skip_non_strings() {
        let value = json!({ "tags": ["マヒ", 1, "呪い"] });
        assert_eq!(Raw::new(&value).strings("tags"), vec!["マヒ", "呪い"]);
    }
}
