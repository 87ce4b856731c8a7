use std::collections::BTreeMap;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Request headers for the next request.
///
/// Names compare case-insensitively; re-adding a header replaces it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self {
            entries: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
        }
    }
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some(entry) => *entry = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_json_content_type() {
        let h = HeaderSet::new();
        assert_eq!(h.to_map().len(), 1);
        assert_eq!(h.get("content-type"), Some("application/json"));
    }

    #[test]
    fn insert_replaces_case_insensitively() {
        let mut h = HeaderSet::new();
        h.insert("content-type", "text/plain");
        assert_eq!(h.to_map().len(), 1);
        assert_eq!(h.get(CONTENT_TYPE), Some("text/plain"));
    }

    #[test]
    fn taking_leaves_the_baseline_behind() {
        let mut h = HeaderSet::new();
        h.insert("X-My-Header", "bacon");
        h.insert(AUTHORIZATION, "Bearer t");
        let sent = std::mem::take(&mut h);
        assert!(sent.contains(AUTHORIZATION));
        assert_eq!(h, HeaderSet::default());
        assert!(!h.contains(AUTHORIZATION));
    }
}
