//! Ordered multimap over an urlencoded form body. The form page posts some
//! keys several times (multiselect widgets, `[]` suffix convention), so the
//! raw pair list is kept instead of collapsing into a map.

#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values submitted under `key`, in submission order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Joins all values for a multi-valued key with `", "`. An empty join
    /// collapses to `None` so the entry can be omitted downstream.
    pub fn join_multi(&self, key: &str) -> Option<String> {
        let joined = self.get_all(key).join(", ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Replaces the first value of `key`, or appends the pair if absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key.to_string(), value)),
        }
    }
}
