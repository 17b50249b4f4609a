//! Snapshot of process environment variables
//!
//! Captured once at the entry point and passed explicitly into the assembler,
//! the extenders and the provisioner, so nothing below the binaries reads the
//! real process environment.

use std::collections::BTreeMap;

/// Ordered map of environment variable names to values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Builder-style insert, mostly for tests
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let env = EnvMap::new().with("A", "1").with("B", "2");
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("C"), None);
        assert!(env.contains("B"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_iter_is_sorted() {
        let env: EnvMap = vec![("Z", "last"), ("A", "first")].into_iter().collect();
        let names: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["A", "Z"]);
    }

    #[test]
    fn test_from_process_sees_path() {
        // PATH is set in any reasonable test environment
        let env = EnvMap::from_process();
        assert_eq!(env.get("PATH").is_some(), std::env::var("PATH").is_ok());
    }
}
