//! Environment snapshot.
//!
//! Discovery and resolution read from an [`EnvVars`] value instead of the
//! live process environment, so tests can feed arbitrary mappings without
//! touching process globals.

/// Ordered snapshot of environment variables.
///
/// Iteration order is the order pairs were supplied. Inserting a key that
/// already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: Vec<(String, String)>,
}

impl EnvVars {
    /// Snapshot the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Set `key` to `value`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((key, value)),
        }
    }

    /// Raw lookup. Returns empty values as-is.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Lookup treating empty values as unset.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Keys in snapshot order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(k, _)| k.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for EnvVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = EnvVars::default();
        for (k, v) in iter {
            env.insert(k, v);
        }
        env
    }
}
