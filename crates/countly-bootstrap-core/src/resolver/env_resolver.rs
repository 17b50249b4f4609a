//! Environment lookup with a fallback value

use crate::env::EnvMap;

/// Look up `name` in `env`, or return `default` when it is unset
///
/// Every `\r` and `\n` is removed from a found value, wherever it occurs.
/// The default is returned untouched. File secrets are deliberately *not*
/// treated this way (see `FileSecretStore`).
///
/// # Example
///
/// ```
/// use countly_bootstrap_core::env::EnvMap;
/// use countly_bootstrap_core::resolver::resolve_env;
///
/// let env = EnvMap::new().with("MONGODB_DATABASE", "countly\n");
/// assert_eq!(resolve_env(&env, "MONGODB_DATABASE", ""), "countly");
/// ```
pub fn resolve_env(env: &EnvMap, name: &str, default: &str) -> String {
    match env.get(name) {
        Some(value) => strip_line_endings(value),
        None => default.to_string(),
    }
}

/// Remove all line-ending characters from `value`
fn strip_line_endings(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_returns_default() {
        let env = EnvMap::new();
        assert_eq!(resolve_env(&env, "MONGODB_DATABASE", ""), "");
        assert_eq!(resolve_env(&env, "ANYTHING", "fallback\n"), "fallback\n");
    }

    #[test]
    fn test_set_value_is_stripped() {
        let env = EnvMap::new().with("MONGODB_DATABASE", "countly\r\n");
        assert_eq!(resolve_env(&env, "MONGODB_DATABASE", "x"), "countly");
    }

    #[test]
    fn test_strips_every_line_ending() {
        let env = EnvMap::new().with("DB", "cou\r\nntly\n");
        assert_eq!(resolve_env(&env, "DB", ""), "countly");
    }

    #[test]
    fn test_keeps_other_whitespace() {
        let env = EnvMap::new().with("DB", " countly\t");
        assert_eq!(resolve_env(&env, "DB", ""), " countly\t");
    }

    #[test]
    fn test_set_but_empty_wins_over_default() {
        let env = EnvMap::new().with("MONGODB_DATABASE", "");
        assert_eq!(resolve_env(&env, "MONGODB_DATABASE", "countly"), "");
    }
}
