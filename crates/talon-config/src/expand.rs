//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Text outside `${...}` references is copied unchanged, so a bare `$VAR`
/// stays literal. An unset variable without a default is an error naming
/// the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        expanded.push_str(&rest[..start]);
        let resolved = shellexpand::env_with_context(&rest[start..end], lookup).map_err(|e| {
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} not set", e.cause.var_name),
            }
        })?;
        expanded.push_str(&resolved);
        rest = &rest[end..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

fn lookup(var: &str) -> Result<Option<String>, LookupError> {
    std::env::var(var).map(Some).map_err(|_| LookupError {
        var_name: var.to_owned(),
    })
}

/// Unset variable referenced without a default.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("/talon_hunt_framework_docs/", "site.base").unwrap(),
            "/talon_hunt_framework_docs/"
        );
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("$HOME/logo.svg", "theme.logo").unwrap(), "$HOME/logo.svg");
    }

    #[test]
    fn test_bare_dollar_unchanged_next_to_reference() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TALON_EXPAND_MIXED", "main");
        }
        let result = expand_env("/x/${TALON_EXPAND_MIXED}/$HOME", "site.base").unwrap();
        assert_eq!(result, "/x/main/$HOME");
        unsafe {
            std::env::remove_var("TALON_EXPAND_MIXED");
        }
    }

    #[test]
    fn test_unterminated_reference_literal() {
        assert_eq!(expand_env("/x/${OPEN", "site.base").unwrap(), "/x/${OPEN");
    }

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TALON_EXPAND_BASE", "/preview/");
        }
        let result = expand_env("${TALON_EXPAND_BASE}", "site.base").unwrap();
        assert_eq!(result, "/preview/");
        unsafe {
            std::env::remove_var("TALON_EXPAND_BASE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TALON_EXPAND_UNSET");
        }
        let result = expand_env("${TALON_EXPAND_UNSET:-/}", "site.base").unwrap();
        assert_eq!(result, "/");
    }

    #[test]
    fn test_expand_embedded() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TALON_EXPAND_BRANCH", "main");
        }
        let result = expand_env("/docs/${TALON_EXPAND_BRANCH}/", "site.base").unwrap();
        assert_eq!(result, "/docs/main/");
        unsafe {
            std::env::remove_var("TALON_EXPAND_BRANCH");
        }
    }

    #[test]
    fn test_missing_var_error_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TALON_EXPAND_MISSING");
        }
        let err = expand_env("${TALON_EXPAND_MISSING}", "theme.logo").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("theme.logo"));
        assert!(msg.contains("${TALON_EXPAND_MISSING} not set"));
    }
}
