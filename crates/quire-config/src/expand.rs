//! `${VAR}` and `${VAR:-default}` references in config strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Variable named by a `${VAR}` reference that has no value and no default.
struct Unset(String);

/// Expand references in `value` against the process environment.
///
/// Only the braced form is recognized, so `$path` segments in URLs pass
/// through untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| {
        lookup(name).map(Some).ok_or_else(|| Unset(name.to_owned()))
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })?;
    Ok(Cow::into_owned(expanded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(name: &str) -> Option<String> {
        match name {
            "QUIRE_HOST" => Some("docs.example.org".to_owned()),
            "QUIRE_OUT" => Some("public".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_set_variables_expand_in_place() {
        assert_eq!(
            expand_with("https://${QUIRE_HOST}/${QUIRE_OUT}", "site.base_url", env).unwrap(),
            "https://docs.example.org/public"
        );
    }

    #[test]
    fn test_default_only_used_when_unset() {
        assert_eq!(expand_with("${QUIRE_OUT:-dist}", "output.dir", env).unwrap(), "public");
        assert_eq!(expand_with("${QUIRE_NOPE:-dist}", "output.dir", env).unwrap(), "dist");
        assert_eq!(expand_with("${QUIRE_NOPE:-}", "site.base_url", env).unwrap(), "");
    }

    #[test]
    fn test_unset_without_default_names_field() {
        let err = expand_with("${QUIRE_NOPE}/site.json", "input.bundle", env).unwrap_err();
        assert_eq!(
            err.to_string(),
            ConfigError::EnvVar {
                field: "input.bundle".to_owned(),
                message: "${QUIRE_NOPE} not set".to_owned(),
            }
            .to_string()
        );
    }

    #[test]
    fn test_unbraced_dollar_is_literal() {
        assert_eq!(
            expand_with("https://example.org/$page", "site.base_url", env).unwrap(),
            "https://example.org/$page"
        );
    }

    #[test]
    fn test_process_environment_lookup() {
        assert_eq!(expand_env("dist", "output.dir").unwrap(), "dist");
        assert!(expand_env("${QUIRE_SURELY_UNSET_VARIABLE}", "output.dir").is_err());
    }
}
