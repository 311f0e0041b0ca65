//! `${VAR}` substitution over a config value tree.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are matched. `$${VAR}` is an
//! escape and becomes the literal text `${VAR}`.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$?)\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value, MissingEnvVarError> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute references from `env`. Unset and empty variables are errors.
pub fn resolve_env_vars_with(
    value: &Value,
    env: &HashMap<String, String>,
) -> Result<Value, MissingEnvVarError> {
    let mut resolved = value.clone();
    substitute_in_place(&mut resolved, env, "")?;
    Ok(resolved)
}

/// `path` is the dotted location of `value`, used in error messages.
fn substitute_in_place(
    value: &mut Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<(), MissingEnvVarError> {
    match value {
        Value::String(text) => {
            if let Some(replaced) = substitute_text(text, env, path)? {
                *text = replaced;
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                substitute_in_place(item, env, &format!("{path}[{i}]"))?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                let child = match path {
                    "" => key.clone(),
                    parent => format!("{parent}.{key}"),
                };
                substitute_in_place(item, env, &child)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// `None` when `text` holds no reference and can stay as it is.
fn substitute_text(
    text: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Option<String>, MissingEnvVarError> {
    if !ENV_VAR_PATTERN.is_match(text) {
        return Ok(None);
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_VAR_PATTERN.replace_all(text, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        if let Some(val) = env.get(name).filter(|v| !v.is_empty()) {
            return val.clone();
        }
        if missing.is_none() {
            missing = Some(MissingEnvVarError {
                var_name: name.to_string(),
                config_path: path.to_string(),
            });
        }
        String::new()
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(Some(replaced.into_owned())),
    }
}

/// Variable names referenced anywhere in the tree, sorted and deduplicated.
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    let mut names = BTreeSet::new();
    let mut pending = vec![value];
    while let Some(next) = pending.pop() {
        match next {
            Value::String(text) => {
                for caps in ENV_VAR_PATTERN.captures_iter(text) {
                    if caps[1].is_empty() {
                        names.insert(caps[2].to_string());
                    }
                }
            }
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.values()),
            _ => {}
        }
    }
    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_token() {
        let v = json!({"chatbox": {"token": "${CHATBOX_TOKEN}"}});
        let result = resolve_env_vars_with(&v, &env(&[("CHATBOX_TOKEN", "abc-123")])).unwrap();
        assert_eq!(result["chatbox"]["token"], "abc-123");
    }

    #[test]
    fn substitutes_inside_text() {
        let v = json!({"api": {"baseUrl": "https://${API_HOST}/v3/"}});
        let result = resolve_env_vars_with(&v, &env(&[("API_HOST", "api.example.test")])).unwrap();
        assert_eq!(result["api"]["baseUrl"], "https://api.example.test/v3/");
    }

    #[test]
    fn missing_var_names_path() {
        let v = json!({"chatbox": {"token": "${NOT_SET}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        assert_eq!(err.var_name, "NOT_SET");
        assert_eq!(err.config_path, "chatbox.token");
    }

    #[test]
    fn empty_var_is_missing() {
        let v = json!({"key": "${EMPTY}"});
        assert!(resolve_env_vars_with(&v, &env(&[("EMPTY", "")])).is_err());
    }

    #[test]
    fn escape_is_kept_literal() {
        let v = json!({"key": "$${CHATBOX_TOKEN} and ${OTHER}"});
        let result = resolve_env_vars_with(&v, &env(&[("OTHER", "x")])).unwrap();
        assert_eq!(result["key"], "${CHATBOX_TOKEN} and x");
    }

    #[test]
    fn lowercase_names_untouched() {
        let v = json!({"key": "${lower}"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["key"], "${lower}");
    }

    #[test]
    fn collects_referenced_vars() {
        let v = json!({"a": "${FOO}", "b": ["${BAR}", "$${SKIP}"], "c": "${FOO}"});
        assert_eq!(collect_referenced_vars(&v), vec!["BAR", "FOO"]);
    }
}
