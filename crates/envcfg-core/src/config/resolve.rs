//! Resolution operations — raw environment strings to typed values.
//!
//! An unset variable and a variable set to the empty string are both
//! treated as absent, except by [`EnvSnapshot::optional_string`] which
//! returns a set-but-empty value as-is.

use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::env::EnvSnapshot;
use super::error::{ConfigError, ValueKind};

/// The only raw value that resolves to `true`.
pub const TRUE_LITERAL: &str = "true";

impl EnvSnapshot {
    /// Raw value of a variable that has no default.
    pub fn required_string(&self, name: &str) -> Result<String, ConfigError> {
        self.non_empty(name, ValueKind::String)?
            .map(str::to_string)
            .ok_or_else(|| ConfigError::missing(name, ValueKind::String))
    }

    /// Raw value if set, otherwise `default`.
    pub fn optional_string(
        &self,
        name: &str,
        default: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        Ok(self
            .lookup(name, ValueKind::String)?
            .or(default)
            .map(str::to_string))
    }

    /// Parse a numeric variable into `T`.
    ///
    /// Any finite decimal literal is accepted (`900`, `900.0`, `1e3`,
    /// `+600`); integer targets additionally require a whole number within
    /// their range.
    pub fn number<T>(&self, name: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: EnvNumber,
    {
        match self.non_empty(name, ValueKind::Number)? {
            Some(raw) => parse_number(name, raw),
            None => default.ok_or_else(|| ConfigError::missing(name, ValueKind::Number)),
        }
    }

    /// Strict boolean: only the exact literal `true` is `true`.
    ///
    /// Any other present value, including `True` or `1`, is `false`.
    pub fn boolean(&self, name: &str, default: Option<bool>) -> Result<bool, ConfigError> {
        match self.non_empty(name, ValueKind::Boolean)? {
            Some(raw) => Ok(parse_boolean(raw)),
            None => default.ok_or_else(|| ConfigError::missing(name, ValueKind::Boolean)),
        }
    }

    /// Decode a JSON document into `T`.
    ///
    /// Malformed JSON and well-formed JSON of the wrong shape are both
    /// `InvalidFormat`.
    pub fn json<T>(&self, name: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.non_empty(name, ValueKind::Json)? {
            Some(raw) => parse_json(name, raw),
            None => default.ok_or_else(|| ConfigError::missing(name, ValueKind::Json)),
        }
    }
}

// ─────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────

/// Numeric types a variable can resolve to.
pub trait EnvNumber: FromStr {
    /// Narrow a finite number parsed from the environment.
    fn from_finite(n: f64) -> Result<Self, String>;
}

impl EnvNumber for f64 {
    fn from_finite(n: f64) -> Result<Self, String> {
        Ok(n)
    }
}

macro_rules! env_integer {
    ($($t:ty),*) => {$(
        impl EnvNumber for $t {
            fn from_finite(n: f64) -> Result<Self, String> {
                if n.fract() != 0.0 {
                    return Err(format!("{n} is not an integer"));
                }
                // MAX as f64 rounds up for 64-bit types, so compare against MAX + 1
                if n < <$t>::MIN as f64 || n >= <$t>::MAX as f64 + 1.0 {
                    return Err(format!(
                        "{n} is out of range ({}..={})",
                        <$t>::MIN,
                        <$t>::MAX
                    ));
                }
                Ok(n as $t)
            }
        }
    )*};
}

env_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Parse a raw value as a number of type `T`.
///
/// Whitespace-only values are rejected rather than read as zero.
pub(crate) fn parse_number<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: EnvNumber,
{
    let trimmed = raw.trim();
    let n: f64 = trimmed.parse().map_err(|_| {
        ConfigError::invalid(name, ValueKind::Number, format_args!("{raw:?} is not a number"))
    })?;
    if !n.is_finite() {
        return Err(ConfigError::invalid(
            name,
            ValueKind::Number,
            format_args!("{raw:?} is not a finite number"),
        ));
    }

    // Exact integer syntax first so values above 2^53 keep full precision
    if let Ok(value) = trimmed.parse::<T>() {
        return Ok(value);
    }
    T::from_finite(n).map_err(|reason| ConfigError::invalid(name, ValueKind::Number, reason))
}

pub(crate) fn parse_boolean(raw: &str) -> bool {
    raw == TRUE_LITERAL
}

pub(crate) fn parse_json<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(raw).map_err(|e| ConfigError::invalid(name, ValueKind::Json, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(pairs.iter().copied())
    }

    fn assert_missing(err: ConfigError, expected: &str) {
        match err {
            ConfigError::MissingVariable { name, .. } => assert_eq!(name, expected),
            other => panic!("expected MissingVariable, got {other:?}"),
        }
    }

    fn assert_invalid(err: ConfigError, expected: &str) {
        match err {
            ConfigError::InvalidFormat { name, .. } => assert_eq!(name, expected),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    // ── strings ──

    #[test]
    fn test_required_string_present() {
        let env = env(&[("APP_NAME", "svc")]);
        assert_eq!(env.required_string("APP_NAME").unwrap(), "svc");
    }

    #[test]
    fn test_required_string_absent_or_empty() {
        let env = env(&[("BASE_URL", "")]);
        assert_missing(env.required_string("APP_NAME").unwrap_err(), "APP_NAME");
        assert_missing(env.required_string("BASE_URL").unwrap_err(), "BASE_URL");
    }

    #[test]
    fn test_required_string_keeps_whitespace() {
        let env = env(&[("JWT_ACCESS_SECRET", "  s3cr3t ")]);
        assert_eq!(env.required_string("JWT_ACCESS_SECRET").unwrap(), "  s3cr3t ");
    }

    #[test]
    fn test_optional_string_default_and_none() {
        let env = env(&[]);
        assert_eq!(
            env.optional_string("SERVER_HOST", Some("0.0.0.0")).unwrap().as_deref(),
            Some("0.0.0.0")
        );
        assert_eq!(env.optional_string("SERVER_HOST", None).unwrap(), None);
    }

    #[test]
    fn test_optional_string_empty_value_is_kept() {
        let env = env(&[("SERVER_PREFIX", "")]);
        assert_eq!(
            env.optional_string("SERVER_PREFIX", Some("/api")).unwrap().as_deref(),
            Some("")
        );
    }

    // ── numbers ──

    #[test]
    fn test_number_parses_integer() {
        let env = env(&[("SERVER_PORT", "4500")]);
        assert_eq!(env.number::<u16>("SERVER_PORT", Some(3000)).unwrap(), 4500);
    }

    #[test]
    fn test_number_parses_float() {
        let env = env(&[("RATIO", "0.25")]);
        assert_eq!(env.number::<f64>("RATIO", None).unwrap(), 0.25);
    }

    #[test]
    fn test_number_trims_whitespace() {
        let env = env(&[("CORS_MAX_AGE", " 600 ")]);
        assert_eq!(env.number::<u64>("CORS_MAX_AGE", None).unwrap(), 600);
    }

    #[test]
    fn test_number_default_when_absent() {
        let env = env(&[("CORS_MAX_AGE", "")]);
        assert_eq!(env.number::<u64>("CORS_MAX_AGE", Some(86400)).unwrap(), 86400);
    }

    #[test]
    fn test_number_missing_without_default() {
        let env = env(&[]);
        assert_missing(
            env.number::<u64>("JWT_ACCESS_LIFETIME", None).unwrap_err(),
            "JWT_ACCESS_LIFETIME",
        );
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        let env = env(&[("SERVER_PORT", "abc")]);
        assert_invalid(
            env.number::<u16>("SERVER_PORT", Some(3000)).unwrap_err(),
            "SERVER_PORT",
        );
    }

    #[test]
    fn test_number_rejects_out_of_range() {
        let env = env(&[("SERVER_PORT", "70000")]);
        assert_invalid(
            env.number::<u16>("SERVER_PORT", Some(3000)).unwrap_err(),
            "SERVER_PORT",
        );
    }

    #[test]
    fn test_number_accepts_exponent_and_fraction_syntax() {
        let env = env(&[
            ("JWT_ACCESS_LIFETIME", "1e3"),
            ("JWT_REFRESH_LIFETIME", "900.0"),
            ("SERVER_PORT", "8080.0"),
            ("CORS_MAX_AGE", "+600"),
        ]);
        assert_eq!(env.number::<u64>("JWT_ACCESS_LIFETIME", None).unwrap(), 1000);
        assert_eq!(env.number::<u64>("JWT_REFRESH_LIFETIME", None).unwrap(), 900);
        assert_eq!(env.number::<u16>("SERVER_PORT", None).unwrap(), 8080);
        assert_eq!(env.number::<u64>("CORS_MAX_AGE", None).unwrap(), 600);
        assert_eq!(env.number::<f64>("JWT_ACCESS_LIFETIME", None).unwrap(), 1000.0);
    }

    #[test]
    fn test_number_keeps_large_integers_exact() {
        let env = env(&[("BIG", "18446744073709551615")]);
        assert_eq!(env.number::<u64>("BIG", None).unwrap(), u64::MAX);
    }

    #[test]
    fn test_number_rejects_fraction_for_integer_target() {
        let env = env(&[("JWT_ACCESS_LIFETIME", "1.5")]);
        match env.number::<u64>("JWT_ACCESS_LIFETIME", None).unwrap_err() {
            ConfigError::InvalidFormat { name, reason, .. } => {
                assert_eq!(name, "JWT_ACCESS_LIFETIME");
                assert!(reason.contains("not an integer"), "{reason}");
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
        // Floats take it as-is
        assert_eq!(env.number::<f64>("JWT_ACCESS_LIFETIME", None).unwrap(), 1.5);
    }

    #[test]
    fn test_number_out_of_range_message() {
        let env = env(&[("SERVER_PORT", "7e4"), ("MAX_AGE", "-1")]);
        match env.number::<u16>("SERVER_PORT", None).unwrap_err() {
            ConfigError::InvalidFormat { reason, .. } => {
                assert!(reason.contains("out of range"), "{reason}")
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
        assert_invalid(env.number::<u64>("MAX_AGE", None).unwrap_err(), "MAX_AGE");
    }

    #[test]
    fn test_number_rejects_non_finite() {
        for raw in ["inf", "NaN", "infinity", "1e400"] {
            let env = env(&[("CORS_MAX_AGE", raw)]);
            assert_invalid(env.number::<f64>("CORS_MAX_AGE", None).unwrap_err(), "CORS_MAX_AGE");
        }
    }

    #[test]
    fn test_number_rejects_whitespace_only() {
        let env = env(&[("SERVER_PORT", "   ")]);
        assert_invalid(
            env.number::<u16>("SERVER_PORT", Some(3000)).unwrap_err(),
            "SERVER_PORT",
        );
    }

    // ── booleans ──

    #[test]
    fn test_boolean_strict_literal() {
        let cases = [
            ("true", true),
            ("True", false),
            ("TRUE", false),
            ("1", false),
            ("yes", false),
            ("false", false),
            ("ture", false),
        ];
        for (raw, expected) in cases {
            let env = env(&[("CORS_ALLOW_CREDENTIALS", raw)]);
            assert_eq!(
                env.boolean("CORS_ALLOW_CREDENTIALS", Some(!expected)).unwrap(),
                expected,
                "raw value {raw:?}"
            );
        }
    }

    #[test]
    fn test_boolean_default_and_missing() {
        let env = env(&[("FLAG", "")]);
        assert!(env.boolean("FLAG", Some(true)).unwrap());
        assert_missing(env.boolean("FLAG", None).unwrap_err(), "FLAG");
    }

    // ── json ──

    #[test]
    fn test_json_string_list() {
        let env = env(&[("CORS_ORIGINS", r#"["https://a.example","https://b.example"]"#)]);
        let origins: Vec<String> = env.json("CORS_ORIGINS", Some(Vec::new())).unwrap();
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_json_structured_document() {
        let env = env(&[("LIMITS", r#"{"login": 5, "signup": 2}"#)]);
        let limits: HashMap<String, u32> = env.json("LIMITS", None).unwrap();
        assert_eq!(limits["login"], 5);
        assert_eq!(limits["signup"], 2);
    }

    #[test]
    fn test_json_default_when_absent() {
        let env = env(&[]);
        let methods: Vec<String> = env
            .json("CORS_METHODS", Some(vec!["GET".to_string(), "POST".to_string()]))
            .unwrap();
        assert_eq!(methods, vec!["GET", "POST"]);
    }

    #[test]
    fn test_json_malformed() {
        let env = env(&[("CORS_HEADERS", "{not json")]);
        assert_invalid(
            env.json::<Vec<String>>("CORS_HEADERS", Some(Vec::new()))
                .unwrap_err(),
            "CORS_HEADERS",
        );
    }

    #[test]
    fn test_json_wrong_shape() {
        let env = env(&[("CORS_HEADERS", r#"{"a": 1}"#)]);
        assert_invalid(
            env.json::<Vec<String>>("CORS_HEADERS", None).unwrap_err(),
            "CORS_HEADERS",
        );
    }

    #[test]
    fn test_json_missing_without_default() {
        let env = env(&[]);
        assert_missing(
            env.json::<serde_json::Value>("DOC", None).unwrap_err(),
            "DOC",
        );
    }
}
