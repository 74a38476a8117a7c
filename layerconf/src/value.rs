//! Coercion of raw string values into typed results

use crate::error::{ConfigError, Result};

/// Type name reported for failed float conversions
pub const FLOAT_TYPE: &str = "float64";

/// Type name reported for failed bool conversions
pub const BOOL_TYPE: &str = "bool";

/// Parse `raw` as a 64-bit float.
///
/// A finite literal too large for `f64` is rejected rather than rounded to
/// infinity; `inf` and `infinity` spelled out are accepted.
pub fn parse_float(key: &str, raw: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_infinite() && !is_infinity_literal(raw) => {
            Err(ConfigError::type_conversion(key, raw, FLOAT_TYPE))
        }
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::type_conversion(key, raw, FLOAT_TYPE)),
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parse `raw` as a boolean.
///
/// Accepts `true`, `false`, `t`, `f`, `1` and `0`, ignoring ASCII case.
pub fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(ConfigError::type_conversion(key, raw, BOOL_TYPE)),
    }
}
