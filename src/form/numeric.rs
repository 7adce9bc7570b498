/// Lenient numeric conversion for form input.
///
/// Form fields hold free text. A value is accepted when it *starts* with a
/// number: leading whitespace is skipped and anything after the longest
/// numeric prefix is ignored, so `"12abc"` reads as 12 and `"7.9"` reads as
/// 7 for an integer field. A value with no numeric prefix is rejected, and
/// an integer prefix too long for an `i64` is reported as an overflow.
use std::sync::LazyLock;

use regex::Regex;

/// Leading decimal float: optional sign, digits with optional fraction (or a
/// bare fraction), optional exponent.
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Leading decimal integer: optional sign followed by digits.
static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("int prefix pattern is valid"));

/// Parse the leading float of `raw`.
///
/// Returns `None` when there is no numeric prefix or the value is not
/// finite (e.g. `"1e999"`), since such a value cannot be sent as a JSON
/// number.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let caps = FLOAT_PREFIX.captures(raw)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Why a value has no usable leading integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPrefixError {
    /// The value does not start with digits.
    NoDigits,
    /// The digits do not fit an `i64`.
    Overflow,
}

/// Parse the leading integer of `raw`.
pub fn parse_int_prefix(raw: &str) -> Result<i64, IntPrefixError> {
    let digits = INT_PREFIX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or(IntPrefixError::NoDigits)?;
    digits
        .as_str()
        .parse()
        .map_err(|_| IntPrefixError::Overflow)
}
