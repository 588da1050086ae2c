//! Best-effort scalar coercions.
//!
//! Each coercion is total: a value that cannot be converted yields the zero
//! value of the target type (`""`, `0`). A number outside the target range
//! saturates to the nearest bound.

use std::num::{IntErrorKind, ParseIntError};

use super::Value;

impl Value {
    /// Converts the value to a string.
    ///
    /// Bytes are decoded as UTF-8 (lossily), a single byte becomes the
    /// character with that code point, floats are printed with two decimals
    /// and `Nil` becomes the empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::value::Value;
    ///
    /// assert_eq!(Value::Byte(b'A').as_string(), "A");
    /// assert_eq!(Value::Float64(2.0 / 3.0).as_string(), "0.67");
    /// assert_eq!(Value::Int64(-12).as_string(), "-12");
    /// ```
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Nil => String::new(),
            Self::Byte(byte) => char::from(*byte).to_string(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Chars(chars) => chars.iter().collect(),
            Self::Str(string) => string.clone(),
            Self::Float32(value) => format!("{value:.2}"),
            Self::Float64(value) => format!("{value:.2}"),
            Self::Bool(_)
            | Self::Int32(_)
            | Self::Int64(_)
            | Self::List(_)
            | Self::Shared(_) => self.to_string(),
        }
    }

    /// Converts the value to a 32-bit integer.
    ///
    /// This is [`Value::as_int64`] clamped to the `i32` range: every number
    /// that does not fit (a wide `Int64`, an overflowing numeric string, a
    /// large float) saturates to `i32::MIN` or `i32::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::value::Value;
    ///
    /// assert_eq!(Value::from("42").as_int(), 42);
    /// assert_eq!(Value::from("4x2").as_int(), 0);
    /// assert_eq!(Value::Float64(-1.5).as_int(), -2);
    /// assert_eq!(Value::Bool(true).as_int(), 1);
    /// assert_eq!(Value::Int64(1 << 40).as_int(), i32::MAX);
    /// assert_eq!(Value::from("-9000000000").as_int(), i32::MIN);
    /// ```
    #[must_use]
    pub fn as_int(&self) -> i32 {
        let value = self.as_int64();
        i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
    }

    /// Converts the value to a 64-bit integer.
    ///
    /// Strings are parsed as base-10, floats are floored, booleans map to
    /// `1`/`0`. Out-of-range strings and floats saturate, `NaN` is `0`.
    /// Anything else is `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homoset::value::Value;
    ///
    /// assert_eq!(Value::from("9000000000").as_int64(), 9_000_000_000);
    /// assert_eq!(Value::Int32(-3).as_int64(), -3);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int64(&self) -> i64 {
        match self {
            Self::Byte(byte) => i64::from(*byte),
            Self::Str(string) => parse_saturating(string),
            Self::Int32(value) => i64::from(*value),
            Self::Int64(value) => *value,
            Self::Float32(value) => value.floor() as i64,
            Self::Float64(value) => value.floor() as i64,
            Self::Bool(value) => i64::from(*value),
            Self::Nil
            | Self::Bytes(_)
            | Self::Chars(_)
            | Self::List(_)
            | Self::Shared(_) => 0,
        }
    }
}

fn parse_saturating(string: &str) -> i64 {
    string.parse().unwrap_or_else(|error: ParseIntError| match error.kind() {
        IntErrorKind::PosOverflow => i64::MAX,
        IntErrorKind::NegOverflow => i64::MIN,
        _ => 0,
    })
}

/// Converts `value` to a string. See [`Value::as_string`].
#[must_use]
pub fn as_string(value: &Value) -> String {
    value.as_string()
}

/// Converts `value` to a 32-bit integer. See [`Value::as_int`].
#[must_use]
pub fn as_int(value: &Value) -> i32 {
    value.as_int()
}

/// Converts `value` to a 64-bit integer. See [`Value::as_int64`].
#[must_use]
pub fn as_int64(value: &Value) -> i64 {
    value.as_int64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::nil(Value::Nil, "")]
    #[case::boolean(Value::Bool(false), "false")]
    #[case::byte(Value::Byte(b'z'), "z")]
    #[case::int32(Value::Int32(7), "7")]
    #[case::int64(Value::Int64(-9_000_000_000), "-9000000000")]
    #[case::float32(Value::Float32(1.5), "1.50")]
    #[case::float64(Value::Float64(1.23456), "1.23")]
    #[case::string(Value::from("plain"), "plain")]
    #[case::bytes(Value::Bytes(b"raw".to_vec()), "raw")]
    #[case::invalid_utf8(Value::Bytes(vec![0xff]), "\u{fffd}")]
    #[case::chars(Value::Chars(vec!['o', 'k']), "ok")]
    #[case::list(Value::List(vec![Value::Int32(1), Value::Int32(2)]), "[1, 2]")]
    #[case::shared(Value::shared("inner"), "&inner")]
    fn test_as_string(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(as_string(&value), expected);
    }

    #[rstest]
    #[case::nil(Value::Nil, 0)]
    #[case::boolean(Value::Bool(true), 1)]
    #[case::byte(Value::Byte(200), 200)]
    #[case::string(Value::from("-17"), -17)]
    #[case::signed_string(Value::from("+5"), 5)]
    #[case::padded_string(Value::from(" 5"), 0)]
    #[case::overflowing_string(Value::from("9000000000"), i32::MAX)]
    #[case::very_long_string(Value::from("-99999999999999999999"), i32::MIN)]
    #[case::int32(Value::Int32(i32::MIN), i32::MIN)]
    #[case::saturated_int64(Value::Int64((1 << 32) | 5), i32::MAX)]
    #[case::negative_int64(Value::Int64(i64::MIN), i32::MIN)]
    #[case::saturated_float(Value::Float64(1e12), i32::MAX)]
    #[case::floored_float(Value::Float32(2.9), 2)]
    #[case::negative_float(Value::Float64(-0.1), -1)]
    #[case::nan(Value::Float64(f64::NAN), 0)]
    #[case::bytes(Value::Bytes(b"12".to_vec()), 0)]
    #[case::shared(Value::shared(12_i32), 0)]
    fn test_as_int(#[case] value: Value, #[case] expected: i32) {
        assert_eq!(as_int(&value), expected);
    }

    #[rstest]
    #[case::nil(Value::Nil, 0)]
    #[case::boolean(Value::Bool(false), 0)]
    #[case::byte(Value::Byte(1), 1)]
    #[case::string(Value::from("9000000000"), 9_000_000_000)]
    #[case::bad_string(Value::from("1.5"), 0)]
    #[case::overflowing_string(Value::from("99999999999999999999"), i64::MAX)]
    #[case::int32(Value::Int32(-4), -4)]
    #[case::int64(Value::Int64(i64::MAX), i64::MAX)]
    #[case::floored_float(Value::Float64(1e10 + 0.5), 10_000_000_000)]
    #[case::saturated_float(Value::Float64(f64::INFINITY), i64::MAX)]
    #[case::chars(Value::Chars(vec!['1']), 0)]
    fn test_as_int64(#[case] value: Value, #[case] expected: i64) {
        assert_eq!(as_int64(&value), expected);
    }
}
