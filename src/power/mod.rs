//! Square, cube and fifth power of a single input value
//!
//! Integer inputs stay exact (results are held in `i128`), float inputs
//! stay floats. Anything that is not a number is rejected at the
//! [`Number`] boundary with [`CalcError::InvalidInputType`].

pub mod error;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use error::{CalcError, Result};

/// Default value of the input field
pub const DEFAULT_VALUE: Number = Number::Integer(1);

/// Default increment of the input field
pub const DEFAULT_STEP: i64 = 1;

/// The user-supplied input value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// A computed power, same numeric kind as the input that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Power {
    Integer(i128),
    Float(f64),
}

impl Number {
    /// Move the value by `delta` steps of `step`, keeping its kind.
    /// Integer steps saturate at the `i64` bounds.
    pub fn stepped(self, step: i64, delta: i64) -> Self {
        match self {
            Number::Integer(n) => Number::Integer(n.saturating_add(step.saturating_mul(delta))),
            Number::Float(f) => Number::Float(f + (step as f64) * (delta as f64)),
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        DEFAULT_VALUE
    }
}

/// True when `s` is an optionally signed run of ASCII digits
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Number {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();

        if is_integer_literal(text) {
            return text
                .parse::<i64>()
                .map(Number::Integer)
                .map_err(|_| CalcError::input_out_of_range(text));
        }

        // Rust's float parser also takes "inf" and "NaN"; those are text here
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Number::Float(f)),
            _ => Err(CalcError::invalid_input_type(format!("text {:?}", s))),
        }
    }
}

impl TryFrom<&serde_json::Value> for Number {
    type Error = CalcError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Number::Integer(i))
                } else if n.is_u64() {
                    Err(CalcError::input_out_of_range(n.to_string()))
                } else {
                    n.as_f64()
                        .map(Number::Float)
                        .ok_or_else(|| CalcError::input_out_of_range(n.to_string()))
                }
            }
            Value::String(_) => Err(CalcError::invalid_input_type("JSON string")),
            Value::Bool(_) => Err(CalcError::invalid_input_type("JSON boolean")),
            Value::Null => Err(CalcError::invalid_input_type("JSON null")),
            Value::Array(_) => Err(CalcError::invalid_input_type("JSON array")),
            Value::Object(_) => Err(CalcError::invalid_input_type("JSON object")),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(x) => write_float(f, *x),
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Power::Integer(n) => write!(f, "{}", n),
            Power::Float(x) => write_float(f, *x),
        }
    }
}

/// Floats always keep a fractional part ("2.0", not "2"), never exponent form
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = x.to_string();
    if x.is_finite() && !text.contains('.') {
        write!(f, "{}.0", text)
    } else {
        f.write_str(&text)
    }
}

/// Raise `n` to `exponent`.
///
/// Integers use checked `i128` arithmetic and fail with
/// [`CalcError::Overflow`] instead of wrapping. Floats fail the same way
/// when a finite input produces an infinite result.
pub fn raise(n: Number, exponent: u32) -> Result<Power> {
    let power = match n {
        Number::Integer(i) => i128::from(i)
            .checked_pow(exponent)
            .map(Power::Integer)
            .ok_or(CalcError::Overflow { exponent })?,
        Number::Float(x) => {
            let result = x.powi(exponent as i32);
            if x.is_finite() && !result.is_finite() {
                return Err(CalcError::Overflow { exponent });
            }
            Power::Float(result)
        }
    };

    tracing::trace!(%n, exponent, %power, "raised");
    Ok(power)
}

/// `n` squared. Fails only when the result is out of range.
pub fn square(n: Number) -> Result<Power> {
    raise(n, 2)
}

/// `n` cubed.
pub fn cube(n: Number) -> Result<Power> {
    raise(n, 3)
}

/// `n` to the fifth power; the first of the three to overflow for wide inputs.
pub fn fifth(n: Number) -> Result<Power> {
    raise(n, 5)
}

/// An input value together with its square, cube and fifth power
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Powers {
    pub value: Number,
    pub square: Power,
    pub cube: Power,
    pub fifth: Power,
}

impl Powers {
    pub fn compute(value: Number) -> Result<Self> {
        Ok(Self {
            value,
            square: square(value)?,
            cube: cube(value)?,
            fifth: fifth(value)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Number {
        Number::Integer(n)
    }

    #[test]
    fn test_square() {
        assert_eq!(square(int(2)).unwrap(), Power::Integer(4));
        assert_eq!(square(int(3)).unwrap(), Power::Integer(9));
    }

    #[test]
    fn test_cube() {
        assert_eq!(cube(int(2)).unwrap(), Power::Integer(8));
        assert_eq!(cube(int(3)).unwrap(), Power::Integer(27));
    }

    #[test]
    fn test_fifth() {
        assert_eq!(fifth(int(2)).unwrap(), Power::Integer(32));
        assert_eq!(fifth(int(3)).unwrap(), Power::Integer(243));
    }

    #[test]
    fn test_matches_repeated_multiplication() {
        for n in -50i64..=50 {
            let m = i128::from(n);
            assert_eq!(square(int(n)).unwrap(), Power::Integer(m * m));
            assert_eq!(cube(int(n)).unwrap(), Power::Integer(m * m * m));
            assert_eq!(fifth(int(n)).unwrap(), Power::Integer(m * m * m * m * m));
        }
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(square(int(-4)).unwrap(), Power::Integer(16));
        assert_eq!(cube(int(-4)).unwrap(), Power::Integer(-64));
        assert_eq!(fifth(int(0)).unwrap(), Power::Integer(0));
    }

    #[test]
    fn test_invalid_input() {
        let err = "string".parse::<Number>().unwrap_err();
        assert!(err.is_type_error());
        assert_eq!(
            err.to_string(),
            "unsupported operand type for exponentiation: text \"string\""
        );
    }

    #[test]
    fn test_non_numeric_json_is_type_error() {
        let values = [
            serde_json::json!("2"),
            serde_json::json!(true),
            serde_json::json!(null),
            serde_json::json!([2]),
            serde_json::json!({"value": 2}),
        ];
        for value in &values {
            let err = Number::try_from(value).unwrap_err();
            assert!(err.is_type_error(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(Number::try_from(&serde_json::json!(7)).unwrap(), int(7));
        assert_eq!(
            Number::try_from(&serde_json::json!(1.5)).unwrap(),
            Number::Float(1.5)
        );
        assert_eq!(
            Number::try_from(&serde_json::json!(u64::MAX)).unwrap_err(),
            CalcError::input_out_of_range(u64::MAX.to_string())
        );
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(" 12 ".parse::<Number>().unwrap(), int(12));
        assert_eq!("-3".parse::<Number>().unwrap(), int(-3));
        assert_eq!("2.5".parse::<Number>().unwrap(), Number::Float(2.5));
        assert!("".parse::<Number>().unwrap_err().is_type_error());
        assert!("inf".parse::<Number>().unwrap_err().is_type_error());
        assert!("NaN".parse::<Number>().unwrap_err().is_type_error());
        assert_eq!(
            "99999999999999999999".parse::<Number>().unwrap_err(),
            CalcError::input_out_of_range("99999999999999999999")
        );
    }

    #[test]
    fn test_float_powers_stay_float() {
        assert_eq!(square(Number::Float(1.5)).unwrap(), Power::Float(2.25));
        assert_eq!(cube(Number::Float(-2.0)).unwrap(), Power::Float(-8.0));
        assert_eq!(
            fifth(Number::Float(1e100)).unwrap_err(),
            CalcError::Overflow { exponent: 5 }
        );
    }

    #[test]
    fn test_overflow_is_an_error_not_wraparound() {
        assert_eq!(
            square(int(i64::MAX)).unwrap(),
            Power::Integer(i128::from(i64::MAX) * i128::from(i64::MAX))
        );
        assert_eq!(
            cube(int(i64::MAX)).unwrap_err(),
            CalcError::Overflow { exponent: 3 }
        );
        assert_eq!(
            fifth(int(i64::MIN)).unwrap_err(),
            CalcError::Overflow { exponent: 5 }
        );
        // Close to the i128 ceiling
        assert!(fifth(int(40_000_000)).is_ok());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let first = Powers::compute(int(7)).unwrap();
        let second = Powers::compute(int(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.fifth, Power::Integer(16807));
    }

    #[test]
    fn test_stepped() {
        assert_eq!(int(1).stepped(DEFAULT_STEP, 1), int(2));
        assert_eq!(int(1).stepped(DEFAULT_STEP, -2), int(-1));
        assert_eq!(int(i64::MAX).stepped(1, 1), int(i64::MAX));
        assert_eq!(Number::Float(0.5).stepped(2, 1), Number::Float(2.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(int(-3).to_string(), "-3");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Power::Float(6.25).to_string(), "6.25");
        assert_eq!(Power::Integer(243).to_string(), "243");
    }
}
