//! Per-type coercion between raw document values and typed results.
//!
//! Decode rules, per semantic type:
//!
//! - Numerics accept a same-type raw number directly, otherwise a
//!   string that parses; a failed parse is an absent decode, never an
//!   error.
//! - Booleans accept a raw boolean, otherwise test a string against
//!   the truthy set {"true", "yes", "1", "on"} case-insensitively.
//!   Any other string decodes to `false`, not to absent.
//! - URLs parse from a string; invalid syntax is absent.
//! - Sequences decode each element independently and drop the ones
//!   that fail; a sequence never fails as a whole.
//! - Raw-value enums decode the raw storage type first, then map it
//!   through the enumerator table ([`EnumRaw`]); either step failing
//!   yields absent.
//!
//! Encode is the inverse direction. Returning `None` means "omit this
//! key from the output document", not "emit null".

use std::collections::HashMap;

use serde_json::{Number, Value};
use url::Url;

/// Decode a raw document value into a typed result.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

/// Encode a typed value back into a raw document value.
///
/// `None` omits the key from the output document.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

const TRUTHY: [&str; 4] = ["true", "yes", "1", "on"];

macro_rules! signed_from_value {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Number(n) => n.as_i64().and_then(|x| Self::try_from(x).ok()),
                    Value::String(s) => s.parse().ok(),
                    _ => None,
                }
            }
        }

        impl ToValue for $ty {
            fn to_value(&self) -> Option<Value> {
                Some(Value::Number(Number::from(i64::from(*self))))
            }
        }
    )*};
}

macro_rules! unsigned_from_value {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Number(n) => n.as_u64().and_then(|x| Self::try_from(x).ok()),
                    Value::String(s) => s.parse().ok(),
                    _ => None,
                }
            }
        }

        impl ToValue for $ty {
            fn to_value(&self) -> Option<Value> {
                Some(Value::Number(Number::from(u64::from(*self))))
            }
        }
    )*};
}

signed_from_value!(i8, i16, i32, i64);
unsigned_from_value!(u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Option<Value> {
        // Non-finite floats have no JSON representation; omit the key.
        Number::from_f64(*self).map(Value::Number)
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            #[allow(clippy::cast_possible_truncation)]
            Value::Number(n) => n.as_f64().map(|x| x as Self),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Option<Value> {
        Number::from_f64(f64::from(*self)).map(Value::Number)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t))),
            _ => None,
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }
}

impl FromValue for Url {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Url::parse(s).ok(),
            _ => None,
        }
    }
}

impl ToValue for Url {
    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.as_str().to_owned()))
    }
}

/// Identity coercion for fields declared as raw documents.
impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        Some(items.iter().filter_map(T::from_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Array(self.iter().filter_map(ToValue::to_value).collect()))
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &Value) -> Option<Self> {
        let entries = value.as_object()?;
        Some(
            entries
                .iter()
                .filter_map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
        )
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Object(
            self.iter()
                .filter_map(|(k, v)| v.to_value().map(|v| (k.clone(), v)))
                .collect(),
        ))
    }
}

/// An enum backed by a raw storage type.
///
/// Generated code never matches on enumerators; it decodes the raw
/// value and maps it through this trait, so unknown raw values yield
/// absent rather than panicking.
pub trait EnumRaw: Sized {
    type Raw: FromValue + ToValue;

    /// Map a raw value to its enumerator, absent when no enumerator
    /// carries that raw value.
    fn from_raw(raw: Self::Raw) -> Option<Self>;

    /// The enumerator's raw value.
    fn raw(&self) -> Self::Raw;
}

/// Decode a raw-value enum: raw storage type first, enumerator second.
pub fn enum_from_value<E: EnumRaw>(value: &Value) -> Option<E> {
    E::Raw::from_value(value).and_then(E::from_raw)
}

/// Encode a raw-value enum as its raw value.
pub fn enum_to_value<E: EnumRaw>(value: &E) -> Option<Value> {
    value.raw().to_value()
}

/// Decode a sequence of raw-value enums, dropping failing elements.
pub fn enum_vec_from_value<E: EnumRaw>(value: &Value) -> Option<Vec<E>> {
    let items = value.as_array()?;
    Some(items.iter().filter_map(enum_from_value).collect())
}

/// Encode a sequence of raw-value enums as their raw values.
pub fn enum_vec_to_value<E: EnumRaw>(values: &[E]) -> Option<Value> {
    Some(Value::Array(values.iter().filter_map(enum_to_value).collect()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn int_accepts_number_and_string() {
        assert_eq!(i64::from_value(&json!(5)), Some(5));
        assert_eq!(i64::from_value(&json!("5")), Some(5));
        assert_eq!(i32::from_value(&json!("-12")), Some(-12));
        assert_eq!(i64::from_value(&json!("five")), None);
        assert_eq!(i64::from_value(&json!(true)), None);
    }

    #[test]
    fn narrow_int_rejects_out_of_range() {
        assert_eq!(i8::from_value(&json!(127)), Some(127));
        assert_eq!(i8::from_value(&json!(128)), None);
        assert_eq!(u8::from_value(&json!(-1)), None);
        assert_eq!(u16::from_value(&json!("65536")), None);
    }

    #[test]
    fn unsigned_rejects_negative() {
        assert_eq!(u64::from_value(&json!(-3)), None);
        assert_eq!(u32::from_value(&json!("7")), Some(7));
    }

    #[test]
    fn float_accepts_int_number() {
        assert_eq!(f64::from_value(&json!(2)), Some(2.0));
        assert_eq!(f64::from_value(&json!("2.5")), Some(2.5));
        assert_eq!(f32::from_value(&json!(1.5)), Some(1.5));
    }

    #[test]
    fn bool_truthy_strings() {
        for s in ["Yes", "1", "On", "TRUE", "true", "yes", "ON"] {
            assert_eq!(bool::from_value(&json!(s)), Some(true), "{s}");
        }
        for s in ["no", "0", "off", "false", "anything else"] {
            assert_eq!(bool::from_value(&json!(s)), Some(false), "{s}");
        }
        assert_eq!(bool::from_value(&json!(true)), Some(true));
        assert_eq!(bool::from_value(&json!(3)), None);
    }

    #[test]
    fn string_does_not_stringify_numbers() {
        assert_eq!(String::from_value(&json!("hi")), Some("hi".to_owned()));
        assert_eq!(String::from_value(&json!(5)), None);
    }

    #[test]
    fn url_invalid_syntax_is_absent() {
        assert!(Url::from_value(&json!("https://example.com/a")).is_some());
        assert_eq!(Url::from_value(&json!("not a url")), None);
        assert_eq!(Url::from_value(&json!(7)), None);
    }

    #[test]
    fn url_round_trips_through_string() {
        let url = Url::from_value(&json!("https://example.com/a?b=c")).map(|u| u.to_value());
        assert_eq!(url.flatten(), Some(json!("https://example.com/a?b=c")));
    }

    #[test]
    fn vec_drops_failing_elements() {
        let v = json!([1, "2", "x", true, 3]);
        assert_eq!(Vec::<i64>::from_value(&v), Some(vec![1, 2, 3]));
        assert_eq!(Vec::<i64>::from_value(&json!("nope")), None);
    }

    #[test]
    fn map_of_strings() {
        let v = json!({"a": "x", "b": 2});
        let m = HashMap::<String, String>::from_value(&v).unwrap_or_default();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("a").map(String::as_str), Some("x"));
    }

    #[test]
    fn non_finite_float_encodes_as_absent() {
        assert_eq!(f64::NAN.to_value(), None);
        assert_eq!(2.5f64.to_value(), Some(json!(2.5)));
    }

    #[derive(Debug, PartialEq)]
    enum Status {
        Active,
        Closed,
    }

    impl EnumRaw for Status {
        type Raw = i64;

        fn from_raw(raw: i64) -> Option<Self> {
            match raw {
                1 => Some(Self::Active),
                2 => Some(Self::Closed),
                _ => None,
            }
        }

        fn raw(&self) -> i64 {
            match self {
                Self::Active => 1,
                Self::Closed => 2,
            }
        }
    }

    #[test]
    fn enum_decodes_through_raw_value() {
        assert_eq!(enum_from_value::<Status>(&json!(2)), Some(Status::Closed));
        assert_eq!(enum_from_value::<Status>(&json!("2")), Some(Status::Closed));
        assert_eq!(enum_from_value::<Status>(&json!(99)), None);
        assert_eq!(enum_from_value::<Status>(&json!("many")), None);
    }

    #[test]
    fn enum_encodes_raw_value() {
        assert_eq!(enum_to_value(&Status::Active), Some(json!(1)));
    }

    #[test]
    fn enum_vec_drops_unknown_raw_values() {
        let decoded = enum_vec_from_value::<Status>(&json!([1, 99, 2]));
        assert_eq!(decoded, Some(vec![Status::Active, Status::Closed]));
    }
}
