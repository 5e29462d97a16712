//! Uniform read-only view over instance values: kinds, kind sets, and the
//! structural equality used by `const`, `enum`, `uniqueItems`, and schema
//! comparison. Equality is order-insensitive for objects and treats
//! numerically equal numbers as equal regardless of lexical form.
use std::{convert::TryFrom, fmt};

use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

/// The kind of a JSON value, plus `Integer`, which is not a kind an
/// instance can have but is assertable through the `type` keyword.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum Kind {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl Kind {
    /// The kind of an instance node. Numbers always report [`Kind::Number`];
    /// integrality is a property checked separately via [`is_integral`].
    #[must_use]
    pub fn of(instance: &Value) -> Kind {
        match instance {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Kind::Array => 1,
            Kind::Boolean => 2,
            Kind::Integer => 4,
            Kind::Null => 8,
            Kind::Number => 16,
            Kind::Object => 32,
            Kind::String => 64,
        }
    }

    /// The tag as it appears in a `type` payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Array => "array",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Null => "null",
            Kind::Number => "number",
            Kind::Object => "object",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Kind {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(Kind::Array),
            "boolean" => Ok(Kind::Boolean),
            "integer" => Ok(Kind::Integer),
            "null" => Ok(Kind::Null),
            "number" => Ok(Kind::Number),
            "object" => Ok(Kind::Object),
            "string" => Ok(Kind::String),
            _ => Err(()),
        }
    }
}

/// Compact set of [`Kind`]s, the payload form of the `type` keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSet(u8);

impl KindSet {
    /// The set admitting nothing.
    #[must_use]
    pub const fn empty() -> Self {
        KindSet(0)
    }

    /// This set plus one kind.
    #[must_use]
    pub const fn with(self, kind: Kind) -> Self {
        KindSet(self.0 | kind.bit())
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, kind: Kind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Whether an instance satisfies this set: its kind is a member, an
    /// integral number satisfies `integer`, and any number satisfies
    /// `number`.
    #[must_use]
    pub fn admits(self, instance: &Value) -> bool {
        match instance {
            Value::Number(n) => {
                self.contains(Kind::Number) || (self.contains(Kind::Integer) && is_integral(n))
            }
            _ => self.contains(Kind::of(instance)),
        }
    }
}

/// Whether a number is mathematically an integer, regardless of how it was
/// written down (`1`, `1.0`, and `10e-1` all qualify).
#[must_use]
pub fn is_integral(number: &Number) -> bool {
    number.is_u64()
        || number.is_i64()
        || number
            .as_f64()
            .map_or(false, |value| value.fract() == 0.0)
}

macro_rules! compare {
    ($method:ident, $left:expr, $right:expr) => {
        if let Some(right) = $right.as_u64() {
            NumCmp::$method($left, right)
        } else if let Some(right) = $right.as_i64() {
            NumCmp::$method($left, right)
        } else {
            NumCmp::$method($left, $right.as_f64().expect("always representable"))
        }
    };
}

macro_rules! dispatch_left {
    ($method:ident, $left:expr, $right:expr) => {
        if let Some(left) = $left.as_u64() {
            compare!($method, left, $right)
        } else if let Some(left) = $left.as_i64() {
            compare!($method, left, $right)
        } else {
            compare!($method, $left.as_f64().expect("always representable"), $right)
        }
    };
}

macro_rules! num_cmp_fns {
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[inline]
            pub(crate) fn $name(left: &Number, right: &Number) -> bool {
                dispatch_left!($method, left, right)
            }
        )*
    };
}

num_cmp_fns! {
    num_lt => num_lt,
    num_le => num_le,
    num_gt => num_gt,
    num_ge => num_ge,
    num_eq => num_eq,
}

/// Structural equality with numeric equivalence.
#[inline]
#[must_use]
pub fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => num_eq(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => false,
    }
}

#[inline]
pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| equal(l, r))
}

/// Member order is irrelevant for object equality.
#[inline]
pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).map_or(false, |other| equal(value, other)))
}
