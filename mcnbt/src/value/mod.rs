//! The NBT value tree.
//!
//! Values carry a lifetime so that strings and byte arrays can point straight
//! into the buffer they were parsed from. [`Value::into_owned`] detaches a tree
//! from its input, producing a `Value<'static>`.
use std::borrow::Cow;

use crate::Tag;

mod compound;
mod list;
mod ser;

pub use compound::Compound;
pub use list::List;

/// A single NBT payload.
///
/// ```
/// use mcnbt::{Compound, Value};
///
/// let mut level = Compound::new();
/// level.insert("DataVersion", Value::Int(1343));
///
/// match level.get("DataVersion") {
///     Some(Value::Int(ver)) => assert_eq!(*ver, 1343),
///     _ => panic!("expected an int"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Cow<'a, [i8]>),
    String(Cow<'a, str>),
    List(List<'a>),
    Compound(Compound<'a>),
    IntArray(Vec<i32>),
}

/// A value together with the name it is stored under. Every NBT document
/// has exactly one of these at its root.
#[derive(Debug, Clone, PartialEq)]
pub struct Named<'a> {
    pub name: Cow<'a, str>,
    pub value: Value<'a>,
}

impl<'a> Named<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Value<'a>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.value.tag()
    }

    /// Detach from the input buffer, copying any borrowed data.
    pub fn into_owned(self) -> Named<'static> {
        Named {
            name: Cow::Owned(self.name.into_owned()),
            value: self.value.into_owned(),
        }
    }

    /// Deep copy into a tree that owns all of its data.
    pub fn to_owned_named(&self) -> Named<'static> {
        self.clone().into_owned()
    }
}

impl<'a> Value<'a> {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
        }
    }

    /// Detach from the input buffer, copying any borrowed data.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Byte(v) => Value::Byte(v),
            Value::Short(v) => Value::Short(v),
            Value::Int(v) => Value::Int(v),
            Value::Long(v) => Value::Long(v),
            Value::Float(v) => Value::Float(v),
            Value::Double(v) => Value::Double(v),
            Value::ByteArray(bs) => Value::ByteArray(Cow::Owned(bs.into_owned())),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::List(l) => Value::List(l.into_owned()),
            Value::Compound(c) => Value::Compound(c.into_owned()),
            Value::IntArray(v) => Value::IntArray(v),
        }
    }

    pub fn to_owned_value(&self) -> Value<'static> {
        self.clone().into_owned()
    }

    // The accessors below only match the exact tag. A Short is not an Int.

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Value::ByteArray(bs) => Some(bs),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Value::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List<'a>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List<'a>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound<'a>> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound<'a>> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }
}

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl<'a> From<$type> for Value<'a> {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}

from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(bool, Byte, as i8);
from!(Vec<i8>, ByteArray, .into());
from!(Vec<i32>, IntArray);
from!(String, String, .into());

impl<'a> From<List<'a>> for Value<'a> {
    fn from(val: List<'a>) -> Self {
        Self::List(val)
    }
}

impl<'a> From<Compound<'a>> for Value<'a> {
    fn from(val: Compound<'a>) -> Self {
        Self::Compound(val)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(val: &'a str) -> Self {
        Self::String(Cow::Borrowed(val))
    }
}

impl<'a> From<&'a [i8]> for Value<'a> {
    fn from(val: &'a [i8]) -> Self {
        Self::ByteArray(Cow::Borrowed(val))
    }
}
