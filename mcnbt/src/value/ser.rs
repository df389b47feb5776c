//! Serde view of a value tree, for dumping NBT as JSON and the like.
//!
//! Compounds become maps in entry order, lists and arrays become sequences.
//! This is one way only: the tag information needed to rebuild NBT is lost.
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::{Compound, List, Named, Value};

impl<'a> Serialize for Value<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::ByteArray(bs) => serializer.collect_seq(bs.iter()),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(l) => l.serialize(serializer),
            Value::Compound(c) => c.serialize(serializer),
            Value::IntArray(v) => serializer.collect_seq(v.iter()),
        }
    }
}

impl<'a> Serialize for List<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> Serialize for Compound<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for entry in self {
            map.serialize_entry(&*entry.name, &entry.value)?;
        }
        map.end()
    }
}

/// A root serializes as a map with its name as the only key.
impl<'a> Serialize for Named<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&*self.name, &self.value)?;
        map.end()
    }
}
