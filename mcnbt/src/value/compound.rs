use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::{List, Named, Tag, Value};

/// An ordered collection of named values.
///
/// Entries keep the order they were parsed or inserted in, and that order is
/// preserved when encoding. Lookups return the first entry with a matching
/// name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound<'a> {
    entries: Vec<Named<'a>>,
}

macro_rules! typed_get {
    ($name:ident, $ty:ty, $tag:ident, $as:ident) => {
        #[doc = concat!("Get the `", stringify!($tag), "` stored under `key`.")]
        pub fn $name(&self, key: &str) -> Result<$ty> {
            let value = self.get_tagged(key, Tag::$tag)?;
            value
                .$as()
                .ok_or_else(|| Error::wrong_tag(key, Tag::$tag, value.tag()))
        }
    };
}

impl<'a> Compound<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Named<'a>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Named<'a>> {
        self.entries.iter_mut()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.entries
            .iter()
            .find(|e| e.name == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        self.entries
            .iter_mut()
            .find(|e| e.name == key)
            .map(|e| &mut e.value)
    }

    /// Set `key` to `value`. An existing entry is replaced where it stands and
    /// its old value returned; otherwise the entry is appended.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: impl Into<Value<'a>>,
    ) -> Option<Value<'a>> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push(Named { name: key, value });
                None
            }
        }
    }

    /// Append an entry without checking for an existing one of the same name.
    pub fn push(&mut self, entry: Named<'a>) {
        self.entries.push(entry);
    }

    /// Remove the first entry named `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value<'a>> {
        let index = self.entries.iter().position(|e| e.name == key)?;
        Some(self.entries.remove(index).value)
    }

    fn get_tagged(&self, key: &str, tag: Tag) -> Result<&Value<'a>> {
        match self.get(key) {
            None => Err(Error::missing_key(key)),
            Some(v) if v.tag() != tag => Err(Error::wrong_tag(key, tag, v.tag())),
            Some(v) => Ok(v),
        }
    }

    typed_get!(get_i8, i8, Byte, as_i8);
    typed_get!(get_i16, i16, Short, as_i16);
    typed_get!(get_i32, i32, Int, as_i32);
    typed_get!(get_i64, i64, Long, as_i64);
    typed_get!(get_f32, f32, Float, as_f32);
    typed_get!(get_f64, f64, Double, as_f64);
    typed_get!(get_str, &str, String, as_str);
    typed_get!(get_byte_array, &[i8], ByteArray, as_byte_array);
    typed_get!(get_int_array, &[i32], IntArray, as_int_array);
    typed_get!(get_list, &List<'a>, List, as_list);
    typed_get!(get_compound, &Compound<'a>, Compound, as_compound);

    pub fn get_list_mut(&mut self, key: &str) -> Result<&mut List<'a>> {
        match self.get_mut(key) {
            None => Err(Error::missing_key(key)),
            Some(Value::List(l)) => Ok(l),
            Some(v) => Err(Error::wrong_tag(key, Tag::List, v.tag())),
        }
    }

    pub fn get_compound_mut(&mut self, key: &str) -> Result<&mut Compound<'a>> {
        match self.get_mut(key) {
            None => Err(Error::missing_key(key)),
            Some(Value::Compound(c)) => Ok(c),
            Some(v) => Err(Error::wrong_tag(key, Tag::Compound, v.tag())),
        }
    }

    pub fn into_owned(self) -> Compound<'static> {
        Compound {
            entries: self.entries.into_iter().map(Named::into_owned).collect(),
        }
    }

    pub fn to_owned_compound(&self) -> Compound<'static> {
        self.clone().into_owned()
    }
}

impl<'a> FromIterator<Named<'a>> for Compound<'a> {
    fn from_iter<T: IntoIterator<Item = Named<'a>>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, 'c> IntoIterator for &'c Compound<'a> {
    type Item = &'c Named<'a>;
    type IntoIter = std::slice::Iter<'c, Named<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for Compound<'a> {
    type Item = Named<'a>;
    type IntoIter = std::vec::IntoIter<Named<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
