use crate::error::{Error, Result};
use crate::{Tag, Value};

/// A homogeneous sequence of values.
///
/// The element tag is stored alongside the items so that an empty list keeps
/// the tag it was declared with. Every item has that tag.
#[derive(Debug, Clone, PartialEq)]
pub struct List<'a> {
    element: Tag,
    items: Vec<Value<'a>>,
}

impl<'a> List<'a> {
    /// An empty list of `element` values.
    pub fn new(element: Tag) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    pub fn with_capacity(element: Tag, capacity: usize) -> Self {
        Self {
            element,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build a list, checking every item against `element`.
    pub fn from_values(element: Tag, items: Vec<Value<'a>>) -> Result<Self> {
        if let Some(bad) = items.iter().find(|v| v.tag() != element) {
            return Err(Error::malformed(format!(
                "list of {:?} cannot hold {:?}",
                element,
                bad.tag()
            )));
        }
        Ok(Self { element, items })
    }

    /// Caller guarantees every item has tag `element`.
    pub(crate) fn from_parts_unchecked(element: Tag, items: Vec<Value<'a>>) -> Self {
        Self { element, items }
    }

    pub fn element_tag(&self) -> Tag {
        self.element
    }

    pub fn push(&mut self, value: impl Into<Value<'a>>) -> Result<()> {
        let value = value.into();
        if value.tag() != self.element {
            return Err(Error::malformed(format!(
                "list of {:?} cannot hold {:?}",
                self.element,
                value.tag()
            )));
        }
        self.items.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.items.get(index)
    }

    /// Mutable access to an item. Replacing it with a value of a different
    /// tag makes the list unencodable.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value<'a>> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value<'a>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value<'a>> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value<'a>] {
        &self.items
    }

    pub fn into_owned(self) -> List<'static> {
        List {
            element: self.element,
            items: self.items.into_iter().map(Value::into_owned).collect(),
        }
    }
}

impl<'a, 'l> IntoIterator for &'l List<'a> {
    type Item = &'l Value<'a>;
    type IntoIter = std::slice::Iter<'l, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for List<'a> {
    type Item = Value<'a>;
    type IntoIter = std::vec::IntoIter<Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

macro_rules! from_vec {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<Vec<$type>> for List<'a> {
                fn from(values: Vec<$type>) -> Self {
                    Self {
                        element: Tag::$variant,
                        items: values.into_iter().map(Value::$variant).collect(),
                    }
                }
            }
        )*
    };
}

from_vec! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
}
