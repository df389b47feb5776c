//! Encoding a [`Named`] value tree as NBT.
//!
//! ```
//! use mcnbt::{Compound, Named, Value};
//!
//! let mut root = Compound::new();
//! root.insert("name", "Bananrama");
//!
//! let bytes = mcnbt::to_bytes(&Named::new("hello", root)).unwrap();
//! assert_eq!(bytes, b"\x0a\x00\x05hello\x08\x00\x04name\x00\x09Bananrama\x00");
//! ```
use log::trace;

use crate::buffer::ByteWriter;
use crate::compression::{compress, Compression};
use crate::error::{Error, Result};
use crate::{Named, Tag, Value};

/// Writes value trees into a growing buffer.
///
/// Several roots can be written one after the other, which is how some
/// formats concatenate documents.
#[derive(Debug, Default)]
pub struct Encoder {
    out: ByteWriter,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a tag, name and payload.
    pub fn write_named(&mut self, named: &Named<'_>) -> Result<()> {
        self.write_tag(named.value.tag())?;
        self.write_str(&named.name)?;
        self.write_payload(&named.value)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.out.into_inner()
    }

    fn write_payload(&mut self, value: &Value<'_>) -> Result<()> {
        match value {
            Value::Byte(v) => self.out.write_i8(*v),
            Value::Short(v) => self.out.write_i16(*v),
            Value::Int(v) => self.out.write_i32(*v),
            Value::Long(v) => self.out.write_i64(*v),
            Value::Float(v) => self.out.write_f32(*v),
            Value::Double(v) => self.out.write_f64(*v),
            Value::ByteArray(bs) => {
                self.write_len(bs.len())?;
                self.out.write_bytes(i8_as_bytes(bs))
            }
            Value::String(s) => self.write_str(s),
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.out.write_i32(*i)?;
                }
                Ok(())
            }
            Value::List(list) => {
                let element = list.element_tag();
                self.write_tag(element)?;
                self.write_len(list.len())?;
                for item in list {
                    if item.tag() != element {
                        return Err(Error::malformed(format!(
                            "list of {:?} holds a {:?}",
                            element,
                            item.tag()
                        )));
                    }
                    self.write_payload(item)?;
                }
                Ok(())
            }
            Value::Compound(compound) => {
                for child in compound {
                    self.write_named(child)?;
                }
                self.write_tag(Tag::End)
            }
        }
    }

    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.out.write_u8(tag as u8)
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        let s = cesu8::to_java_cesu8(s);
        self.out.write_u16_prefixed(&s)
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len)
            .map_err(|_| Error::malformed(format!("len too large: {}", len)))?;
        self.out.write_i32(len)
    }
}

/// Encode a document without compression.
pub fn to_bytes(named: &Named<'_>) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.write_named(named)?;
    Ok(encoder.into_inner())
}

/// Encode a document and compress it with `scheme`.
pub fn encode(named: &Named<'_>, scheme: Compression) -> Result<Vec<u8>> {
    let raw = to_bytes(named)?;
    trace!("encoded nbt root {:?}: {} bytes", named.name, raw.len());
    match scheme {
        Compression::Uncompressed => Ok(raw),
        _ => compress(&raw, scheme),
    }
}

fn i8_as_bytes(bs: &[i8]) -> &[u8] {
    // u8 and i8 have the same size and alignment.
    unsafe { std::slice::from_raw_parts(bs.as_ptr() as *const u8, bs.len()) }
}
