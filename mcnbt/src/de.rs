//! Parsing NBT into a [`Named`] value tree.
//!
//! Parsing is single pass with no backtracking. By default strings and byte
//! arrays borrow from the input, so the result lives no longer than the
//! buffer it came from:
//!
//! ```
//! # fn main() -> mcnbt::error::Result<()> {
//! // TAG_Compound "hello" { TAG_String "name": "Bananrama" }
//! let input = b"\x0a\x00\x05hello\x08\x00\x04name\x00\x09Bananrama\x00";
//! let root = mcnbt::from_bytes(input)?;
//!
//! assert_eq!(root.name, "hello");
//! let greeting = root.value.as_compound().and_then(|c| c.get("name"));
//! assert_eq!(greeting.and_then(|v| v.as_str()), Some("Bananrama"));
//! # Ok(())
//! # }
//! ```
//!
//! Use [`from_bytes_owned`] or [`parse`] when the tree needs to outlive its
//! input.
use std::borrow::Cow;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::buffer::ByteReader;
use crate::compression::{decompress, Compression};
use crate::error::{Error, Result};
use crate::{Compound, List, Named, Tag, Value};

/// Compounds and lists may nest this deep by default. The root counts as one
/// level.
pub const MAX_DEPTH: usize = 1024;

const GZIP_MAGIC: u16 = 0x1f8b;

// Most compounds in world data are small.
const COMPOUND_CAPACITY: usize = 4;

/// Options for customising parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOpts {
    pub(crate) max_depth: usize,
    pub(crate) owned: bool,
}

impl ParseOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum nesting of compounds and lists, counting the root.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Copy strings and byte arrays out of the input rather than borrowing
    /// them.
    pub fn owned(mut self, owned: bool) -> Self {
        self.owned = owned;
        self
    }
}

impl Default for ParseOpts {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            owned: false,
        }
    }
}

/// A parser over a byte slice.
///
/// Open lists and compounds are kept on a heap stack rather than the call
/// stack, so nesting is bounded only by [`ParseOpts::max_depth`].
///
/// A parser that has returned an error should be dropped rather than used
/// again.
pub struct Parser<'a> {
    input: ByteReader<'a>,
    opts: ParseOpts,
}

/// A container whose children are still being read.
enum Open<'a> {
    List {
        name: Cow<'a, str>,
        element: Tag,
        left: usize,
        items: Vec<Value<'a>>,
    },
    Compound {
        name: Cow<'a, str>,
        compound: Compound<'a>,
    },
}

impl<'a> Open<'a> {
    fn close(self) -> Named<'a> {
        match self {
            Open::List {
                name,
                element,
                items,
                ..
            } => Named {
                name,
                value: Value::List(List::from_parts_unchecked(element, items)),
            },
            Open::Compound { name, compound } => Named {
                name,
                value: Value::Compound(compound),
            },
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8], opts: ParseOpts) -> Self {
        Self {
            input: ByteReader::new(data),
            opts,
        }
    }

    /// Bytes left after the last parsed value. Anything following the root is
    /// not an error, it is simply left here.
    pub fn remaining(&self) -> usize {
        self.input.remaining()
    }

    /// Parse one named root value.
    pub fn parse_root(&mut self) -> Result<Named<'a>> {
        if self.input.position() == 0 && self.input.remaining() >= 2 {
            let mut peek = self.input.clone();
            if peek.read_u16()? == GZIP_MAGIC {
                return Err(Error::malformed(
                    "invalid nbt: input looks gzip compressed, decompress it first",
                ));
            }
        }

        let tag = self.consume_tag()?;
        if tag == Tag::End {
            return Err(Error::malformed("root tag is End"));
        }

        let name = self.consume_str()?;
        let value = self.parse_value(tag)?;
        Ok(Named { name, value })
    }

    fn parse_value(&mut self, tag: Tag) -> Result<Value<'a>> {
        let mut stack = Vec::new();
        if let Some(done) = self.parse_payload(Cow::Borrowed(""), tag, &mut stack)? {
            return Ok(done.value);
        }

        while let Some(top) = stack.last_mut() {
            let child = match top {
                Open::List { element, left, .. } if *left > 0 => {
                    *left -= 1;
                    Some((Cow::Borrowed(""), *element))
                }
                Open::List { .. } => None,
                Open::Compound { .. } => match self.consume_tag()? {
                    Tag::End => None,
                    tag => Some((self.consume_str()?, tag)),
                },
            };

            let done = match child {
                Some((name, tag)) => self.parse_payload(name, tag, &mut stack)?,
                None => stack.pop().map(Open::close),
            };

            if let Some(done) = done {
                match stack.last_mut() {
                    Some(Open::List { items, .. }) => items.push(done.value),
                    Some(Open::Compound { compound, .. }) => compound.push(done),
                    None => return Ok(done.value),
                }
            }
        }

        Err(Error::malformed("container was never closed"))
    }

    /// Read the payload for `tag`. Lists and compounds are pushed onto `stack`
    /// and returned later by [`Self::parse_value`] once they are closed.
    fn parse_payload(
        &mut self,
        name: Cow<'a, str>,
        tag: Tag,
        stack: &mut Vec<Open<'a>>,
    ) -> Result<Option<Named<'a>>> {
        let value = match tag {
            Tag::End => return Err(Error::malformed("End tag has no payload")),
            Tag::Byte => Value::Byte(self.input.read_i8()?),
            Tag::Short => Value::Short(self.input.read_i16()?),
            Tag::Int => Value::Int(self.input.read_i32()?),
            Tag::Long => Value::Long(self.input.read_i64()?),
            Tag::Float => Value::Float(self.input.read_f32()?),
            Tag::Double => Value::Double(self.input.read_f64()?),
            Tag::ByteArray => {
                let len = self.input.read_len()?;
                let bs = bytes_as_i8(self.input.read_bytes(len)?);
                Value::ByteArray(if self.opts.owned {
                    Cow::Owned(bs.to_vec())
                } else {
                    Cow::Borrowed(bs)
                })
            }
            Tag::String => Value::String(self.consume_str()?),
            Tag::IntArray => {
                let len = self.input.read_len()?;
                let size = len
                    .checked_mul(std::mem::size_of::<i32>())
                    .ok_or_else(|| Error::malformed(format!("int array too large: {}", len)))?;
                let bs = self.input.read_bytes(size)?;
                Value::IntArray(bs.chunks_exact(4).map(BigEndian::read_i32).collect())
            }
            Tag::List => {
                self.check_depth(stack.len())?;

                let element = self.consume_tag()?;
                let len = self.input.read_len()?;
                if element == Tag::End && len > 0 {
                    return Err(Error::malformed(format!(
                        "list of End tags cannot hold {} elements",
                        len
                    )));
                }

                // Every element takes at least a byte, so this bounds the
                // allocation by the input rather than by a declared length.
                let items = Vec::with_capacity(len.min(self.input.remaining()));
                stack.push(Open::List {
                    name,
                    element,
                    left: len,
                    items,
                });
                return Ok(None);
            }
            Tag::Compound => {
                self.check_depth(stack.len())?;
                stack.push(Open::Compound {
                    name,
                    compound: Compound::with_capacity(COMPOUND_CAPACITY),
                });
                return Ok(None);
            }
        };

        Ok(Some(Named { name, value }))
    }

    fn check_depth(&self, open: usize) -> Result<()> {
        if open >= self.opts.max_depth {
            debug!(
                "nbt nesting exceeded {} at offset {}",
                self.opts.max_depth,
                self.input.position()
            );
            return Err(Error::depth_exceeded(self.opts.max_depth));
        }
        Ok(())
    }

    fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.input.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    fn consume_str(&mut self) -> Result<Cow<'a, str>> {
        let raw = self.input.read_u16_prefixed()?;
        let s = cesu8::from_java_cesu8(raw).map_err(|_| Error::nonunicode_string(raw))?;

        Ok(match s {
            Cow::Borrowed(s) if !self.opts.owned => Cow::Borrowed(s),
            s => Cow::Owned(s.into_owned()),
        })
    }
}

/// Parse a document, borrowing strings and byte arrays from `input`.
pub fn from_bytes(input: &[u8]) -> Result<Named<'_>> {
    Parser::new(input, ParseOpts::default()).parse_root()
}

/// Parse a document into a tree that owns all of its data.
pub fn from_bytes_owned(input: &[u8]) -> Result<Named<'static>> {
    from_bytes_with_opts(input, ParseOpts::default().owned(true)).map(Named::into_owned)
}

pub fn from_bytes_with_opts(input: &[u8], opts: ParseOpts) -> Result<Named<'_>> {
    Parser::new(input, opts).parse_root()
}

/// Decompress `input` and parse the document inside.
///
/// The result owns its data, since the decompressed buffer does not outlive
/// this call.
pub fn parse(input: &[u8], scheme: Compression) -> Result<Named<'static>> {
    parse_with_opts(input, scheme, ParseOpts::default())
}

pub fn parse_with_opts(input: &[u8], scheme: Compression, opts: ParseOpts) -> Result<Named<'static>> {
    let opts = opts.owned(true);
    match scheme {
        Compression::Uncompressed => from_bytes_with_opts(input, opts).map(Named::into_owned),
        _ => {
            let raw = decompress(input, scheme)?;
            from_bytes_with_opts(&raw, opts).map(Named::into_owned)
        }
    }
}

fn bytes_as_i8(bs: &[u8]) -> &[i8] {
    // u8 and i8 have the same size and alignment.
    unsafe { std::slice::from_raw_parts(bs.as_ptr() as *const i8, bs.len()) }
}
