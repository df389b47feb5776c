//! mcnbt parses and encodes NBT, the tagged binary tree format *Minecraft:
//! Java Edition* uses for level data, player data and the chunks stored in
//! region files.
//!
//! * For the value tree see [`Value`], [`Named`], [`Compound`] and [`List`].
//! * For parsing, borrowed or owned, see [`de`].
//! * For encoding see [`ser`].
//! * For gzip and zlib framing see [`compression`].
//! * For the big-endian cursors shared with region code see [`buffer`].
//!
//! All multi-byte numbers are big-endian and strings are Java's modified
//! UTF-8. Tags 0 through 11 are supported; the later Long Array tag is not
//! part of this format and is rejected as malformed.
//!
//! # Quick example
//!
//! ```
//! use mcnbt::{Compound, Compression, List, Named, Tag, Value};
//!
//! let mut pos = List::new(Tag::Double);
//! pos.push(0.5)?;
//! pos.push(64.0)?;
//! pos.push(-12.5)?;
//!
//! let mut player = Compound::new();
//! player.insert("Pos", pos);
//! player.insert("Health", Value::Short(20));
//!
//! let doc = Named::new("", player);
//! let bytes = mcnbt::encode(&doc, Compression::Gzip)?;
//!
//! let back = mcnbt::parse(&bytes, Compression::Gzip)?;
//! assert_eq!(back, doc);
//! # Ok::<(), mcnbt::error::Error>(())
//! ```

pub mod buffer;
pub mod compression;
pub mod de;
pub mod error;
pub mod ser;

mod value;

pub use compression::{compress, compress_with_level, decompress, Compression};
pub use de::{from_bytes, from_bytes_owned, parse, ParseOpts, Parser, MAX_DEPTH};
pub use error::{Error, ErrorKind};
pub use ser::{encode, to_bytes, Encoder};
pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a modified UTF-8 string.
    String = 8,
    /// Represents a list of values that all share one tag.
    List = 9,
    /// Represents a struct-like structure of named values.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
