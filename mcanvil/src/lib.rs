//! For handling Minecraft's region format, Anvil, as written before the 1.13
//! block format change.
//!
//! A region file holds a 32 by 32 grid of chunk columns. [`Region::from_bytes`]
//! reads a whole region into typed [`Column`]s, with their sections of blocks,
//! their entities and tile entities. [`Region::to_bytes`] writes it back.
//!
//! ```
//! use mcanvil::{Chunk, Column, Region};
//!
//! let mut region = Region::new();
//!
//! let mut column = Column::new(3, 5);
//! let mut section = Chunk::new();
//! section.block_mut(1, 2, 3).id = 1;
//! column.sections[4] = Some(section);
//! *region.column_mut(3, 5).unwrap() = column;
//!
//! let bytes = region.to_bytes()?;
//! let back = mcanvil::Region::from_bytes(&bytes)?;
//!
//! let block = back.column(3, 5).unwrap().block(1, 66, 3).unwrap();
//! assert_eq!(block.id, 1);
//! # Ok::<(), mcanvil::Error>(())
//! ```

mod biome;
mod bits;
mod column;
mod entity;
mod region;
mod section;

pub use biome::*;
pub use column::*;
pub use entity::*;
pub use region::*;
pub use section::*;

pub use mcnbt::ErrorKind;

#[cfg(test)]
mod test;

/// Errors from reading or writing a region.
///
/// Anything that goes wrong inside a single column carries the column's
/// position in the region, `x` and `z` in `0..32`.
#[derive(Debug)]
pub enum Error {
    /// The input ends before the region header or before a chunk it points
    /// at.
    Truncated { needed: usize, len: usize },
    /// A chunk's NBT could not be decompressed, parsed or mapped.
    Nbt {
        x: usize,
        z: usize,
        source: mcnbt::Error,
    },
    /// A chunk declared a compression scheme other than gzip or zlib.
    UnknownCompression { x: usize, z: usize, scheme: u8 },
    /// A chunk's length field was zero, leaving no room for a scheme byte.
    EmptyChunk { x: usize, z: usize },
    /// A section's Y index is outside `0..16`.
    SectionOutOfRange { x: usize, z: usize, y: i8 },
    /// A tile entity's Y coordinate falls outside the column.
    TileOutOfRange { x: usize, z: usize, y: i32 },
    /// A tile entity refers to a section the column does not have.
    MissingSection { x: usize, z: usize, section: usize },
    /// An encoded chunk needs more than 255 sectors.
    ChunkTooLarge { x: usize, z: usize, sectors: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Truncated { .. } => ErrorKind::Truncated,
            Error::Nbt { source, .. } => source.kind(),
            Error::UnknownCompression { .. } | Error::EmptyChunk { .. } => ErrorKind::Malformed,
            Error::MissingSection { .. } => ErrorKind::SchemaMismatch,
            Error::SectionOutOfRange { .. }
            | Error::TileOutOfRange { .. }
            | Error::ChunkTooLarge { .. } => ErrorKind::OutOfRange,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Truncated { needed, len } => f.write_fmt(format_args!(
                "region truncated: needed {} bytes, have {}",
                needed, len
            )),
            Error::Nbt { x, z, source } => {
                f.write_fmt(format_args!("chunk ({}, {}): {}", x, z, source))
            }
            Error::UnknownCompression { x, z, scheme } => f.write_fmt(format_args!(
                "chunk ({}, {}): compression scheme {} was not recognised",
                x, z, scheme
            )),
            Error::EmptyChunk { x, z } => {
                f.write_fmt(format_args!("chunk ({}, {}): length is zero", x, z))
            }
            Error::SectionOutOfRange { x, z, y } => f.write_fmt(format_args!(
                "chunk ({}, {}): section y = {} is outside 0..16",
                x, z, y
            )),
            Error::TileOutOfRange { x, z, y } => f.write_fmt(format_args!(
                "chunk ({}, {}): tile entity at y = {} is outside the column",
                x, z, y
            )),
            Error::MissingSection { x, z, section } => f.write_fmt(format_args!(
                "chunk ({}, {}): tile entity in missing section {}",
                x, z, section
            )),
            Error::ChunkTooLarge { x, z, sectors } => f.write_fmt(format_args!(
                "chunk ({}, {}): needs {} sectors, at most 255 fit",
                x, z, sectors
            )),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Nbt { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Attach a column position to an NBT error.
pub(crate) trait At<T> {
    fn at(self, x: usize, z: usize) -> Result<T>;
}

impl<T> At<T> for mcnbt::error::Result<T> {
    fn at(self, x: usize, z: usize) -> Result<T> {
        self.map_err(|source| Error::Nbt { x, z, source })
    }
}
