use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace, warn};
use mcnbt::buffer::{ByteReader, ByteWriter};
use num_enum::TryFromPrimitive;

use crate::{At, Column, Error, Result};

/// the size in bytes of a 'sector' in a region file. Sectors are Minecraft's size unit
/// for chunks. For example, a chunk might be `3 * SECTOR_SIZE` bytes. The
/// actual compressed bytes of a chunk may be smaller and the exact value is
/// tracked in the chunk header.
pub const SECTOR_SIZE: usize = 4096;

/// the size of the region file header: one location word per column.
pub const REGION_HEADER_SIZE: usize = SECTOR_SIZE;

/// size of header for each chunk in the region file. This header precedes the
/// compressed chunk data.
pub(crate) const CHUNK_HEADER_SIZE: usize = 5;

/// Number of columns along each side of a region.
pub const REGION_WIDTH: usize = 32;

const REGION_COLUMNS: usize = REGION_WIDTH * REGION_WIDTH;

/// The sector count of a location word is a single byte.
const MAX_SECTORS: usize = 255;

/// Compression schemes a chunk payload can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CompressionScheme {
    Gzip = 1,
    Zlib = 2,
}

impl From<CompressionScheme> for mcnbt::Compression {
    fn from(scheme: CompressionScheme) -> Self {
        match scheme {
            CompressionScheme::Gzip => mcnbt::Compression::Gzip,
            CompressionScheme::Zlib => mcnbt::Compression::Zlib,
        }
    }
}

fn header_pos(x: usize, z: usize) -> usize {
    4 * ((x % REGION_WIDTH) + (z % REGION_WIDTH) * REGION_WIDTH)
}

/// Where a column lives in a region file, as stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// The offset, in units of 4kiB sectors, into the region file this chunk is
    /// located at. Offset 0 is the start of the file, which is the header, so
    /// an offset of 0 means the column is absent.
    pub offset: usize,

    /// The number of 4 kiB sectors that this chunk occupies in the region file.
    pub sectors: usize,
}

impl ChunkLocation {
    fn from_word(word: u32) -> Self {
        Self {
            offset: (word >> 8) as usize,
            sectors: (word & 0xff) as usize,
        }
    }

    fn to_word(self) -> u32 {
        ((self.offset as u32) << 8) | (self.sectors as u32 & 0xff)
    }
}

/// A Minecraft region: a 32 by 32 grid of columns.
///
/// Every slot holds a [`Column`]. Slots that have never been generated hold a
/// default column with `generated` unset, and are left out of the encoded
/// region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    columns: Vec<Column>,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// A region with no generated columns.
    pub fn new() -> Self {
        Self {
            columns: vec![Column::default(); REGION_COLUMNS],
        }
    }

    /// The column in slot `x`, `z`. Both should be in `0..32`.
    pub fn column(&self, x: usize, z: usize) -> Option<&Column> {
        if x >= REGION_WIDTH || z >= REGION_WIDTH {
            return None;
        }
        self.columns.get(x + z * REGION_WIDTH)
    }

    pub fn column_mut(&mut self, x: usize, z: usize) -> Option<&mut Column> {
        if x >= REGION_WIDTH || z >= REGION_WIDTH {
            return None;
        }
        self.columns.get_mut(x + z * REGION_WIDTH)
    }

    /// Every slot along with its position, in header order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Column)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| ((i % REGION_WIDTH, i / REGION_WIDTH), c))
    }

    /// The generated columns along with their positions.
    pub fn generated(&self) -> impl Iterator<Item = ((usize, usize), &Column)> {
        self.iter().filter(|(_, c)| c.generated)
    }

    /// Read an entire region file.
    ///
    /// Columns are decoded one at a time from a borrowed parse of their
    /// decompressed payload. If any column fails, the whole region fails.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < REGION_HEADER_SIZE {
            return Err(Error::Truncated {
                needed: REGION_HEADER_SIZE,
                len: data.len(),
            });
        }

        let mut region = Region::new();

        for z in 0..REGION_WIDTH {
            for x in 0..REGION_WIDTH {
                let pos = header_pos(x, z);
                let loc = ChunkLocation::from_word(BigEndian::read_u32(&data[pos..pos + 4]));
                if loc.offset == 0 {
                    continue;
                }

                match read_column(data, loc, x, z) {
                    Ok(Some(column)) => {
                        debug!("parsed column at ({}, {})", x, z);
                        region.columns[x + z * REGION_WIDTH] = column;
                    }
                    Ok(None) => debug!("column at ({}, {}) has a negative length, skipping", x, z),
                    Err(e) => {
                        warn!("rejecting region: {}", e);
                        return Err(e);
                    }
                }
            }
        }

        Ok(region)
    }

    /// Write the region out. Every generated column is gzipped into its own
    /// run of sectors, in header order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let generated = self.columns.iter().filter(|c| c.generated).count();
        let mut out = ByteWriter::with_capacity(REGION_HEADER_SIZE + generated * SECTOR_SIZE);
        let header = out.reserve(REGION_HEADER_SIZE);

        for (i, column) in self.columns.iter().enumerate() {
            if !column.generated {
                continue;
            }
            let (x, z) = (i % REGION_WIDTH, i / REGION_WIDTH);

            let root = column.to_nbt().at(x, z)?;
            let payload = mcnbt::encode(&root, mcnbt::Compression::Gzip).at(x, z)?;

            let sectors = (CHUNK_HEADER_SIZE + payload.len()).div_ceil(SECTOR_SIZE);
            if sectors > MAX_SECTORS {
                return Err(Error::ChunkTooLarge { x, z, sectors });
            }

            let loc = ChunkLocation {
                offset: out.len() / SECTOR_SIZE,
                sectors,
            };

            // the length includes the compression scheme byte.
            out.write_u32(payload.len() as u32 + 1).at(x, z)?;
            out.write_u8(CompressionScheme::Gzip as u8).at(x, z)?;
            out.write_bytes(&payload).at(x, z)?;
            out.pad_to(SECTOR_SIZE);
            out.patch_u32(header, i, loc.to_word()).at(x, z)?;

            trace!(
                "column ({}, {}) placed at sector {} spanning {}",
                x,
                z,
                loc.offset,
                loc.sectors
            );
        }

        debug!("encoded {} columns into {} bytes", generated, out.len());
        Ok(out.into_inner())
    }
}

/// Read a region file into memory. See [`Region::from_bytes`].
pub fn parse(data: &[u8]) -> Result<Region> {
    Region::from_bytes(data)
}

/// Write a region file. See [`Region::to_bytes`].
pub fn encode(region: &Region) -> Result<Vec<u8>> {
    region.to_bytes()
}

/// Decode the column a header entry points at. Returns `None` for a payload
/// whose length is negative, which marks the column as not generated.
fn read_column(data: &[u8], loc: ChunkLocation, x: usize, z: usize) -> Result<Option<Column>> {
    let start = loc.offset * SECTOR_SIZE;
    let needed = start + CHUNK_HEADER_SIZE;
    if data.len() < needed {
        return Err(Error::Truncated {
            needed,
            len: data.len(),
        });
    }

    let mut reader = ByteReader::new(&data[start..]);
    let len = reader.read_i32().at(x, z)?;
    let scheme = reader.read_u8().at(x, z)?;

    if len < 0 {
        return Ok(None);
    }
    if len == 0 {
        return Err(Error::EmptyChunk { x, z });
    }

    let scheme = CompressionScheme::try_from(scheme)
        .map_err(|_| Error::UnknownCompression { x, z, scheme })?;

    let compressed_len = len as usize - 1;
    if reader.remaining() < compressed_len {
        return Err(Error::Truncated {
            needed: needed + compressed_len,
            len: data.len(),
        });
    }
    let compressed = reader.read_bytes(compressed_len).at(x, z)?;

    trace!(
        "column ({}, {}): {} bytes of {:?} at sector {}",
        x,
        z,
        compressed_len,
        scheme,
        loc.offset
    );

    let raw = mcnbt::decompress(compressed, scheme.into()).at(x, z)?;
    let root = mcnbt::from_bytes(&raw).at(x, z)?;
    Column::from_nbt(&root, x, z).map(Some)
}
