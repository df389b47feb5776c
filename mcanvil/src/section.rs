use mcnbt::error::{Error, Result};
use mcnbt::{Compound, Value};
use serde::Serialize;

use crate::bits::{get_nibble, pack_nibbles};

/// Width of a section along each axis, in blocks.
pub const SECTION_WIDTH: usize = 16;

/// Number of blocks in a section.
pub const SECTION_VOLUME: usize = SECTION_WIDTH * SECTION_WIDTH * SECTION_WIDTH;

const NIBBLE_ARRAY_LEN: usize = SECTION_VOLUME / 2;

/// A single block of a section.
///
/// Fields are stored at their on-disk width when encoded: bits of `id` above
/// the low 12 and bits of the nibble fields above the low 4 are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    /// Block id, `0..4096`. Ids above 255 need the section's `Add` array.
    pub id: u16,
    /// Block metadata, `0..16`.
    pub metadata: u8,
    /// Block light, `0..16`.
    pub light: u8,
    /// Sky light, `0..16`.
    pub skylight: u8,
    /// Tile entity data for this block, if it has any.
    pub tile: Option<Compound<'static>>,
}

/// A 16x16x16 section of a chunk column.
///
/// Blocks are indexed `x + 16 * z + 256 * y`, matching the order of the
/// section's byte arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    blocks: Vec<Block>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    /// A section of air, with no light.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default(); SECTION_VOLUME],
        }
    }

    /// Index of the block at section-local coordinates.
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < SECTION_WIDTH && y < SECTION_WIDTH && z < SECTION_WIDTH);
        x + z * SECTION_WIDTH + y * SECTION_WIDTH * SECTION_WIDTH
    }

    /// Panics if a coordinate is outside `0..16`.
    pub fn block(&self, x: usize, y: usize, z: usize) -> &Block {
        &self.blocks[Self::index(x, y, z)]
    }

    /// Panics if a coordinate is outside `0..16`.
    pub fn block_mut(&mut self, x: usize, y: usize, z: usize) -> &mut Block {
        &mut self.blocks[Self::index(x, y, z)]
    }

    /// All blocks in index order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Blocks that carry tile entity data, with their section-local
    /// coordinates.
    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize, usize), &Compound<'static>)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| {
            let tile = b.tile.as_ref()?;
            let pos = (
                i % SECTION_WIDTH,
                i / (SECTION_WIDTH * SECTION_WIDTH),
                (i / SECTION_WIDTH) % SECTION_WIDTH,
            );
            Some((pos, tile))
        })
    }

    /// Decode a section compound, returning its Y index along with it.
    ///
    /// `Blocks` must hold 4096 bytes and `Data`, `BlockLight` and `SkyLight`
    /// 2048 each. `Add` is optional but must hold 2048 bytes when present.
    pub(crate) fn from_nbt(section: &Compound<'_>) -> Result<(i8, Chunk)> {
        let y = section.get_i8("Y")?;
        let blocks = byte_array(section, "Blocks", SECTION_VOLUME)?;
        let add = match section.get("Add") {
            None => None,
            Some(_) => Some(byte_array(section, "Add", NIBBLE_ARRAY_LEN)?),
        };
        let data = byte_array(section, "Data", NIBBLE_ARRAY_LEN)?;
        let light = byte_array(section, "BlockLight", NIBBLE_ARRAY_LEN)?;
        let skylight = byte_array(section, "SkyLight", NIBBLE_ARRAY_LEN)?;

        let blocks = (0..SECTION_VOLUME)
            .map(|i| {
                let high = add.map_or(0, |add| get_nibble(add, i)) as u16;
                Block {
                    id: (high << 8) | blocks[i] as u8 as u16,
                    metadata: get_nibble(data, i),
                    light: get_nibble(light, i),
                    skylight: get_nibble(skylight, i),
                    tile: None,
                }
            })
            .collect();

        Ok((y, Chunk { blocks }))
    }

    /// Encode as a section compound with the given Y index. Block fields are
    /// masked to their stored width.
    pub(crate) fn to_nbt(&self, y: i8) -> Compound<'static> {
        let blocks: Vec<i8> = self.blocks.iter().map(|b| b.id as u8 as i8).collect();
        let add = pack_nibbles(self.blocks.iter().map(|b| (b.id >> 8) as u8));
        let data = pack_nibbles(self.blocks.iter().map(|b| b.metadata));
        let light = pack_nibbles(self.blocks.iter().map(|b| b.light));
        let skylight = pack_nibbles(self.blocks.iter().map(|b| b.skylight));

        let mut section = Compound::with_capacity(6);
        section.insert("Y", Value::Byte(y));
        section.insert("Blocks", blocks);
        section.insert("Add", add);
        section.insert("Data", data);
        section.insert("BlockLight", light);
        section.insert("SkyLight", skylight);
        section
    }
}

fn byte_array<'c>(section: &'c Compound<'_>, key: &str, len: usize) -> Result<&'c [i8]> {
    let bs = section.get_byte_array(key)?;
    if bs.len() != len {
        return Err(Error::wrong_length(key, len, bs.len()));
    }
    Ok(bs)
}
