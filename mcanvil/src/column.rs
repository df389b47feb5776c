use log::trace;
use mcnbt::error::Error as NbtError;
use mcnbt::{Compound, List, Named, Tag, Value};

use crate::{At, Biome, Block, Chunk, Entity, Error, Result, SECTION_WIDTH};

/// Number of sections stacked in a column.
pub const SECTIONS_PER_COLUMN: usize = 16;

/// Height of a column, in blocks.
pub const COLUMN_HEIGHT: usize = SECTIONS_PER_COLUMN * SECTION_WIDTH;

const COLUMN_AREA: usize = SECTION_WIDTH * SECTION_WIDTH;

/// A chunk column: 16 sections stacked vertically, with the per-column data
/// that goes alongside them.
///
/// Per-column arrays are indexed `x + 16 * z`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Whether this slot of the region holds a column at all. Columns that
    /// are not generated are skipped when encoding.
    pub generated: bool,
    pub populated: bool,
    /// Column position in the world, in chunks.
    pub x: i32,
    pub z: i32,
    pub last_update: i64,
    pub inhabited_time: i64,
    pub biomes: [Biome; COLUMN_AREA],
    pub height_map: [i32; COLUMN_AREA],
    pub sections: [Option<Chunk>; SECTIONS_PER_COLUMN],
    pub entities: Vec<Entity>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            generated: false,
            populated: false,
            x: 0,
            z: 0,
            last_update: 0,
            inhabited_time: 0,
            biomes: [Biome::NotGenerated; COLUMN_AREA],
            height_map: [0; COLUMN_AREA],
            sections: Default::default(),
            entities: Vec::new(),
        }
    }
}

impl Column {
    /// An empty generated column at the given chunk position.
    pub fn new(x: i32, z: i32) -> Self {
        Self {
            generated: true,
            x,
            z,
            ..Default::default()
        }
    }

    /// The block at column-local `x` and `z` and absolute `y`. `None` when the
    /// section holding it is absent.
    pub fn block(&self, x: usize, y: usize, z: usize) -> Option<&Block> {
        let section = self.sections.get(y / SECTION_WIDTH)?.as_ref()?;
        Some(section.block(x, y % SECTION_WIDTH, z))
    }

    pub fn block_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut Block> {
        let section = self.sections.get_mut(y / SECTION_WIDTH)?.as_mut()?;
        Some(section.block_mut(x, y % SECTION_WIDTH, z))
    }

    pub fn biome(&self, x: usize, z: usize) -> Biome {
        self.biomes[x + z * SECTION_WIDTH]
    }

    pub fn height(&self, x: usize, z: usize) -> i32 {
        self.height_map[x + z * SECTION_WIDTH]
    }

    /// Decode a chunk's root compound. `slot_x` and `slot_z` are the column's
    /// position in its region, used to label errors.
    pub(crate) fn from_nbt(root: &Named<'_>, slot_x: usize, slot_z: usize) -> Result<Self> {
        let at = |e: NbtError| Error::Nbt {
            x: slot_x,
            z: slot_z,
            source: e,
        };

        let root = root
            .value
            .as_compound()
            .ok_or_else(|| at(NbtError::wrong_tag("", Tag::Compound, root.tag())))?;
        let level = root.get_compound("Level").map_err(at)?;

        let mut column = Column {
            generated: true,
            populated: level.get_i8("TerrainPopulated").map_err(at)? != 0,
            x: level.get_i32("xPos").map_err(at)?,
            z: level.get_i32("zPos").map_err(at)?,
            last_update: level.get_i64("LastUpdate").map_err(at)?,
            inhabited_time: level.get_i64("InhabitedTime").map_err(at)?,
            ..Default::default()
        };

        let biomes = level.get_byte_array("Biomes").map_err(at)?;
        if biomes.len() != COLUMN_AREA {
            return Err(at(NbtError::wrong_length("Biomes", COLUMN_AREA, biomes.len())));
        }
        for (biome, id) in column.biomes.iter_mut().zip(biomes) {
            *biome = Biome::from(*id as u8);
        }

        for section in compounds(level, "Sections").map_err(at)? {
            let (y, chunk) = Chunk::from_nbt(section).map_err(at)?;
            let index = usize::try_from(y)
                .ok()
                .filter(|&y| y < SECTIONS_PER_COLUMN)
                .ok_or(Error::SectionOutOfRange {
                    x: slot_x,
                    z: slot_z,
                    y,
                })?;
            column.sections[index] = Some(chunk);
        }

        for entity in compounds(level, "Entities").map_err(at)? {
            column.entities.push(Entity::from_nbt(entity).map_err(at)?);
        }

        // Older chunks may have no tile entity list at all.
        if level.contains_key("TileEntities") {
            for tile in compounds(level, "TileEntities").map_err(at)? {
                column.attach_tile(tile, slot_x, slot_z)?;
            }
        }

        let heights = level.get_int_array("HeightMap").map_err(at)?;
        if heights.len() != COLUMN_AREA {
            return Err(at(NbtError::wrong_length("HeightMap", COLUMN_AREA, heights.len())));
        }
        column.height_map.copy_from_slice(heights);

        trace!(
            "parsed column ({}, {}) at slot ({}, {}): {} sections, {} entities",
            column.x,
            column.z,
            slot_x,
            slot_z,
            column.sections.iter().flatten().count(),
            column.entities.len()
        );

        Ok(column)
    }

    /// Copy a tile entity onto the block it belongs to. Its coordinates are
    /// absolute; only their position within a section is kept.
    fn attach_tile(&mut self, tile: &Compound<'_>, slot_x: usize, slot_z: usize) -> Result<()> {
        let x = tile.get_i32("x").at(slot_x, slot_z)?;
        let y = tile.get_i32("y").at(slot_x, slot_z)?;
        let z = tile.get_i32("z").at(slot_x, slot_z)?;

        let width = SECTION_WIDTH as i32;
        let section = usize::try_from(y.div_euclid(width))
            .ok()
            .filter(|&s| s < SECTIONS_PER_COLUMN)
            .ok_or(Error::TileOutOfRange {
                x: slot_x,
                z: slot_z,
                y,
            })?;

        let chunk = self.sections[section]
            .as_mut()
            .ok_or(Error::MissingSection {
                x: slot_x,
                z: slot_z,
                section,
            })?;

        let block = chunk.block_mut(
            x.rem_euclid(width) as usize,
            y.rem_euclid(width) as usize,
            z.rem_euclid(width) as usize,
        );
        block.tile = Some(tile.to_owned_compound());
        Ok(())
    }

    /// Encode as a chunk root compound. Tile entity coordinates are rewritten
    /// from each block's position and the column's `x` and `z`, and must fit
    /// in an `i32`.
    pub(crate) fn to_nbt(&self) -> mcnbt::error::Result<Named<'static>> {
        let mut level = Compound::with_capacity(10);
        level.insert("xPos", self.x);
        level.insert("zPos", self.z);
        level.insert("LastUpdate", self.last_update);
        level.insert("TerrainPopulated", self.populated);
        level.insert("InhabitedTime", self.inhabited_time);

        let biomes: Vec<i8> = self.biomes.iter().map(|&b| u8::from(b) as i8).collect();
        level.insert("Biomes", biomes);

        let mut sections = List::new(Tag::Compound);
        let mut tiles = List::new(Tag::Compound);
        for (y, chunk) in self.sections.iter().enumerate() {
            let Some(chunk) = chunk else { continue };
            sections.push(chunk.to_nbt(y as i8))?;

            for ((bx, by, bz), tile) in chunk.tiles() {
                let mut tile = tile.clone();
                tile.insert("x", world_coord("x", self.x, bx)?);
                tile.insert("y", world_coord("y", y as i32, by)?);
                tile.insert("z", world_coord("z", self.z, bz)?);
                tiles.push(tile)?;
            }
        }
        level.insert("Sections", sections);

        let mut entities = List::with_capacity(Tag::Compound, self.entities.len());
        for entity in &self.entities {
            entities.push(entity.to_nbt())?;
        }
        level.insert("Entities", entities);
        level.insert("TileEntities", tiles);
        level.insert("HeightMap", self.height_map.to_vec());

        let mut root = Compound::with_capacity(1);
        root.insert("Level", level);
        Ok(Named::new("", Value::Compound(root)))
    }
}

/// The block coordinate of `offset` within the section or column at `index`
/// along one axis. Columns near the edge of `i32` have no representable
/// block coordinates.
fn world_coord(axis: &str, index: i32, offset: usize) -> mcnbt::error::Result<i32> {
    index
        .checked_mul(SECTION_WIDTH as i32)
        .and_then(|base| base.checked_add(offset as i32))
        .ok_or_else(|| {
            NbtError::out_of_range(format!(
                "tile entity {} coordinate overflows for chunk {}",
                axis, index
            ))
        })
}

/// The compounds of a list, which must be a list of compounds unless empty.
fn compounds<'c, 'a>(
    level: &'c Compound<'a>,
    key: &str,
) -> mcnbt::error::Result<impl Iterator<Item = &'c Compound<'a>>> {
    let list = level.get_list(key)?;
    if !list.is_empty() && list.element_tag() != Tag::Compound {
        return Err(NbtError::wrong_tag(key, Tag::Compound, list.element_tag()));
    }
    Ok(list.iter().filter_map(Value::as_compound))
}
