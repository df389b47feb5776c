use mcnbt::{Compound, List, Named, Tag, Value};

use crate::{REGION_HEADER_SIZE, SECTOR_SIZE};

mod column;

/// Builder for raw region files. Like the NBT builder it does not guarantee a
/// valid result, so chunk headers can lie about their length or scheme.
pub struct Builder {
    header: Vec<u8>,
    body: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            header: vec![0; REGION_HEADER_SIZE],
            body: Vec::new(),
        }
    }

    /// Append a chunk at the next free sector and point slot `x`, `z` at it.
    pub fn chunk(mut self, x: usize, z: usize, len: i32, scheme: u8, payload: &[u8]) -> Self {
        let offset = 1 + self.body.len() / SECTOR_SIZE;
        self.body.extend_from_slice(&len.to_be_bytes());
        self.body.push(scheme);
        self.body.extend_from_slice(payload);

        let rem = self.body.len() % SECTOR_SIZE;
        if rem != 0 {
            self.body.resize(self.body.len() + SECTOR_SIZE - rem, 0);
        }
        let sectors = 1 + self.body.len() / SECTOR_SIZE - offset;

        self.location(x, z, ((offset as u32) << 8) | sectors as u32)
    }

    pub fn location(mut self, x: usize, z: usize, word: u32) -> Self {
        let pos = 4 * (x + z * 32);
        self.header[pos..pos + 4].copy_from_slice(&word.to_be_bytes());
        self
    }

    pub fn gzip_chunk(self, x: usize, z: usize, root: &Named) -> Self {
        let payload = mcnbt::encode(root, mcnbt::Compression::Gzip).unwrap();
        self.chunk(x, z, payload.len() as i32 + 1, 1, &payload)
    }

    pub fn zlib_chunk(self, x: usize, z: usize, root: &Named) -> Self {
        let payload = mcnbt::encode(root, mcnbt::Compression::Zlib).unwrap();
        self.chunk(x, z, payload.len() as i32 + 1, 2, &payload)
    }

    pub fn build(mut self) -> Vec<u8> {
        self.header.extend_from_slice(&self.body);
        self.header
    }
}

/// The smallest `Level` compound that maps to a column.
pub fn level(x: i32, z: i32) -> Compound<'static> {
    let mut level = Compound::new();
    level.insert("xPos", x);
    level.insert("zPos", z);
    level.insert("LastUpdate", 0i64);
    level.insert("TerrainPopulated", 1i8);
    level.insert("InhabitedTime", 0i64);
    level.insert("Biomes", vec![1i8; 256]);
    level.insert("HeightMap", vec![64i32; 256]);
    level.insert("Sections", List::new(Tag::Compound));
    level.insert("Entities", List::new(Tag::Compound));
    level
}

pub fn root(level: Compound<'static>) -> Named<'static> {
    let mut root = Compound::new();
    root.insert("Level", level);
    Named::new("", Value::Compound(root))
}

/// A section compound of air with the given Y.
pub fn section(y: i8) -> Compound<'static> {
    let mut section = Compound::new();
    section.insert("Y", y);
    section.insert("Blocks", vec![0i8; 4096]);
    section.insert("Data", vec![0i8; 2048]);
    section.insert("BlockLight", vec![0i8; 2048]);
    section.insert("SkyLight", vec![0i8; 2048]);
    section
}

pub fn tile(id: &'static str, x: i32, y: i32, z: i32) -> Compound<'static> {
    let mut tile = Compound::new();
    tile.insert("id", id);
    tile.insert("x", x);
    tile.insert("y", y);
    tile.insert("z", z);
    tile
}

pub fn compounds(items: Vec<Compound<'static>>) -> List<'static> {
    List::from_values(Tag::Compound, items.into_iter().map(Value::Compound).collect()).unwrap()
}
