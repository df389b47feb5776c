use mcnbt::{ErrorKind, List, Named, Tag, Value};

use super::{compounds, level, root, section, tile};
use crate::{Biome, Chunk, Column, Error};

fn parse(root: &Named) -> crate::Result<Column> {
    Column::from_nbt(root, 4, 9)
}

#[test]
fn biome_ids_round_trip() {
    assert_eq!(Biome::from(0), Biome::Ocean);
    assert_eq!(Biome::from(22), Biome::JungleHills);
    assert_eq!(Biome::from(255), Biome::NotGenerated);
    assert_eq!(Biome::from(100), Biome::Unknown(100));
    assert_eq!(u8::from(Biome::Swampland), 6);
    assert_eq!(u8::from(Biome::NotGenerated), 255);
    assert_eq!(u8::from(Biome::Unknown(100)), 100);
    assert_eq!(Biome::default(), Biome::NotGenerated);
}

#[test]
fn default_column_is_not_generated() {
    let column = Column::default();
    assert!(!column.generated);
    assert!(Column::new(1, 2).generated);
    assert_eq!(column.biome(0, 0), Biome::NotGenerated);
}

#[test]
fn block_lookup_spans_sections() {
    let mut column = Column::new(0, 0);
    column.sections[2] = Some(Chunk::new());
    column.block_mut(1, 40, 3).unwrap().id = 17;

    assert_eq!(column.sections[2].as_ref().unwrap().block(1, 8, 3).id, 17);
    assert_eq!(column.block(1, 40, 3).unwrap().id, 17);
    assert!(column.block(1, 0, 3).is_none());
    assert!(column.block(0, 256, 0).is_none());
}

#[test]
fn section_y_outside_column_is_out_of_range() {
    for y in [16i8, -1] {
        let mut level = level(0, 0);
        level.insert("Sections", compounds(vec![section(y)]));

        let err = parse(&root(level)).unwrap_err();
        assert!(
            matches!(err, Error::SectionOutOfRange { x: 4, z: 9, y: found } if found == y),
            "{:?}",
            err
        );
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }
}

#[test]
fn tiles_attach_with_euclidean_coordinates() {
    let mut level = level(-1, -2);
    level.insert("Sections", compounds(vec![section(0), section(1)]));
    level.insert(
        "TileEntities",
        compounds(vec![tile("Chest", -3, 20, -17), tile("Sign", -16, 0, -32)]),
    );

    let column = parse(&root(level)).unwrap();

    let chest = column.block(13, 20, 15).unwrap().tile.as_ref().unwrap();
    assert_eq!(chest.get_str("id").unwrap(), "Chest");
    assert_eq!(chest.get_i32("x").unwrap(), -3);

    let sign = column.block(0, 0, 0).unwrap().tile.as_ref().unwrap();
    assert_eq!(sign.get_str("id").unwrap(), "Sign");
}

#[test]
fn tile_entities_are_optional() {
    let column = parse(&root(level(0, 0))).unwrap();
    assert!(column.sections.iter().all(Option::is_none));

    // an empty list may declare any element tag
    let mut level = level(0, 0);
    level.insert("TileEntities", List::new(Tag::End));
    level.insert("Entities", List::new(Tag::Byte));
    assert!(parse(&root(level)).is_ok());
}

#[test]
fn non_compound_tile_list_is_schema_mismatch() {
    let mut level = level(0, 0);
    level.insert("TileEntities", List::from(vec![1i32, 2, 3]));
    let err = parse(&root(level)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn tile_in_missing_section_is_schema_mismatch() {
    let mut level = level(0, 0);
    level.insert("Sections", compounds(vec![section(0)]));
    level.insert("TileEntities", compounds(vec![tile("Chest", 1, 40, 1)]));

    let err = parse(&root(level)).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingSection {
            x: 4,
            z: 9,
            section: 2
        }
    ));
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn tile_outside_column_is_out_of_range() {
    for y in [-1, 256] {
        let mut level = level(0, 0);
        level.insert("Sections", compounds(vec![section(0)]));
        level.insert("TileEntities", compounds(vec![tile("Chest", 0, y, 0)]));

        let err = parse(&root(level)).unwrap_err();
        assert!(matches!(err, Error::TileOutOfRange { y: found, .. } if found == y));
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }
}

#[test]
fn tile_without_coordinates_is_schema_mismatch() {
    let mut chest = tile("Chest", 0, 0, 0);
    chest.remove("y");

    let mut level = level(0, 0);
    level.insert("Sections", compounds(vec![section(0)]));
    level.insert("TileEntities", compounds(vec![chest]));

    let err = parse(&root(level)).unwrap_err();
    assert!(matches!(err, Error::Nbt { x: 4, z: 9, .. }));
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn per_column_arrays_need_256_entries() {
    let mut short = level(0, 0);
    short.insert("Biomes", vec![0i8; 255]);
    assert_eq!(
        parse(&root(short)).unwrap_err().kind(),
        ErrorKind::SchemaMismatch
    );

    let mut long = level(0, 0);
    long.insert("HeightMap", vec![0i32; 257]);
    assert_eq!(
        parse(&root(long)).unwrap_err().kind(),
        ErrorKind::SchemaMismatch
    );

    let mut mistyped = level(0, 0);
    mistyped.insert("HeightMap", vec![0i8; 256]);
    assert_eq!(
        parse(&root(mistyped)).unwrap_err().kind(),
        ErrorKind::SchemaMismatch
    );
}

#[test]
fn non_compound_root_is_schema_mismatch() {
    let err = parse(&Named::new("", Value::Int(3))).unwrap_err();
    assert!(matches!(err, Error::Nbt { x: 4, z: 9, .. }));
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn encoding_rewrites_tile_coordinates() {
    let mut column = Column::new(-2, 3);
    let mut section = Chunk::new();
    section.block_mut(1, 2, 3).tile = Some(tile("Furnace", 0, 0, 0));
    column.sections[4] = Some(section);

    let root = column.to_nbt().unwrap();
    let level = root
        .value
        .as_compound()
        .unwrap()
        .get_compound("Level")
        .unwrap();

    let tiles = level.get_list("TileEntities").unwrap();
    assert_eq!(tiles.len(), 1);
    let furnace = tiles.get(0).unwrap().as_compound().unwrap();
    assert_eq!(furnace.get_i32("x").unwrap(), -31);
    assert_eq!(furnace.get_i32("y").unwrap(), 66);
    assert_eq!(furnace.get_i32("z").unwrap(), 51);
    assert_eq!(furnace.get_str("id").unwrap(), "Furnace");

    // reading it back finds the same block
    let back = parse(&root).unwrap();
    let tile = back.block(1, 66, 3).unwrap().tile.as_ref().unwrap();
    assert_eq!(tile.get_i32("x").unwrap(), -31);
}

#[test]
fn encoded_level_layout() {
    let mut column = Column::new(5, 6);
    column.sections[1] = Some(Chunk::new());
    column.sections[9] = Some(Chunk::new());
    column.populated = true;

    let root = column.to_nbt().unwrap();
    assert_eq!(root.name, "");
    let level = root
        .value
        .as_compound()
        .unwrap()
        .get_compound("Level")
        .unwrap();

    let keys: Vec<&str> = level.iter().map(|e| &*e.name).collect();
    assert_eq!(
        keys,
        vec![
            "xPos",
            "zPos",
            "LastUpdate",
            "TerrainPopulated",
            "InhabitedTime",
            "Biomes",
            "Sections",
            "Entities",
            "TileEntities",
            "HeightMap",
        ]
    );
    assert_eq!(level.get_i8("TerrainPopulated").unwrap(), 1);

    let ys: Vec<i8> = level
        .get_list("Sections")
        .unwrap()
        .iter()
        .map(|s| s.as_compound().unwrap().get_i8("Y").unwrap())
        .collect();
    assert_eq!(ys, vec![1, 9]);

    let tiles = level.get_list("TileEntities").unwrap();
    assert!(tiles.is_empty());
    assert_eq!(tiles.element_tag(), Tag::Compound);
}

#[test]
fn tile_coordinates_must_fit_in_i32() {
    let with_tile = |x: i32, z: i32| {
        let mut column = Column::new(x, z);
        let mut section = Chunk::new();
        section.block_mut(15, 0, 15).tile = Some(tile("Chest", 0, 0, 0));
        column.sections[0] = Some(section);
        column
    };

    // the last columns whose blocks are all addressable
    let root = with_tile(i32::MAX / 16, i32::MIN / 16).to_nbt().unwrap();
    let level = root
        .value
        .as_compound()
        .unwrap()
        .get_compound("Level")
        .unwrap();
    let chest = level.get_list("TileEntities").unwrap().get(0).unwrap();
    let chest = chest.as_compound().unwrap();
    assert_eq!(chest.get_i32("x").unwrap(), i32::MAX);
    assert_eq!(chest.get_i32("z").unwrap(), i32::MIN + 15);

    for (x, z) in [(i32::MAX / 8, 0), (0, i32::MIN / 16 - 1), (i32::MAX / 16 + 1, 0)] {
        let err = with_tile(x, z).to_nbt().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange, "({}, {})", x, z);
    }

    // without tiles there is nothing to compute
    assert!(Column::new(i32::MAX, i32::MIN).to_nbt().is_ok());
}
