use mcanvil::Region;

//
// This loads a pre-1.13 region file and prints a line per generated column.
//

fn main() {
    let path = std::env::args().nth(1).unwrap();
    let data = std::fs::read(path).unwrap();

    let region = Region::from_bytes(&data).unwrap();

    for ((x, z), column) in region.generated() {
        let sections = column.sections.iter().flatten().count();
        let tiles: usize = column
            .sections
            .iter()
            .flatten()
            .map(|s| s.tiles().count())
            .sum();

        println!(
            "({:2}, {:2}) at chunk ({}, {}): {} sections, {} entities, {} tile entities",
            x,
            z,
            column.x,
            column.z,
            sections,
            column.entities.len(),
            tiles
        );
    }
}
