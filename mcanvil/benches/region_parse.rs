use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mcanvil::{Chunk, Column, Region};

fn sample_region() -> Region {
    let mut region = Region::new();
    for z in 0..8 {
        for x in 0..8 {
            let mut column = Column::new(x as i32, z as i32);
            for y in 0..4 {
                let mut section = Chunk::new();
                for (i, block) in section.blocks_mut().iter_mut().enumerate() {
                    block.id = (i % 200) as u16;
                    block.skylight = 15;
                }
                column.sections[y] = Some(section);
            }
            *region.column_mut(x, z).unwrap() = column;
        }
    }
    region
}

pub fn region_benchmark(c: &mut Criterion) {
    let region = sample_region();
    let bytes = region.to_bytes().unwrap();

    c.bench_function("region parse", |b| {
        b.iter(|| {
            let region = Region::from_bytes(&bytes).unwrap();
            black_box(region);
        });
    });

    c.bench_function("region encode", |b| {
        b.iter(|| {
            let bytes = region.to_bytes().unwrap();
            black_box(bytes);
        });
    });
}

criterion_group!(benches, region_benchmark);
criterion_main!(benches);
