use serde::Serialize;

macro_rules! biomes {
    ($($name:ident = $id:literal),* $(,)?) => {
        /// Biome of a single block column, as stored in a chunk's `Biomes`
        /// byte array.
        ///
        /// Ids this library does not know about are kept as
        /// [`Biome::Unknown`] so that they survive a round trip.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
        pub enum Biome {
            $($name,)*
            /// The column has not had a biome assigned yet.
            #[default]
            NotGenerated,
            Unknown(u8),
        }

        impl From<u8> for Biome {
            fn from(id: u8) -> Self {
                match id {
                    $($id => Biome::$name,)*
                    0xff => Biome::NotGenerated,
                    other => Biome::Unknown(other),
                }
            }
        }

        impl From<Biome> for u8 {
            fn from(biome: Biome) -> Self {
                match biome {
                    $(Biome::$name => $id,)*
                    Biome::NotGenerated => 0xff,
                    Biome::Unknown(id) => id,
                }
            }
        }
    };
}

biomes! {
    Ocean = 0,
    Plains = 1,
    Desert = 2,
    ExtremeHills = 3,
    Forest = 4,
    Taiga = 5,
    Swampland = 6,
    River = 7,
    Hell = 8,
    Sky = 9,
    FrozenOcean = 10,
    FrozenRiver = 11,
    IcePlains = 12,
    IceMountains = 13,
    MushroomIsland = 14,
    MushroomIslandShore = 15,
    Beach = 16,
    DesertHills = 17,
    ForestHills = 18,
    TaigaHills = 19,
    ExtremeHillsEdge = 20,
    Jungle = 21,
    JungleHills = 22,
}
