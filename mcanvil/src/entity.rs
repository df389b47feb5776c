use std::collections::HashMap;

use mcnbt::error::{Error, Result};
use mcnbt::{Compound, List, Tag, Value};
use num_enum::TryFromPrimitive;
use once_cell::sync::Lazy;
use serde::Serialize;
use uuid::Uuid;

macro_rules! entity_kinds {
    ($($kind:ident = $num:literal),* $(,)?) => {
        /// The type of an entity, from its string `id`.
        ///
        /// An entity whose compound has no `id` string is a [`Player`]. An id
        /// this library does not know is [`Unknown`].
        ///
        /// [`Player`]: EntityKind::Player
        /// [`Unknown`]: EntityKind::Unknown
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TryFromPrimitive)]
        #[repr(u8)]
        pub enum EntityKind {
            $($kind = $num,)*
            Player = 0xfe,
            Unknown = 0xff,
        }

        static BY_ID: Lazy<HashMap<&'static str, EntityKind>> = Lazy::new(|| {
            HashMap::from([$((stringify!($kind), EntityKind::$kind),)*])
        });

        impl EntityKind {
            /// The string stored in an entity's `id` field. Players and
            /// unknown entities have none.
            pub fn id(&self) -> Option<&'static str> {
                match self {
                    $(EntityKind::$kind => Some(stringify!($kind)),)*
                    EntityKind::Player | EntityKind::Unknown => None,
                }
            }
        }
    };
}

entity_kinds! {
    Item = 0x01,
    XPOrb = 0x02,
    LeashKnot = 0x08,
    Painting = 0x09,
    Arrow = 0x0a,
    Snowball = 0x0b,
    Fireball = 0x0c,
    SmallFireball = 0x0d,
    ThrownEnderpearl = 0x0e,
    EyeOfEnderSignal = 0x0f,
    ThrownPotion = 0x10,
    ThrownExpBottle = 0x11,
    ItemFrame = 0x12,
    WitherSkull = 0x13,
    PrimedTnt = 0x14,
    FallingSand = 0x15,
    FireworksRocketEntity = 0x16,
    Boat = 0x29,
    MinecartRideable = 0x2a,
    MinecartChest = 0x2b,
    MinecartFurnace = 0x2c,
    MinecartTNT = 0x2d,
    MinecartHopper = 0x2e,
    MinecartSpawner = 0x2f,
    Mob = 0x30,
    Monster = 0x31,
    Creeper = 0x32,
    Skeleton = 0x33,
    Spider = 0x34,
    Giant = 0x35,
    Zombie = 0x36,
    Slime = 0x37,
    Ghast = 0x38,
    PigZombie = 0x39,
    Enderman = 0x3a,
    CaveSpider = 0x3b,
    Silverfish = 0x3c,
    Blaze = 0x3d,
    LavaSlime = 0x3e,
    EnderDragon = 0x3f,
    WitherBoss = 0x40,
    Bat = 0x41,
    Witch = 0x42,
    Pig = 0x5a,
    Sheep = 0x5b,
    Cow = 0x5c,
    Chicken = 0x5d,
    Squid = 0x5e,
    Wolf = 0x5f,
    MushroomCow = 0x60,
    SnowMan = 0x61,
    Ozelot = 0x62,
    VillagerGolem = 0x63,
    EntityHorse = 0x64,
    Villager = 0x78,
    EnderCrystal = 0xc8,
}

impl EntityKind {
    /// Look up a kind by its `id` string.
    pub fn from_id(id: &str) -> EntityKind {
        BY_ID.get(id).copied().unwrap_or(EntityKind::Unknown)
    }
}

/// An entity within a chunk column.
///
/// The commonly used fields are decoded, and the full compound is kept so
/// that anything else it holds is written back unchanged.
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub uuid: Uuid,
    pub pos: [f64; 3],
    pub motion: [f64; 3],
    /// Yaw then pitch, in degrees.
    pub rotation: [f32; 2],
    pub fall_distance: f32,
    pub fire: i16,
    pub air: i16,
    pub on_ground: bool,
    pub invulnerable: bool,
    nbt: Compound<'static>,
}

impl Entity {
    /// A new entity at the origin, standing still.
    pub fn new(kind: EntityKind, uuid: Uuid) -> Self {
        let mut nbt = Compound::new();
        if let Some(id) = kind.id() {
            nbt.insert("id", id);
        }

        let mut entity = Self {
            kind,
            uuid,
            pos: [0.0; 3],
            motion: [0.0; 3],
            rotation: [0.0; 2],
            fall_distance: 0.0,
            fire: 0,
            air: 300,
            on_ground: false,
            invulnerable: false,
            nbt,
        };
        entity.nbt = entity.to_nbt();
        entity
    }

    /// Decode an entity compound. The `UUIDMost`, `UUIDLeast`, `Pos`,
    /// `Motion` and `Rotation` fields are required; the rest default to zero
    /// when absent or of the wrong tag.
    pub fn from_nbt(nbt: &Compound<'_>) -> Result<Self> {
        let kind = match nbt.get("id") {
            Some(Value::String(id)) => EntityKind::from_id(id),
            _ => EntityKind::Player,
        };

        let most = nbt.get_i64("UUIDMost")?;
        let least = nbt.get_i64("UUIDLeast")?;

        Ok(Self {
            kind,
            uuid: Uuid::from_u64_pair(most as u64, least as u64),
            pos: doubles(nbt, "Pos")?,
            motion: doubles(nbt, "Motion")?,
            rotation: floats(nbt, "Rotation")?,
            fall_distance: nbt.get_f32("FallDistance").unwrap_or(0.0),
            fire: nbt.get_i16("Fire").unwrap_or(0),
            air: nbt.get_i16("Air").unwrap_or(0),
            on_ground: nbt.get_i8("OnGround").unwrap_or(0) != 0,
            invulnerable: nbt.get_i8("Invulnerable").unwrap_or(0) != 0,
            nbt: nbt.to_owned_compound(),
        })
    }

    /// The full compound, as of the last parse or [`Entity::to_nbt`].
    pub fn nbt(&self) -> &Compound<'static> {
        &self.nbt
    }

    /// Mutable access to fields this type does not decode. Decoded fields set
    /// here are overwritten when encoding.
    pub fn nbt_mut(&mut self) -> &mut Compound<'static> {
        &mut self.nbt
    }

    /// A copy of the entity's compound with the decoded fields written back.
    pub fn to_nbt(&self) -> Compound<'static> {
        let mut nbt = self.nbt.clone();
        self.write_into(&mut nbt);
        nbt
    }

    fn write_into(&self, nbt: &mut Compound<'static>) {
        let (most, least) = self.uuid.as_u64_pair();

        nbt.insert("OnGround", self.on_ground);
        nbt.insert("Invulnerable", self.invulnerable);
        nbt.insert("Air", self.air);
        nbt.insert("Fire", self.fire);
        nbt.insert("FallDistance", self.fall_distance);
        nbt.insert("UUIDMost", most as i64);
        nbt.insert("UUIDLeast", least as i64);
        nbt.insert("Pos", List::from(self.pos.to_vec()));
        nbt.insert("Motion", List::from(self.motion.to_vec()));
        nbt.insert("Rotation", List::from(self.rotation.to_vec()));
    }
}

/// Entities are equal when they have the same kind and would be written out
/// identically.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.to_nbt() == other.to_nbt()
    }
}

fn doubles<const N: usize>(nbt: &Compound<'_>, key: &str) -> Result<[f64; N]> {
    let list = nbt.get_list(key)?;
    if list.len() != N {
        return Err(Error::wrong_length(key, N, list.len()));
    }

    let mut out = [0.0; N];
    for (slot, v) in out.iter_mut().zip(list) {
        *slot = v
            .as_f64()
            .ok_or_else(|| Error::wrong_tag(key, Tag::Double, v.tag()))?;
    }
    Ok(out)
}

fn floats<const N: usize>(nbt: &Compound<'_>, key: &str) -> Result<[f32; N]> {
    let list = nbt.get_list(key)?;
    if list.len() != N {
        return Err(Error::wrong_length(key, N, list.len()));
    }

    let mut out = [0.0; N];
    for (slot, v) in out.iter_mut().zip(list) {
        *slot = v
            .as_f32()
            .ok_or_else(|| Error::wrong_tag(key, Tag::Float, v.tag()))?;
    }
    Ok(out)
}
