//! The fixed world-type table.

/// Stable key for a world type. Rows, preference checkboxes and display
/// bits are all indexed by this rather than by table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorldType {
    MetalRich,
    EarthLike,
    Water,
    Ammonia,
    Terraformable,
}

impl WorldType {
    pub const ALL: [WorldType; 5] = [
        WorldType::MetalRich,
        WorldType::EarthLike,
        WorldType::Water,
        WorldType::Ammonia,
        WorldType::Terraformable,
    ];

    /// Bit in the persisted display mask.
    pub fn display_bit(self) -> u32 {
        match self {
            WorldType::MetalRich => 0x0001,
            WorldType::EarthLike => 0x0002,
            WorldType::Water => 0x0004,
            WorldType::Ammonia => 0x0008,
            WorldType::Terraformable => 0x0010,
        }
    }

    pub fn spec(self) -> &'static WorldTypeSpec {
        // WORLDS is declared in `ALL` order.
        &WORLDS[self as usize]
    }
}

/// One temperature band. An `inner_bound_temp` of zero means the band has
/// no physical inner edge and starts at the stellar surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTypeSpec {
    pub kind: WorldType,
    pub name: &'static str,
    pub inner_bound_temp: f64,
    pub outer_bound_temp: f64,
    /// EDSM `subType` this band collects; `terraformable` is a pseudo
    /// sub-type filled from `terraformingState`.
    pub edsm_sub_type: &'static str,
}

/// Black-body temperature ranges, hottest (inner) bound first.
pub const WORLDS: [WorldTypeSpec; 5] = [
    WorldTypeSpec {
        kind: WorldType::MetalRich,
        name: "Metal-Rich",
        inner_bound_temp: 0.0,
        outer_bound_temp: 1103.0,
        edsm_sub_type: "Metal-rich body",
    },
    WorldTypeSpec {
        kind: WorldType::EarthLike,
        name: "Earth-Like",
        inner_bound_temp: 278.0,
        outer_bound_temp: 227.0,
        edsm_sub_type: "Earth-like world",
    },
    WorldTypeSpec {
        kind: WorldType::Water,
        name: "Water",
        inner_bound_temp: 307.0,
        outer_bound_temp: 156.0,
        edsm_sub_type: "Water world",
    },
    WorldTypeSpec {
        kind: WorldType::Ammonia,
        name: "Ammonia",
        inner_bound_temp: 193.0,
        outer_bound_temp: 117.0,
        edsm_sub_type: "Ammonia world",
    },
    WorldTypeSpec {
        kind: WorldType::Terraformable,
        name: "Terraformable",
        inner_bound_temp: 315.0,
        outer_bound_temp: 223.0,
        edsm_sub_type: "terraformable",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_keys() {
        for kind in WorldType::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn display_bits_are_distinct() {
        let combined = WorldType::ALL
            .iter()
            .fold(0u32, |acc, w| {
                assert_eq!(acc & w.display_bit(), 0);
                acc | w.display_bit()
            });
        assert_eq!(combined, 0x1f);
    }

    #[test]
    fn outer_bound_is_cooler_than_inner() {
        for spec in WORLDS.iter().filter(|s| s.inner_bound_temp > 0.0) {
            assert!(spec.outer_bound_temp < spec.inner_bound_temp, "{}", spec.name);
        }
    }
}
