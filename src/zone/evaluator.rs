//! Applies the distance model across the world-type table for one star.

use super::model::{distance_for, round_half_up, StarObservation};
use super::worlds::{WorldType, WorldTypeSpec};

/// Zone for one world type around one star, in whole light-seconds.
///
/// `degenerate` means the whole band lies inside the star; `near` and
/// `far` are then both `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneResult {
    pub world: WorldType,
    pub near: Option<u64>,
    pub far: Option<u64>,
    pub degenerate: bool,
}

impl ZoneResult {
    /// `(near, far)` for a non-degenerate zone.
    pub fn range(&self) -> Option<(u64, u64)> {
        self.near.zip(self.far)
    }
}

/// Evaluate every spec against `star`, preserving order.
///
/// Comparisons are made on rounded values so that a band whose edge sits
/// right at the stellar surface does not flicker between frames.
pub fn evaluate(star: &StarObservation, world_types: &[WorldTypeSpec]) -> Vec<ZoneResult> {
    world_types
        .iter()
        .map(|spec| evaluate_one(star, spec))
        .collect()
}

fn evaluate_one(star: &StarObservation, spec: &WorldTypeSpec) -> ZoneResult {
    let r = star.radius_meters;
    let t = star.surface_temperature_kelvin;

    let far = round_half_up(distance_for(r, t, spec.outer_bound_temp));
    let star_radius = star.radius_ls();

    if far <= star_radius {
        return ZoneResult {
            world: spec.kind,
            near: None,
            far: None,
            degenerate: true,
        };
    }

    let near = if spec.inner_bound_temp <= 0.0 {
        star_radius
    } else {
        round_half_up(distance_for(r, t, spec.inner_bound_temp))
    };
    debug_assert!(near <= far, "{}: near {} > far {}", spec.name, near, far);

    ZoneResult {
        world: spec.kind,
        near: Some(near),
        far: Some(far),
        degenerate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::model::LS;
    use crate::zone::worlds::WORLDS;
    use proptest::prelude::*;

    fn sol() -> StarObservation {
        StarObservation::new(6.957e8, 5778.0)
    }

    #[test]
    fn one_result_per_spec_in_order() {
        let results = evaluate(&sol(), &WORLDS);
        assert_eq!(results.len(), WORLDS.len());
        for (result, spec) in results.iter().zip(WORLDS.iter()) {
            assert_eq!(result.world, spec.kind);
        }
    }

    #[test]
    fn sol_like_earth_zone() {
        let star = sol();
        let results = evaluate(&star, &[*WorldType::EarthLike.spec()]);
        let zone = results[0];

        let expected_near = round_half_up(distance_for(6.957e8, 5778.0, 278.0));
        let expected_far = round_half_up(distance_for(6.957e8, 5778.0, 227.0));

        assert!(!zone.degenerate);
        assert_eq!(zone.near, Some(expected_near));
        assert_eq!(zone.far, Some(expected_far));
        assert!(expected_far > expected_near);
        assert!((480..520).contains(&expected_near));
    }

    #[test]
    fn giant_cool_star_swallows_band() {
        // Outer edge of Metal-Rich at 1103 K lies inside a 1500 K star of
        // 100 ls radius (~92 ls).
        let star = StarObservation::new(100.0 * LS, 1500.0);
        let results = evaluate(&star, &[*WorldType::MetalRich.spec()]);
        let zone = results[0];
        assert!(zone.degenerate);
        assert_eq!(zone.near, None);
        assert_eq!(zone.far, None);
        assert_eq!(zone.range(), None);
    }

    #[test]
    fn metal_rich_near_edge_is_stellar_radius_at_any_temperature() {
        let spec = *WorldType::MetalRich.spec();
        for radius in [3.0e8, 1.5e9] {
            for temp in [3_000.0, 20_000.0, 80_000.0, 500_000.0] {
                let star = StarObservation::new(radius, temp);
                let zone = evaluate(&star, &[spec])[0];
                assert!(!zone.degenerate, "r={} T={}", radius, temp);
                assert_eq!(zone.near, Some(round_half_up(radius / LS)), "r={} T={}", radius, temp);
            }
        }
    }

    #[test]
    fn evaluate_is_idempotent() {
        let star = StarObservation::new(4.2e8, 7200.0);
        assert_eq!(evaluate(&star, &WORLDS), evaluate(&star, &WORLDS));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn near_never_exceeds_far(
            radius in 1.0e6f64..1.0e12,
            temp in 500.0f64..100_000.0,
        ) {
            let star = StarObservation::new(radius, temp);
            for zone in evaluate(&star, &WORLDS) {
                match zone.range() {
                    Some((near, far)) => prop_assert!(near <= far),
                    None => prop_assert!(zone.degenerate),
                }
            }
        }
    }
}
