//! Black-body equilibrium distance.
//!
//! A body at distance `d` from a star of radius `r` and surface temperature
//! `T` settles at `T_eq = T · sqrt(r / 2d)`. Solving for `d` gives
//! `d = sqrt(r² · T⁴ / (4 · T_eq⁴))`.

/// One light-second in metres, rounded. Distances are compared against
/// values computed with this figure, so it must not be refined.
pub const LS: f64 = 300_000_000.0;

/// The latest scan of the arrival star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarObservation {
    pub radius_meters: f64,
    pub surface_temperature_kelvin: f64,
}

impl StarObservation {
    pub fn new(radius_meters: f64, surface_temperature_kelvin: f64) -> Self {
        Self {
            radius_meters,
            surface_temperature_kelvin,
        }
    }

    /// Stellar radius in whole light-seconds.
    pub fn radius_ls(&self) -> u64 {
        round_half_up(self.radius_meters / LS)
    }
}

/// Distance in light-seconds at which a black body reaches `target_temp_k`.
///
/// Only defined for positive finite inputs. Callers must not pass a zero
/// target temperature.
pub fn distance_for(radius_m: f64, surface_temp_k: f64, target_temp_k: f64) -> f64 {
    (radius_m.powi(2) * surface_temp_k.powi(4) / (4.0 * target_temp_k.powi(4))).sqrt() / LS
}

/// Round a non-negative distance to the nearest whole unit, halves up.
pub fn round_half_up(distance: f64) -> u64 {
    (distance + 0.5).floor() as u64
}
