//! Radius mapper

/// Dot radius for an intensity: white gives 0, black gives `max_radius`,
/// linear in between
pub fn dot_radius(value: u8, max_radius: f64) -> f64 {
    (255.0 - value as f64) / 255.0 * max_radius
}
