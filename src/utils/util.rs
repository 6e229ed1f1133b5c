//! # Utility Module
//!
//! Miscellaneous helpers shared by the generator and the command line front end.
//!
//! ## Example Function: `clamp_unit`
//!
//! Probabilities and ratios in the generation config live in `[0, 1]`. Values coming
//! from the command line are clamped into that range before they reach the generator.

/// Clamps a probability-like value into `[0, 1]`. NaN maps to 0.
///
/// # Examples
///
/// ```
/// use procedural_roads::utils::util::clamp_unit;
///
/// assert_eq!(clamp_unit(0.4), 0.4);
/// assert_eq!(clamp_unit(-5.0), 0.0);
/// assert_eq!(clamp_unit(15.0), 1.0);
/// ```
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
