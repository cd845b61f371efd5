//! `Vec2` helpers used by the growth and relaxation passes.
//!
//! Plain arithmetic (add, subtract, length, distance) comes straight from
//! [`glam::Vec2`]; this module only adds the two operations the passes need
//! on top of it.

use glam::Vec2;

/// Returns a vector of length `len` pointing along `angle` (radians,
/// measured counter-clockwise from the +x axis).
#[inline]
pub fn from_angle(angle: f32, len: f32) -> Vec2 {
    Vec2::from_angle(angle) * len
}

/// Returns `delta` rescaled to the signed magnitude `magnitude`.
///
/// A negative magnitude yields a vector pointing against `delta`.
///
/// ### Returns
/// - `Some(v)` with `v = normalize(delta) * magnitude`.
/// - `None` if `delta` has no usable direction: zero length, or so short
///   that its reciprocal length is not finite. Callers skip the correction
///   in that case instead of producing NaN or infinity.
#[inline]
pub fn scaled_along(delta: Vec2, magnitude: f32) -> Option<Vec2> {
    delta.try_normalize().map(|dir| dir * magnitude)
}
