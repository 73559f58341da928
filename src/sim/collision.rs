//! Axis-aligned collision checks
//!
//! All actors occupy square tiles, so overlap testing is plain AABB
//! arithmetic. Only the crawler's head participates in collisions; trailing
//! segments are cosmetic.

use glam::IVec2;

/// Strict overlap between two axis-aligned squares; touching edges do not
/// count as a hit.
#[inline]
pub fn squares_overlap(a_pos: IVec2, a_size: i32, b_pos: IVec2, b_size: i32) -> bool {
    a_pos.x < b_pos.x + b_size
        && b_pos.x < a_pos.x + a_size
        && a_pos.y < b_pos.y + b_size
        && b_pos.y < a_pos.y + a_size
}
