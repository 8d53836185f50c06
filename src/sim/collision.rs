//! Pure collision predicates
//!
//! Numeric geometry only, no game semantics. The pipe collider is two
//! axis-aligned rectangles, the bird and berries are circles.

use glam::Vec2;

/// Circle vs axis-aligned rectangle.
///
/// True iff the distance from the circle center to the closest point on the
/// rectangle is at most the radius. A center fully inside the rectangle
/// clamps onto itself (distance zero), so containment always hits.
pub fn circle_rect(cx: f32, cy: f32, cr: f32, rx: f32, ry: f32, rw: f32, rh: f32) -> bool {
    let closest_x = cx.clamp(rx, rx + rw);
    let closest_y = cy.clamp(ry, ry + rh);
    let dx = cx - closest_x;
    let dy = cy - closest_y;
    dx * dx + dy * dy <= cr * cr
}

/// Circle vs circle: center distance at most the sum of radii.
pub fn circle_circle(a: Vec2, ar: f32, b: Vec2, br: f32) -> bool {
    let r = ar + br;
    a.distance_squared(b) <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn circle_touching_rect_edge_hits() {
        // Rect [10,10]..[30,30], circle just left of it
        assert!(circle_rect(5.0, 20.0, 5.0, 10.0, 10.0, 20.0, 20.0));
        assert!(!circle_rect(4.0, 20.0, 5.0, 10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn circle_inside_rect_always_hits() {
        // Closest point coincides with the center, distance 0
        assert!(circle_rect(20.0, 20.0, 0.1, 10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn circle_misses_rect_corner_diagonally() {
        // Corner at (10,10); center at (4,4) is sqrt(72) ~ 8.49 away
        assert!(!circle_rect(4.0, 4.0, 8.0, 10.0, 10.0, 20.0, 20.0));
        assert!(circle_rect(4.0, 4.0, 8.5, 10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn zero_height_rect_behaves_as_segment() {
        assert!(circle_rect(15.0, 12.0, 3.0, 10.0, 10.0, 20.0, 0.0));
        assert!(!circle_rect(15.0, 14.0, 3.0, 10.0, 10.0, 20.0, 0.0));
    }

    #[test]
    fn circles_touching_at_exact_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(circle_circle(a, 4.0, b, 6.0));
        assert!(!circle_circle(a, 4.0, b, 5.9));
    }

    proptest! {
        #[test]
        fn containment_implies_hit(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            rw in 1.0f32..300.0,
            rh in 1.0f32..300.0,
        ) {
            // Any circle whose center lies inside the rect collides,
            // regardless of radius.
            let rx = cx - rw * 0.5;
            let ry = cy - rh * 0.5;
            prop_assert!(circle_rect(cx, cy, 0.001, rx, ry, rw, rh));
        }

        #[test]
        fn circle_circle_is_symmetric(
            ax in -500.0f32..500.0,
            ay in -500.0f32..500.0,
            bx in -500.0f32..500.0,
            by in -500.0f32..500.0,
            ar in 0.0f32..100.0,
            br in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circle_circle(a, ar, b, br), circle_circle(b, br, a, ar));
        }
    }
}
