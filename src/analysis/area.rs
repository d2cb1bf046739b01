//! Point-in-area membership: even-odd ray casting on the map plane,
//! gated by a vertical band.
//!
//! Boundary points are half-open. A point on a left or bottom edge of
//! the ring is inside, a point on a right or top edge is outside.

use rayon::prelude::*;

use crate::types::math::{Polygon, Vector, VectorXY, ZBand};
use crate::types::TypeError;

/// Rows below this count are flagged on the calling thread.
const PARALLEL_THRESHOLD: usize = 1024;

/// Whether `point` lies inside `polygon` and within `[z_lower, z_upper]`.
pub fn inside(polygon: &Polygon, point: Vector, z_lower: f64, z_upper: f64) -> bool {
    let mut result = false;

    for (a, b) in polygon.edges() {
        // a.y != b.y whenever the ray crosses, so the division is safe.
        if (a.y > point.y) != (b.y > point.y)
            && point.x < a.x + (b.x - a.x) * (point.y - a.y) / (b.y - a.y)
            && z_lower <= point.z && point.z <= z_upper
        {
            result = !result;
        }
    }

    result
}

/// [`inside`] over a raw vertex list, failing on a degenerate ring.
pub fn point_in_area(vertices: &[VectorXY], point: Vector, band: ZBand) -> Result<bool, TypeError> {
    let polygon = Polygon::new(vertices.iter().copied())?;
    Ok(inside(&polygon, point, band.lower, band.upper))
}

/// Membership flag per point, in input order.
pub fn membership_column(polygon: &Polygon, points: &[Vector], band: ZBand) -> Vec<bool> {
    if points.len() < PARALLEL_THRESHOLD {
        points
            .iter()
            .map(|p| inside(polygon, *p, band.lower, band.upper))
            .collect()
    } else {
        points
            .par_iter()
            .map(|p| inside(polygon, *p, band.lower, band.upper))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Polygon {
        Polygon::new([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap()
    }

    fn choke() -> Polygon {
        Polygon::new([
            (-1735.0, 250.0), (-2024.0, 398.0), (-2806.0, 742.0),
            (-2472.0, 1233.0), (-1565.0, 580.0)
        ]).unwrap()
    }

    #[test]
    fn square_membership() {
        let sq = square();
        assert!(inside(&sq, Vector::new(5.0, 5.0, 5.0), 0.0, 10.0));
        assert!(!inside(&sq, Vector::new(15.0, 5.0, 5.0), 0.0, 10.0));
        assert!(!inside(&sq, Vector::new(5.0, 5.0, 20.0), 0.0, 10.0));
    }

    #[test]
    fn band_edges_are_inclusive() {
        let sq = square();
        assert!(inside(&sq, Vector::new(5.0, 5.0, 0.0), 0.0, 10.0));
        assert!(inside(&sq, Vector::new(5.0, 5.0, 10.0), 0.0, 10.0));
        assert!(!inside(&sq, Vector::new(5.0, 5.0, -0.01), 0.0, 10.0));
    }

    #[test]
    fn boundary_is_half_open() {
        let sq = square();
        // left and bottom edges belong to the area
        assert!(inside(&sq, Vector::new(0.0, 5.0, 5.0), 0.0, 10.0));
        assert!(inside(&sq, Vector::new(5.0, 0.0, 5.0), 0.0, 10.0));
        // right and top edges do not
        assert!(!inside(&sq, Vector::new(10.0, 5.0, 5.0), 0.0, 10.0));
        assert!(!inside(&sq, Vector::new(5.0, 10.0, 5.0), 0.0, 10.0));
        // corners
        assert!(inside(&sq, Vector::new(0.0, 0.0, 5.0), 0.0, 10.0));
        assert!(!inside(&sq, Vector::new(10.0, 10.0, 5.0), 0.0, 10.0));

        for _ in 0..10 {
            assert!(inside(&sq, Vector::new(0.0, 5.0, 5.0), 0.0, 10.0));
            assert!(!inside(&sq, Vector::new(10.0, 5.0, 5.0), 0.0, 10.0));
        }
    }

    #[test]
    fn non_convex_notch_is_outside() {
        // U shape opening upwards; the notch spans x 4..6, y 4..10
        let u = Polygon::new([
            (0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (6.0, 10.0),
            (6.0, 4.0), (4.0, 4.0), (4.0, 10.0), (0.0, 10.0),
        ]).unwrap();

        assert!(!inside(&u, Vector::new(5.0, 7.0, 1.0), 0.0, 2.0));
        assert!(inside(&u, Vector::new(2.0, 7.0, 1.0), 0.0, 2.0));
        assert!(inside(&u, Vector::new(8.0, 7.0, 1.0), 0.0, 2.0));
        assert!(inside(&u, Vector::new(5.0, 2.0, 1.0), 0.0, 2.0));
    }

    #[test]
    fn choke_point_samples() {
        let poly = choke();
        let band = ZBand::default();
        assert!(inside(&poly, Vector::new(-2200.0, 700.0, 300.0), band.lower, band.upper));
        assert!(!inside(&poly, Vector::new(-2200.0, 700.0, 100.0), band.lower, band.upper));
        assert!(!inside(&poly, Vector::new(-1000.0, 700.0, 300.0), band.lower, band.upper));
    }

    #[test]
    fn degenerate_vertex_list_fails_fast() {
        let two = [VectorXY::new(0.0, 0.0), VectorXY::new(1.0, 1.0)];
        assert_eq!(
            point_in_area(&two, Vector::new(0.5, 0.5, 300.0), ZBand::default()),
            Err(TypeError::InvalidPolygon(2))
        );
        assert_eq!(
            point_in_area(&[], Vector::default(), ZBand::default()),
            Err(TypeError::InvalidPolygon(0))
        );
    }

    #[test]
    fn column_keeps_input_order() {
        let sq = square();
        let band = ZBand::new(0.0, 10.0).unwrap();
        let points: Vec<Vector> = (0..3000)
            .map(|i| Vector::new((i % 20) as f64 - 0.5, 5.0, 5.0))
            .collect();

        let column = membership_column(&sq, &points, band);
        assert_eq!(column.len(), points.len());
        for (p, flag) in points.iter().zip(&column) {
            assert_eq!(*flag, p.x > 0.0 && p.x < 10.0);
        }
    }

    proptest! {
        /// Anything past the bounding box is outside, whatever the band.
        #[test]
        fn prop_outside_bbox_is_outside(
            dx in 0.01f64..1000.0,
            y in -1000.0f64..1000.0,
            z in -1000.0f64..1000.0,
            lower in -1000.0f64..0.0,
            upper in 0.0f64..1000.0,
        ) {
            let poly = choke();
            let (lo, hi) = poly.bounds();
            prop_assert!(!inside(&poly, Vector::new(hi.x + dx, y, z), lower, upper));
            prop_assert!(!inside(&poly, Vector::new(lo.x - dx, y, z), lower, upper));
            prop_assert!(!inside(&poly, Vector::new(y, hi.y + dx, z), lower, upper));
            prop_assert!(!inside(&poly, Vector::new(y, lo.y - dx, z), lower, upper));
        }

        /// No hidden state between calls.
        #[test]
        fn prop_idempotent(
            x in -3000.0f64..-1000.0,
            y in 0.0f64..1500.0,
            z in 200.0f64..500.0,
        ) {
            let poly = choke();
            let p = Vector::new(x, y, z);
            prop_assert_eq!(inside(&poly, p, 285.0, 421.0), inside(&poly, p, 285.0, 421.0));
        }

        /// Out-of-band points never count, whatever their plane position.
        #[test]
        fn prop_out_of_band_is_outside(
            x in -3000.0f64..-1000.0,
            y in 0.0f64..1500.0,
            z in 421.01f64..2000.0,
        ) {
            prop_assert!(!inside(&choke(), Vector::new(x, y, z), 285.0, 421.0));
        }
    }
}
