//! Point-in-polygon geometry for the danger-zone classification in C9 (§6).
//!
//! The vertex lists are carried over verbatim from the polygon definitions
//! used to classify shot danger; there's no `geo`-crate precedent in the
//! corpus for this, so the ray-casting test is implemented directly rather
//! than added as a new dependency for ten fixed-vertex polygons.

/// A closed polygon given as `(x, y)` vertices in rink-coordinate feet.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<(f64, f64)>,
}

impl Polygon {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        Self { vertices }
    }

    /// Standard ray-casting point-in-polygon test, edges treated as closed
    /// (a point exactly on a boundary counts as inside).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.on_boundary(x, y) {
            return true;
        }
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];
            let intersects = ((yi > y) != (yj > y))
                && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
            if intersects {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn on_boundary(&self, x: f64, y: f64) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let (x1, y1) = self.vertices[i];
            let (x2, y2) = self.vertices[(i + 1) % n];
            let cross = (x2 - x1) * (y - y1) - (y2 - y1) * (x - x1);
            if cross.abs() > f64::EPSILON {
                continue;
            }
            let within_x = x >= x1.min(x2) && x <= x1.max(x2);
            let within_y = y >= y1.min(y2) && y <= y1.max(y2);
            if within_x && within_y {
                return true;
            }
        }
        false
    }

    fn mirrored_x(&self) -> Polygon {
        Polygon::new(self.vertices.iter().map(|&(x, y)| (-x, y)).collect())
    }
}

/// Right-side high-danger rectangle, `x ∈ [69, 89], y ∈ [-9, 9]` (§6).
pub fn high_danger_right() -> Polygon {
    Polygon::new(vec![(69.0, -9.0), (89.0, -9.0), (89.0, 9.0), (69.0, 9.0)])
}

/// Left-side mirror of [`high_danger_right`].
pub fn high_danger_left() -> Polygon {
    high_danger_right().mirrored_x()
}

/// Right-side danger decagon (§6).
pub fn danger_right() -> Polygon {
    Polygon::new(vec![
        (89.0, 9.0),
        (89.0, -9.0),
        (69.0, -22.0),
        (54.0, -22.0),
        (54.0, -9.0),
        (44.0, -9.0),
        (44.0, 9.0),
        (54.0, 9.0),
        (54.0, 22.0),
        (69.0, 22.0),
    ])
}

/// Left-side mirror of [`danger_right`].
pub fn danger_left() -> Polygon {
    danger_right().mirrored_x()
}

/// Classify a shot location (§6): `(danger, high_danger)`. A high-danger
/// point is reported as high-danger only, not danger.
pub fn classify_danger(x: f64, y: f64) -> (bool, bool) {
    let high = high_danger_right().contains(x, y) || high_danger_left().contains(x, y);
    if high {
        return (false, true);
    }
    let danger = danger_right().contains(x, y) || danger_left().contains(x, y);
    (danger, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_danger_rectangle_contains_its_center() {
        assert!(high_danger_right().contains(79.0, 0.0));
        assert!(high_danger_left().contains(-79.0, 0.0));
    }

    #[test]
    fn high_danger_rectangle_excludes_far_point() {
        assert!(!high_danger_right().contains(25.0, 0.0));
    }

    #[test]
    fn danger_decagon_contains_slot_point() {
        assert!(danger_right().contains(60.0, 0.0));
    }

    #[test]
    fn classify_danger_reports_high_danger_exclusively() {
        let (danger, high) = classify_danger(79.0, 0.0);
        assert!(!danger);
        assert!(high);
    }

    #[test]
    fn classify_danger_point_outside_both_polygons() {
        let (danger, high) = classify_danger(0.0, 0.0);
        assert!(!danger);
        assert!(!high);
    }

    #[test]
    fn boundary_point_counts_as_inside() {
        assert!(high_danger_right().contains(69.0, 0.0));
    }
}
