use imageproc::point::Point;

/// Raw spatial moments of a contour polygon, up to first order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Moments of the closed polygon through `points`, via Green's theorem.
    ///
    /// The result does not depend on traversal direction: m00 is never
    /// negative. Fewer than three points, or collinear points, give m00 == 0.
    pub fn of_contour(points: &[Point<i32>]) -> Self {
        if points.len() < 3 {
            return Self { m00: 0.0, m10: 0.0, m01: 0.0 };
        }

        // Twice the signed area, kept integral so the zero test is exact.
        let mut cross_sum: i64 = 0;
        let mut x_sum: i64 = 0;
        let mut y_sum: i64 = 0;

        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            let (xi, yi) = (p.x as i64, p.y as i64);
            let (xj, yj) = (q.x as i64, q.y as i64);
            let cross = xi * yj - xj * yi;
            cross_sum += cross;
            x_sum += (xi + xj) * cross;
            y_sum += (yi + yj) * cross;
        }

        let sign = if cross_sum < 0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * cross_sum as f64 / 2.0,
            m10: sign * x_sum as f64 / 6.0,
            m01: sign * y_sum as f64 / 6.0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.m00 == 0.0
    }

    /// Centroid `(m10/m00, m01/m00)` truncated toward zero, or `None` when
    /// the area is zero.
    pub fn centroid(&self) -> Option<(i32, i32)> {
        if self.is_degenerate() {
            return None;
        }
        Some(((self.m10 / self.m00) as i32, (self.m01 / self.m00) as i32))
    }
}
