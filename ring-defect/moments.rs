use imageproc::point::Point;
use ring_core::{Centroid, CentroidSource};

/// Zeroth and first order moments of a closed polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl ContourMoments {
    /// Polygon moments via Green's theorem, normalised so that `m00 >= 0`
    pub fn from_points(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self { m00: 0.0, m10: 0.0, m01: 0.0 };
        }

        let mut a00 = 0.0f64;
        let mut a10 = 0.0f64;
        let mut a01 = 0.0f64;

        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            let (xi, yi) = (p.x as f64, p.y as f64);
            let (xj, yj) = (q.x as f64, q.y as f64);
            let cross = xi * yj - xj * yi;
            a00 += cross;
            a10 += (xi + xj) * cross;
            a01 += (yi + yj) * cross;
        }

        let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    /// Zero-area polygons (lines, single pixels) cannot locate a center
    pub fn is_degenerate(&self) -> bool {
        self.m00 <= f32::EPSILON as f64
    }

    /// Area-weighted center, or the image center for degenerate contours
    pub fn centroid(&self, width: u32, height: u32) -> Centroid {
        if self.is_degenerate() {
            Centroid {
                x: (width / 2) as f64,
                y: (height / 2) as f64,
                source: CentroidSource::ImageCenter,
            }
        } else {
            // Sub-pixel: radii are measured from the exact moment centroid,
            // never from a pixel-truncated one
            Centroid {
                x: self.m10 / self.m00,
                y: self.m01 / self.m00,
                source: CentroidSource::Moments,
            }
        }
    }
}
