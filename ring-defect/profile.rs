use imageproc::point::Point;
use ring_core::{Centroid, RadiusStats};

use crate::error::{DefectError, DefectResult, Stage};

/// Centroid-to-boundary distance statistics
pub struct RadiusProfile;

impl RadiusProfile {
    /// Distance from `centroid` to every point, in contour order
    pub fn distances(points: &[Point<i32>], centroid: &Centroid) -> Vec<f64> {
        points
            .iter()
            .map(|p| (p.x as f64 - centroid.x).hypot(p.y as f64 - centroid.y))
            .collect()
    }

    /// Min, max and mean radius of a contour around `centroid`
    pub fn stats(points: &[Point<i32>], centroid: &Centroid) -> DefectResult<RadiusStats> {
        if points.is_empty() {
            return Err(DefectError::geometry(Stage::RadiusProfile, "contour has no points"));
        }

        let distances = Self::distances(points, centroid);
        let (min, max, sum) = distances.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &d| (min.min(d), max.max(d), sum + d),
        );
        let mean = sum / distances.len() as f64;

        if !mean.is_finite() {
            return Err(DefectError::geometry(
                Stage::RadiusProfile,
                format!("non-finite mean radius around ({}, {})", centroid.x, centroid.y),
            ));
        }

        Ok(RadiusStats { min, max, mean, samples: distances.len() })
    }
}
