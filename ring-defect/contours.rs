use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::point::Point;
use tracing::debug;

use crate::error::{DefectError, DefectResult, Stage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How boundary chains are reduced after border following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChainApproximation {
    /// Keep every boundary pixel
    None,
    /// Keep only the end points of horizontal, vertical and diagonal runs
    #[default]
    Simple,
}

impl std::str::FromStr for ChainApproximation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ChainApproximation::None),
            "simple" => Ok(ChainApproximation::Simple),
            other => Err(format!("unknown chain approximation '{}' (expected 'none' or 'simple')", other)),
        }
    }
}

/// One closed boundary with its enclosing contour, if any
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryContour {
    pub points: Vec<Point<i32>>,
    pub parent: Option<usize>,
}

impl BoundaryContour {
    pub fn new(points: Vec<Point<i32>>, parent: Option<usize>) -> Self {
        Self { points, parent }
    }

    /// Enclosed area of the closed polyline
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Raster-order key of the first point, used to break area ties
    pub(crate) fn start_key(&self) -> (i32, i32) {
        self.points.first().map(|p| (p.y, p.x)).unwrap_or((i32::MAX, i32::MAX))
    }
}

/// All boundaries found in one mask, parents referring to indices in `contours`
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    width: u32,
    height: u32,
    contours: Vec<BoundaryContour>,
}

impl ContourSet {
    /// Trace every border of the non-zero pixels of `mask`.
    ///
    /// Hole borders carry the outer border they sit in as parent.
    pub fn from_mask(mask: &GrayImage, approximation: ChainApproximation) -> DefectResult<Self> {
        let (width, height) = mask.dimensions();
        if width == 0 || height == 0 {
            return Err(DefectError::geometry(
                Stage::ContourExtraction,
                format!("mask has no pixels ({}x{})", width, height),
            ));
        }

        let contours: Vec<BoundaryContour> = find_contours::<i32>(mask)
            .into_iter()
            .map(|c| {
                let points = match approximation {
                    ChainApproximation::None => c.points,
                    ChainApproximation::Simple => simplify_chain(&c.points),
                };
                BoundaryContour::new(points, c.parent)
            })
            .collect();

        debug!(width, height, count = contours.len(), "extracted contours");

        Self::from_contours(width, height, contours)
    }

    /// Wrap contours produced elsewhere, checking the hierarchy is well formed
    pub fn from_contours(width: u32, height: u32, contours: Vec<BoundaryContour>) -> DefectResult<Self> {
        let set = Self { width, height, contours };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> DefectResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DefectError::geometry(
                Stage::ContourExtraction,
                format!("invalid image dimensions {}x{}", self.width, self.height),
            ));
        }

        let len = self.contours.len();
        for (index, contour) in self.contours.iter().enumerate() {
            if contour.points.is_empty() {
                return Err(DefectError::geometry(
                    Stage::ContourExtraction,
                    format!("contour {} has no points", index),
                ));
            }
            match contour.parent {
                Some(parent) if parent >= len => {
                    return Err(DefectError::geometry(
                        Stage::HierarchyPairing,
                        format!("contour {} refers to parent {} but only {} contours exist", index, parent, len),
                    ));
                }
                Some(parent) if parent == index => {
                    return Err(DefectError::geometry(
                        Stage::HierarchyPairing,
                        format!("contour {} is its own parent", index),
                    ));
                }
                _ => {}
            }
        }

        // Parent chains longer than the set can only loop
        for index in 0..len {
            let mut parent = self.contours[index].parent;
            let mut depth = 0;
            while let Some(p) = parent {
                depth += 1;
                if depth > len {
                    return Err(DefectError::geometry(
                        Stage::HierarchyPairing,
                        format!("contour {} has a cyclic parent chain", index),
                    ));
                }
                parent = self.contours[p].parent;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn unchecked(width: u32, height: u32, contours: Vec<BoundaryContour>) -> Self {
        Self { width, height, contours }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn contours(&self) -> &[BoundaryContour] {
        &self.contours
    }

    pub fn get(&self, index: usize) -> Option<&BoundaryContour> {
        self.contours.get(index)
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Indices of contours with no enclosing contour
    pub fn top_level(&self) -> impl Iterator<Item = usize> + '_ {
        self.contours
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(i, _)| i)
    }

    /// Indices of contours whose parent is exactly `parent`
    pub fn children_of(&self, parent: usize) -> impl Iterator<Item = usize> + '_ {
        self.contours
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.parent == Some(parent))
            .map(|(i, _)| i)
    }
}

/// Drop every point lying inside a straight run of a closed chain.
///
/// Chains shorter than three points are returned unchanged.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            step(prev, curr) != step(curr, next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        points.to_vec()
    } else {
        kept
    }
}

/// Absolute shoelace area of a closed polyline
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: i64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum();

    twice_area.abs() as f64 / 2.0
}
