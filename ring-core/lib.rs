#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default flash tolerance as a fraction of the outer mean radius
pub const DEFAULT_FLASH_THRESHOLD: f64 = 0.02;

/// Default cut tolerance as a fraction of the outer mean radius
pub const DEFAULT_CUT_THRESHOLD: f64 = 0.017;

/// Intensity cutoff (0-255) used when binarizing a grayscale image
pub const DEFAULT_BINARIZE_CUTOFF: u8 = 127;

/// Classification result for a single ring image, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Label {
    NoObjectFound,
    SingleContourDefect,
    Flash,
    Cut,
    Ok,
}

impl Label {
    /// Stable taxonomy identifier
    pub fn code(&self) -> &'static str {
        match self {
            Label::NoObjectFound => "NO_OBJECT_FOUND",
            Label::SingleContourDefect => "SINGLE_CONTOUR_DEFECT",
            Label::Flash => "FLASH",
            Label::Cut => "CUT",
            Label::Ok => "OK",
        }
    }

    /// True when the part was found and rejected
    pub fn is_defect(&self) -> bool {
        matches!(self, Label::SingleContourDefect | Label::Flash | Label::Cut)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::NoObjectFound => write!(f, "NO OBJECT FOUND"),
            Label::SingleContourDefect => write!(f, "DEFECT: Single-contour object"),
            Label::Flash => write!(f, "FLASH (Material Protrusion)"),
            Label::Cut => write!(f, "CUT (Material Recession)"),
            Label::Ok => write!(f, "OK"),
        }
    }
}

/// Where a centroid came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CentroidSource {
    /// Area-weighted moments of the outer contour
    Moments,
    /// Degenerate outer contour, image center used instead
    ImageCenter,
}

/// Ring center in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub source: CentroidSource,
}

/// Summary of centroid-to-boundary distances for one contour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadiusStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub samples: usize,
}

/// Absolute tolerance bands in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    pub flash: f64,
    pub cut: f64,
}

/// Deviation signals compared against the tolerance bands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deviations {
    /// Outer boundary bulging outward: `outer.max - outer.mean`
    pub flash_outer: f64,
    /// Inner boundary encroaching on the hole: `inner.mean - inner.min`
    pub flash_inner: f64,
    /// Outer boundary receding: `outer.mean - outer.min`
    pub cut_outer: f64,
    /// Hole enlarged: `inner.max - inner.mean`
    pub cut_inner: f64,
}

impl Deviations {
    pub fn from_profiles(outer: &RadiusStats, inner: &RadiusStats) -> Self {
        Self {
            flash_outer: outer.max - outer.mean,
            flash_inner: inner.mean - inner.min,
            cut_outer: outer.mean - outer.min,
            cut_inner: inner.max - inner.mean,
        }
    }
}

/// Everything measured on a ring with both boundaries present
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingMeasurements {
    pub centroid: Centroid,
    pub outer: RadiusStats,
    pub inner: RadiusStats,
    pub tolerances: Tolerances,
    pub deviations: Deviations,
}

/// Label plus the measurements that produced it.
///
/// `measurements` is `None` for the terminal states reached before any radius
/// is measured (`NoObjectFound`, `SingleContourDefect`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inspection {
    pub label: Label,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub measurements: Option<RingMeasurements>,
}

impl Inspection {
    pub fn terminal(label: Label) -> Self {
        Self { label, measurements: None }
    }
}

/// Dimensionless thresholds scaling the tolerance bands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InspectionConfig {
    pub flash_threshold: f64,
    pub cut_threshold: f64,
}

impl InspectionConfig {
    /// Tolerance bands for a ring whose outer mean radius is `outer_mean`
    pub fn tolerances(&self, outer_mean: f64) -> Tolerances {
        Tolerances {
            flash: outer_mean * self.flash_threshold,
            cut: outer_mean * self.cut_threshold,
        }
    }
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            flash_threshold: DEFAULT_FLASH_THRESHOLD,
            cut_threshold: DEFAULT_CUT_THRESHOLD,
        }
    }
}
