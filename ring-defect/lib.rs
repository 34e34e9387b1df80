//! Flash and cut detection for ring-shaped parts.
//!
//! The classifier traces the boundaries of a binary mask, pairs the largest
//! outer boundary with its largest hole, and compares centroid-relative
//! radius statistics of both against tolerance bands scaled by the outer
//! mean radius.
//!
//! ```no_run
//! use image::GrayImage;
//! use ring_defect::{classify, Label};
//!
//! let mask = GrayImage::new(64, 64);
//! assert_eq!(classify(&mask, 0.02, 0.017).unwrap(), Label::NoObjectFound);
//! ```

pub mod builder;
pub mod classifier;
pub mod config;
pub mod contours;
pub mod error;
pub mod moments;
pub mod profile;
pub mod types;

pub use builder::ClassifierBuilder;
pub use classifier::RingClassifier;
pub use config::ClassifierConfig;
pub use contours::{polygon_area, simplify_chain, BoundaryContour, ChainApproximation, ContourSet};
pub use error::{DefectError, DefectResult, Stage};
pub use moments::ContourMoments;
pub use profile::RadiusProfile;
pub use types::RingSelection;

pub use ring_core::{
    Centroid, CentroidSource, Deviations, Inspection, InspectionConfig, Label, RadiusStats, RingMeasurements,
    Tolerances, DEFAULT_CUT_THRESHOLD, DEFAULT_FLASH_THRESHOLD,
};

use image::GrayImage;

/// Classify one binary mask with the given thresholds
pub fn classify(mask: &GrayImage, flash_threshold: f64, cut_threshold: f64) -> DefectResult<Label> {
    RingClassifier::new(InspectionConfig { flash_threshold, cut_threshold })?.classify(mask)
}
