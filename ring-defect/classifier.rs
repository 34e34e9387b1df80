use image::GrayImage;
use ring_core::{Deviations, Inspection, InspectionConfig, Label, RingMeasurements, Tolerances};
use tracing::{debug, trace};

use crate::contours::{ChainApproximation, ContourSet};
use crate::error::{DefectError, DefectResult, Stage};
use crate::moments::ContourMoments;
use crate::profile::RadiusProfile;
use crate::types::RingSelection;

/// Flash/cut classifier for ring-shaped parts.
///
/// Holds only configuration, so one instance can be shared across threads and
/// every call is independent of the previous ones.
#[derive(Debug, Clone)]
pub struct RingClassifier {
    cfg: InspectionConfig,
    approximation: ChainApproximation,
}

impl RingClassifier {
    /// Creates a classifier with validated thresholds
    pub fn new(cfg: InspectionConfig) -> DefectResult<Self> {
        Self::with_approximation(cfg, ChainApproximation::default())
    }

    pub fn with_approximation(cfg: InspectionConfig, approximation: ChainApproximation) -> DefectResult<Self> {
        validate_threshold("flash", cfg.flash_threshold)?;
        validate_threshold("cut", cfg.cut_threshold)?;
        Ok(Self { cfg, approximation })
    }

    /// Classify a binary mask (non-zero pixels are the part)
    pub fn classify(&self, mask: &GrayImage) -> DefectResult<Label> {
        Ok(self.inspect(mask)?.label)
    }

    /// Classify a mask and keep the measurements behind the decision
    pub fn inspect(&self, mask: &GrayImage) -> DefectResult<Inspection> {
        let contours = ContourSet::from_mask(mask, self.approximation)?;
        self.inspect_contours(&contours)
    }

    /// Classify contours extracted by the caller
    pub fn classify_contours(&self, contours: &ContourSet) -> DefectResult<Label> {
        Ok(self.inspect_contours(contours)?.label)
    }

    pub fn inspect_contours(&self, contours: &ContourSet) -> DefectResult<Inspection> {
        Ok(self.inspect_selection(contours)?.0)
    }

    /// Like [`inspect_contours`](Self::inspect_contours), also returning the
    /// ring the measurements were taken from
    pub fn inspect_selection(&self, contours: &ContourSet) -> DefectResult<(Inspection, Option<RingSelection>)> {
        if contours.is_empty() {
            debug!("no contours found");
            return Ok((Inspection::terminal(Label::NoObjectFound), None));
        }

        let selection = Self::select_ring(contours).ok_or_else(|| {
            DefectError::geometry(Stage::HierarchyPairing, "no top-level contour")
        })?;

        let Some(inner_idx) = selection.inner else {
            debug!(outer = selection.outer, "outer contour has no hole");
            return Ok((Inspection::terminal(Label::SingleContourDefect), Some(selection)));
        };

        let outer = contours.get(selection.outer).ok_or_else(|| {
            DefectError::geometry(Stage::HierarchyPairing, format!("outer contour {} missing", selection.outer))
        })?;
        let inner = contours.get(inner_idx).ok_or_else(|| {
            DefectError::geometry(Stage::HierarchyPairing, format!("inner contour {} missing", inner_idx))
        })?;

        let (width, height) = contours.dimensions();
        let centroid = ContourMoments::from_points(&outer.points).centroid(width, height);
        if !centroid.x.is_finite() || !centroid.y.is_finite() {
            return Err(DefectError::geometry(
                Stage::Centroid,
                format!("non-finite centroid ({}, {})", centroid.x, centroid.y),
            ));
        }

        let outer_stats = RadiusProfile::stats(&outer.points, &centroid)?;
        let inner_stats = RadiusProfile::stats(&inner.points, &centroid)?;

        let tolerances = self.cfg.tolerances(outer_stats.mean);
        let deviations = Deviations::from_profiles(&outer_stats, &inner_stats);
        let label = Self::decide(&deviations, &tolerances);

        debug!(
            cx = centroid.x,
            cy = centroid.y,
            r_out_mean = outer_stats.mean,
            r_in_mean = inner_stats.mean,
            label = label.code(),
            "ring classified"
        );

        let inspection = Inspection {
            label,
            measurements: Some(RingMeasurements {
                centroid,
                outer: outer_stats,
                inner: inner_stats,
                tolerances,
                deviations,
            }),
        };
        Ok((inspection, Some(selection)))
    }

    /// Locate the outer boundary and its hole.
    ///
    /// The outer contour is the largest top-level contour, the inner one the
    /// largest contour whose parent is the outer contour. Equal areas resolve
    /// to the contour starting first in raster order, then to the lower index.
    pub fn select_ring(contours: &ContourSet) -> Option<RingSelection> {
        let outer = Self::largest(contours, contours.top_level())?;
        let inner = Self::largest(contours, contours.children_of(outer));
        trace!(outer, ?inner, "ring selection");
        Some(RingSelection { outer, inner })
    }

    fn largest(contours: &ContourSet, candidates: impl Iterator<Item = usize>) -> Option<usize> {
        let all = contours.contours();
        candidates
            .map(|i| (i, all[i].area(), all[i].start_key()))
            .fold(None, |best: Option<(usize, f64, (i32, i32))>, cand| match best {
                None => Some(cand),
                Some(b) => {
                    let larger = cand.1 > b.1;
                    let tie_wins = cand.1 == b.1 && (cand.2, cand.0) < (b.2, b.0);
                    if larger || tie_wins { Some(cand) } else { Some(b) }
                }
            })
            .map(|(i, _, _)| i)
    }

    /// Threshold decision; flash is checked before cut
    pub fn decide(deviations: &Deviations, tolerances: &Tolerances) -> Label {
        if deviations.flash_outer > tolerances.flash || deviations.flash_inner > tolerances.flash {
            Label::Flash
        } else if deviations.cut_outer > tolerances.cut || deviations.cut_inner > tolerances.cut {
            Label::Cut
        } else {
            Label::Ok
        }
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.cfg
    }

    pub fn approximation(&self) -> ChainApproximation {
        self.approximation
    }
}

pub(crate) fn validate_threshold(name: &'static str, value: f64) -> DefectResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DefectError::InvalidThreshold { name, value })
    }
}
