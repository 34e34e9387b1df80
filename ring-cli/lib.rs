use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageReader, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;
use thiserror::Error;
use tracing::{debug, info, instrument};

use ring_defect::{ChainApproximation, ClassifierConfig, ContourSet, DefectError, RingClassifier};

pub mod logger;

pub use ring_core::{self, Inspection, Label, DEFAULT_BINARIZE_CUTOFF};
pub use ring_defect;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Failed to open image {path}: {source}")]
    Open { path: PathBuf, #[source] source: std::io::Error },

    #[error("Failed to decode image {path}: {source}")]
    Decode { path: PathBuf, #[source] source: image::ImageError },

    #[error("Failed to write annotated image {path}: {source}")]
    Annotate { path: PathBuf, #[source] source: image::ImageError },

    #[error(transparent)]
    Defect(#[from] DefectError),
}

pub type InspectResult<T> = Result<T, InspectError>;

/// Inverse binarization: pixels at or below `cutoff` become foreground (255)
pub fn binarize_inverse(gray: &GrayImage, cutoff: u8) -> GrayImage {
    let mut mask = gray.clone();
    for p in mask.pixels_mut() {
        p.0[0] = if p.0[0] > cutoff { 0 } else { 255 };
    }
    mask
}

/// Decode an image file of any format `image` recognises
pub fn load_image<P: AsRef<Path>>(path: P) -> InspectResult<DynamicImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| InspectError::Open { path: path.to_path_buf(), source })?;
    reader
        .decode()
        .map_err(|source| InspectError::Decode { path: path.to_path_buf(), source })
}

/// Override file or default settings with explicit command-line values
pub fn apply_overrides(
    mut config: ClassifierConfig,
    flash_threshold: Option<f64>,
    cut_threshold: Option<f64>,
    approximation: Option<ChainApproximation>,
) -> ClassifierConfig {
    if let Some(flash) = flash_threshold {
        config.core.flash_threshold = flash;
    }
    if let Some(cut) = cut_threshold {
        config.core.cut_threshold = cut;
    }
    if let Some(approximation) = approximation {
        config.approximation = approximation;
    }
    config
}

/// Image-level front end: grayscale, binarize, classify
#[derive(Debug, Clone)]
pub struct RingInspector {
    classifier: RingClassifier,
    cutoff: u8,
}

impl RingInspector {
    /// Create an inspector with a validated configuration and binarization cutoff
    pub fn new(config: ClassifierConfig, cutoff: u8) -> InspectResult<Self> {
        let classifier = RingClassifier::with_approximation(config.core, config.approximation)?;
        Ok(Self { classifier, cutoff })
    }

    /// Binary mask in which the dark part is foreground
    pub fn mask(&self, img: &DynamicImage) -> GrayImage {
        binarize_inverse(&img.to_luma8(), self.cutoff)
    }

    pub fn inspect_image(&self, img: &DynamicImage) -> InspectResult<Inspection> {
        Ok(self.classifier.inspect(&self.mask(img))?)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn inspect_path<P: AsRef<Path>>(&self, path: P) -> InspectResult<Inspection> {
        let img = load_image(path.as_ref())?;
        debug!(width = img.width(), height = img.height(), "image decoded");
        let inspection = self.inspect_image(&img)?;
        info!(label = inspection.label.code(), "inspection finished");
        Ok(inspection)
    }

    pub fn classify_path<P: AsRef<Path>>(&self, path: P) -> InspectResult<Label> {
        Ok(self.inspect_path(path)?.label)
    }

    /// Inspect `img` and draw the selected boundaries, centroid and mean radii
    pub fn annotate(&self, img: &DynamicImage) -> InspectResult<(Inspection, RgbImage)> {
        let contours = ContourSet::from_mask(&self.mask(img), self.classifier.approximation())?;
        let (inspection, selection) = self.classifier.inspect_selection(&contours)?;
        let mut canvas = img.to_rgb8();

        let outer_color = if inspection.label.is_defect() { Rgb([255, 0, 0]) } else { Rgb([0, 200, 0]) };
        let inner_color = Rgb([0, 120, 255]);
        let marker_color = Rgb([255, 200, 0]);

        if let Some(selection) = selection {
            if let Some(outer) = contours.get(selection.outer) {
                draw_closed_polyline(&mut canvas, &outer.points, outer_color);
            }
            if let Some(inner) = selection.inner.and_then(|i| contours.get(i)) {
                draw_closed_polyline(&mut canvas, &inner.points, inner_color);
            }
        }

        if let Some(m) = &inspection.measurements {
            let center = (m.centroid.x.round() as i32, m.centroid.y.round() as i32);
            draw_cross_mut(&mut canvas, marker_color, center.0, center.1);
            draw_hollow_circle_mut(&mut canvas, center, m.outer.mean.round() as i32, marker_color);
            draw_hollow_circle_mut(&mut canvas, center, m.inner.mean.round() as i32, marker_color);
        }

        Ok((inspection, canvas))
    }

    /// Inspect the image at `path` and save the annotated rendering to `out`
    pub fn annotate_path<P: AsRef<Path>, Q: AsRef<Path>>(&self, path: P, out: Q) -> InspectResult<Inspection> {
        let img = load_image(path.as_ref())?;
        let (inspection, canvas) = self.annotate(&img)?;
        let out = out.as_ref();
        canvas
            .save(out)
            .map_err(|source| InspectError::Annotate { path: out.to_path_buf(), source })?;
        info!(label = inspection.label.code(), out = %out.display(), "annotated image saved");
        Ok(inspection)
    }

    pub fn classifier(&self) -> &RingClassifier {
        &self.classifier
    }

    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }
}

fn draw_closed_polyline(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    let n = points.len();
    if n == 1 {
        draw_cross_mut(canvas, color, points[0].x, points[0].y);
        return;
    }
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        draw_line_segment_mut(canvas, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color);
    }
}
