mod common;

use std::f64::consts::PI;

use common::{filled_disk, SyntheticRing};
use image::GrayImage;
use ring_defect::{
    classify, ChainApproximation, CentroidSource, ClassifierBuilder, ContourSet, InspectionConfig, Label,
    RingClassifier,
};

fn default_classifier() -> RingClassifier {
    RingClassifier::new(InspectionConfig::default()).unwrap()
}

#[test]
fn blank_mask_is_no_object() {
    let mask = GrayImage::new(120, 80);
    assert_eq!(classify(&mask, 0.02, 0.017).unwrap(), Label::NoObjectFound);
}

#[test]
fn filled_disk_is_single_contour_defect() {
    let mask = filled_disk(201, 201, 100.0, 100.0, 60.0);
    let inspection = default_classifier().inspect(&mask).unwrap();
    assert_eq!(inspection.label, Label::SingleContourDefect);
    assert!(inspection.measurements.is_none());
}

#[test]
fn perfect_annulus_is_ok() {
    let mask = SyntheticRing::standard().render();
    let inspection = default_classifier().inspect(&mask).unwrap();
    assert_eq!(inspection.label, Label::Ok);

    let m = inspection.measurements.unwrap();
    assert_eq!(m.centroid.source, CentroidSource::Moments);
    assert!((m.centroid.x - 200.0).abs() < 1e-6);
    assert!((m.centroid.y - 200.0).abs() < 1e-6);
    assert!(m.outer.mean > 148.0 && m.outer.mean <= 150.0);
    assert!(m.inner.mean >= 80.0 && m.inner.mean < 82.0);
    assert!(m.deviations.flash_outer < m.tolerances.flash);
    assert!(m.deviations.cut_inner < m.tolerances.cut);
}

#[test]
fn perfect_annulus_is_ok_without_chain_approximation() {
    let classifier = ClassifierBuilder::new().approximation(ChainApproximation::None).build().unwrap();
    let mask = SyntheticRing::standard().render();
    assert_eq!(classifier.classify(&mask).unwrap(), Label::Ok);
}

#[test]
fn outer_bulge_is_flash() {
    let mask = SyntheticRing::standard().bump(0.0, 155.0, 15.0).render();
    assert_eq!(default_classifier().classify(&mask).unwrap(), Label::Flash);
}

#[test]
fn material_in_hole_is_flash() {
    let mask = SyntheticRing::standard().bump(PI / 2.0, 80.0, 10.0).render();
    let inspection = default_classifier().inspect(&mask).unwrap();
    assert_eq!(inspection.label, Label::Flash);

    let m = inspection.measurements.unwrap();
    assert!(m.deviations.flash_inner > m.tolerances.flash);
    assert!(m.deviations.flash_outer < m.tolerances.flash);
}

#[test]
fn outer_recess_is_cut() {
    let mask = SyntheticRing::standard().notch(0.0, 150.0, 10.0).render();
    let inspection = default_classifier().inspect(&mask).unwrap();
    assert_eq!(inspection.label, Label::Cut);

    let m = inspection.measurements.unwrap();
    assert!(m.deviations.cut_outer > m.tolerances.cut);
}

#[test]
fn enlarged_hole_is_cut() {
    let mask = SyntheticRing::standard().notch(PI, 80.0, 10.0).render();
    let inspection = default_classifier().inspect(&mask).unwrap();
    assert_eq!(inspection.label, Label::Cut);

    let m = inspection.measurements.unwrap();
    assert!(m.deviations.cut_inner > m.tolerances.cut);
}

#[test]
fn flash_takes_precedence_over_cut() {
    let mask = SyntheticRing::standard().bump(0.0, 155.0, 15.0).notch(PI, 150.0, 10.0).render();
    let inspection = default_classifier().inspect(&mask).unwrap();

    let m = inspection.measurements.unwrap();
    assert!(m.deviations.cut_outer > m.tolerances.cut);
    assert_eq!(inspection.label, Label::Flash);
}

#[test]
fn wide_cut_band_accepts_small_recess() {
    let mask = SyntheticRing::standard().notch(0.0, 150.0, 10.0).render();
    assert_eq!(classify(&mask, 0.02, 0.017).unwrap(), Label::Cut);
    assert_eq!(classify(&mask, 0.02, 0.1).unwrap(), Label::Ok);
}

#[test]
fn classification_is_repeatable() {
    let classifier = default_classifier();
    let mask = SyntheticRing::standard().bump(1.0, 155.0, 12.0).render();
    let first = classifier.inspect(&mask).unwrap();
    let second = classifier.inspect(&mask).unwrap();
    assert_eq!(first, second);
}

#[test]
fn stray_blob_does_not_replace_ring() {
    let ring = SyntheticRing::standard().render();
    let mask = GrayImage::from_fn(401, 401, |x, y| {
        let blob = x < 20 && y < 20;
        if blob { image::Luma([255]) } else { *ring.get_pixel(x, y) }
    });

    let contours = ContourSet::from_mask(&mask, ChainApproximation::Simple).unwrap();
    assert_eq!(contours.top_level().count(), 2);
    assert_eq!(default_classifier().classify_contours(&contours).unwrap(), Label::Ok);
}

#[test]
fn island_inside_hole_is_ignored() {
    let ring = SyntheticRing::standard().render();
    let island = filled_disk(401, 401, 200.0, 200.0, 10.0);
    let mask = GrayImage::from_fn(401, 401, |x, y| {
        if island.get_pixel(x, y)[0] > 0 { image::Luma([255]) } else { *ring.get_pixel(x, y) }
    });

    let contours = ContourSet::from_mask(&mask, ChainApproximation::Simple).unwrap();
    assert_eq!(contours.len(), 3);
    assert_eq!(default_classifier().classify(&mask).unwrap(), Label::Ok);
}

#[test]
fn negative_threshold_is_caller_error() {
    let mask = SyntheticRing::standard().render();
    assert!(classify(&mask, -0.02, 0.017).is_err());
}
