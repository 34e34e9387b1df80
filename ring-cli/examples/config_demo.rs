use image::{DynamicImage, GrayImage, Luma};
use ring_cli::ring_defect::{ChainApproximation, ClassifierConfig};
use ring_cli::{RingInspector, DEFAULT_BINARIZE_CUTOFF};

/// Dark ring with an optional notch cut into its outer edge
fn ring_photo(notch_radius: f64) -> DynamicImage {
    let (c, r_out, r_in) = (200.0, 150.0, 80.0);
    let gray = GrayImage::from_fn(401, 401, |x, y| {
        let d = (x as f64 - c).hypot(y as f64 - c);
        let notch = notch_radius > 0.0 && (x as f64 - (c + r_out)).hypot(y as f64 - c) <= notch_radius;
        if d <= r_out && d >= r_in && !notch { Luma([20]) } else { Luma([240]) }
    });
    DynamicImage::ImageLuma8(gray)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ring Inspection Configuration Demo");
    println!("==================================\n");

    let default_config = ClassifierConfig::new().with_metadata("Default", "Stock flash/cut bands");
    let mut lenient_config = ClassifierConfig::new().with_metadata("Lenient", "Accepts shallow edge damage");
    lenient_config.core.cut_threshold = 0.1;
    lenient_config.approximation = ChainApproximation::None;

    println!("Configurations:");
    println!("  • {}", default_config.summary());
    println!("  • {}", lenient_config.summary());

    println!("\nTOML for the lenient configuration:\n{}", lenient_config.to_toml()?);

    let photos = [("intact", ring_photo(0.0)), ("notched", ring_photo(10.0))];

    for config in [default_config, lenient_config] {
        let name = config.name.clone().unwrap_or_default();
        let inspector = RingInspector::new(config, DEFAULT_BINARIZE_CUTOFF)?;
        for (label, photo) in &photos {
            let inspection = inspector.inspect_image(photo)?;
            println!("{:>8} / {:<7}: {}", name, label, inspection.label);
        }
    }

    Ok(())
}
