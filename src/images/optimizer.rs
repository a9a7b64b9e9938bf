//! Per-image down-only resize and JPEG re-encoding.

use crate::config::Config;
use crate::console;
use crate::images::discover::discover_images;
use crate::report::{ItemOutcome, RunSummary};
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Measurements for one successfully optimized image.
#[derive(Debug, Clone)]
pub struct OptimizedImage {
    pub source: PathBuf,
    pub output: PathBuf,

    /// Decoded source dimensions (width, height)
    pub source_dimensions: (u32, u32),

    /// Output dimensions after the down-only resize
    pub output_dimensions: (u32, u32),

    pub source_bytes: u64,
    pub output_bytes: u64,
}

impl OptimizedImage {
    /// Size reduction as a percentage of the source size.
    pub fn reduction_percent(&self) -> f64 {
        if self.source_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.output_bytes as f64 / self.source_bytes as f64) * 100.0
    }
}

/// Result of one image pipeline run.
#[derive(Debug)]
pub struct ImageRunReport {
    /// One outcome per discovered image, in enumeration order
    pub outcomes: Vec<ItemOutcome>,

    /// Measurements for the images that succeeded
    pub optimized: Vec<OptimizedImage>,

    /// Folded success/failure counts
    pub summary: RunSummary,
}

/// Run the image pipeline: discover source images and optimize each one.
///
/// A failure to read, decode, resize, or write a single image is recorded in
/// that image's outcome and the loop continues. Only a failure to create the
/// source or output directory is fatal.
pub fn optimize_images(config: &Config) -> Result<ImageRunReport> {
    let images = &config.images;

    let sources = discover_images(&images.source_dir, &images.extensions)?;

    std::fs::create_dir_all(&images.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            images.output_dir.display()
        )
    })?;

    if sources.is_empty() {
        tracing::warn!("no images found in {}", images.source_dir.display());
        return Ok(ImageRunReport {
            outcomes: Vec::new(),
            optimized: Vec::new(),
            summary: RunSummary::default(),
        });
    }

    tracing::info!(
        "optimizing {} image(s) from {}",
        sources.len(),
        images.source_dir.display()
    );

    let mut outcomes = Vec::with_capacity(sources.len());
    let mut optimized = Vec::new();
    for source in &sources {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();

        match optimize_one(source, &images.output_dir, images.max_width, images.quality) {
            Ok(info) => {
                console::success(format!("{name} -> {}", info.output.display()));
                console::detail(format!(
                    "{}x{} ({:.1} KB) -> {}x{} ({:.1} KB), {:.1}% smaller",
                    info.source_dimensions.0,
                    info.source_dimensions.1,
                    info.source_bytes as f64 / 1024.0,
                    info.output_dimensions.0,
                    info.output_dimensions.1,
                    info.output_bytes as f64 / 1024.0,
                    info.reduction_percent(),
                ));
                outcomes.push(ItemOutcome::success(&name, vec![info.output.clone()]));
                optimized.push(info);
            }
            Err(err) => {
                console::error(format!("{name}: {err:#}"));
                outcomes.push(ItemOutcome::failure(&name, format!("{err:#}")));
            }
        }
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    Ok(ImageRunReport {
        outcomes,
        optimized,
        summary,
    })
}

/// Optimize one source image into `<output_dir>/<stem>-optimized.jpg`.
fn optimize_one(
    source: &Path,
    output_dir: &Path,
    max_width: u32,
    quality: u8,
) -> Result<OptimizedImage> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("source file {} has no usable name", source.display()))?;
    let output = output_dir.join(format!("{stem}-optimized.jpg"));

    let source_bytes = std::fs::metadata(source)
        .with_context(|| format!("failed to read metadata for {}", source.display()))?
        .len();

    let decoded = image::open(source)
        .with_context(|| format!("failed to decode {}", source.display()))?;
    let (width, height) = (decoded.width(), decoded.height());

    let (target_width, target_height) = scaled_dimensions(width, height, max_width);
    let resized = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Lanczos3)
    };

    let rgb = resized.to_rgb8();
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(&rgb)
        .with_context(|| format!("failed to encode {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    let output_bytes = std::fs::metadata(&output)
        .with_context(|| format!("failed to read metadata for {}", output.display()))?
        .len();

    Ok(OptimizedImage {
        source: source.to_path_buf(),
        output,
        source_dimensions: (width, height),
        output_dimensions: (rgb.width(), rgb.height()),
        source_bytes,
        output_bytes,
    })
}

/// Down-only dimension math: cap the width at `max_width` preserving the
/// aspect ratio, and never upscale.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled_height = ((height as u64 * max_width as u64) / width as u64).max(1) as u32;
    (max_width, scaled_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use image::RgbImage;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.images.source_dir = dir.path().join("raw");
        config.images.output_dir = dir.path().join("out");
        config.images.max_width = 100;
        config
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_scaled_dimensions_never_upscale() {
        assert_eq!(scaled_dimensions(800, 600, 1200), (800, 600));
        assert_eq!(scaled_dimensions(1200, 900, 1200), (1200, 900));
    }

    #[test]
    fn test_scaled_dimensions_cap_width_preserving_aspect() {
        assert_eq!(scaled_dimensions(2400, 1200, 1200), (1200, 600));
        assert_eq!(scaled_dimensions(3000, 1000, 1200), (1200, 400));
    }

    #[test]
    fn test_scaled_dimensions_height_floor() {
        assert_eq!(scaled_dimensions(10_000, 1, 100), (100, 1));
    }

    #[test]
    fn test_wide_image_is_resized_down() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.images.source_dir).unwrap();
        write_png(&config.images.source_dir.join("wide.png"), 200, 100);

        let report = optimize_images(&config).unwrap();
        assert_eq!(report.summary.succeeded, 1);
        let info = &report.optimized[0];
        assert_eq!(info.output_dimensions, (100, 50));
        assert!(info.output.ends_with("wide-optimized.jpg"));
        let (width, height) = image::image_dimensions(&info.output).unwrap();
        assert_eq!((width, height), (100, 50));
    }

    #[test]
    fn test_narrow_image_keeps_dimensions() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.images.source_dir).unwrap();
        write_png(&config.images.source_dir.join("small.png"), 40, 30);

        let report = optimize_images(&config).unwrap();
        let info = &report.optimized[0];
        assert_eq!(info.output_dimensions, (40, 30));
        let (width, _) = image::image_dimensions(&info.output).unwrap();
        assert_eq!(width, 40);
    }

    #[test]
    fn test_undecodable_file_fails_without_stopping_the_run() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.images.source_dir).unwrap();
        std::fs::write(config.images.source_dir.join("broken.jpg"), b"not an image").unwrap();
        write_png(&config.images.source_dir.join("good.png"), 40, 30);

        let report = optimize_images(&config).unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(
            report.summary.succeeded + report.summary.failed,
            report.summary.total
        );

        let failed = report.outcomes.iter().find(|o| !o.succeeded()).unwrap();
        assert_eq!(failed.name, "broken.jpg");
        assert!(failed.error.is_some());
    }

    #[test]
    fn test_missing_source_dir_is_bootstrapped() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        assert!(!config.images.source_dir.exists());

        let report = optimize_images(&config).unwrap();
        assert!(report.summary.is_empty());
        assert!(config.images.source_dir.is_dir());
        assert_eq!(
            std::fs::read_dir(&config.images.source_dir).unwrap().count(),
            0
        );
    }

    #[test]
    fn test_empty_source_dir_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.images.source_dir).unwrap();

        let report = optimize_images(&config).unwrap();
        assert_eq!(report.summary.total, 0);
        assert_eq!(
            std::fs::read_dir(&config.images.output_dir).unwrap().count(),
            0
        );
    }

    #[test]
    fn test_reduction_percent() {
        let info = OptimizedImage {
            source: PathBuf::from("a.png"),
            output: PathBuf::from("a-optimized.jpg"),
            source_dimensions: (100, 100),
            output_dimensions: (100, 100),
            source_bytes: 1000,
            output_bytes: 250,
        };
        assert!((info.reduction_percent() - 75.0).abs() < f64::EPSILON);

        let empty = OptimizedImage {
            source_bytes: 0,
            ..info
        };
        assert_eq!(empty.reduction_percent(), 0.0);
    }
}
