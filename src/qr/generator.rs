//! Per-target QR rendering and the pipeline driver.

use crate::config::Config;
use crate::console;
use crate::qr::printable;
use crate::qr::targets::{enumerate_targets, renditions, QrTarget, Rendition, RenditionFormat};
use crate::report::{ItemOutcome, RunSummary};
use anyhow::{Context, Result};
use image::Luma;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::{Path, PathBuf};

/// Result of one QR pipeline run.
#[derive(Debug)]
pub struct QrRunReport {
    /// One outcome per target, in enumeration order
    pub outcomes: Vec<ItemOutcome>,

    /// Folded success/failure counts
    pub summary: RunSummary,

    /// Path of the printable sheet
    pub printable_path: PathBuf,
}

/// Run the QR pipeline: render every rendition for every configured target,
/// then write the printable sheet.
///
/// Failure granularity is per target: the first rendition error aborts the
/// remaining renditions for that target, records one failed outcome, and the
/// loop continues with the next target. Only a failure to create the output
/// directory (or to write the sheet) is fatal.
pub fn generate_qr_codes(config: &Config) -> Result<QrRunReport> {
    let qr = &config.qr;

    std::fs::create_dir_all(&qr.output_dir).with_context(|| {
        format!(
            "failed to create QR output directory {}",
            qr.output_dir.display()
        )
    })?;

    let targets = enumerate_targets(&config.site, qr);
    let rendition_set = renditions(qr);

    tracing::info!(
        "generating {} QR target(s) into {}",
        targets.len(),
        qr.output_dir.display()
    );

    let mut outcomes = Vec::with_capacity(targets.len());
    for target in &targets {
        match render_target(target, &rendition_set, &qr.output_dir, &qr.file_prefix) {
            Ok(produced) => {
                console::success(format!("{}: {}", target.label, target.url));
                for path in &produced {
                    console::detail(path.display());
                }
                outcomes.push(ItemOutcome::success(&target.name, produced));
            }
            Err(err) => {
                console::error(format!("{}: {err:#}", target.label));
                outcomes.push(ItemOutcome::failure(&target.name, format!("{err:#}")));
            }
        }
    }

    // The sheet is written after the loop regardless of per-target outcomes;
    // a target that failed leaves a dangling image reference in it.
    let printable_path = printable::write_printable_sheet(config, &targets)?;

    let summary = RunSummary::from_outcomes(&outcomes);
    Ok(QrRunReport {
        outcomes,
        summary,
        printable_path,
    })
}

/// Render all renditions for one target, in rendition order.
fn render_target(
    target: &QrTarget,
    rendition_set: &[Rendition],
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    let code = QrCode::with_error_correction_level(&target.url, EcLevel::M)
        .with_context(|| format!("failed to encode {}", target.url))?;

    let mut produced = Vec::with_capacity(rendition_set.len());
    for rendition in rendition_set {
        let path = rendition.output_path(output_dir, prefix, &target.name);
        match rendition.format {
            RenditionFormat::Svg => {
                let markup = code
                    .render::<svg::Color>()
                    .min_dimensions(rendition.width, rendition.width)
                    .dark_color(svg::Color("#000000"))
                    .light_color(svg::Color("#ffffff"))
                    .build();
                std::fs::write(&path, markup)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            RenditionFormat::Png => {
                let raster = code
                    .render::<Luma<u8>>()
                    .min_dimensions(rendition.width, rendition.width)
                    .build();
                raster
                    .save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        produced.push(path);
    }

    Ok(produced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.qr.output_dir = dir.path().join("qr-codes");
        // Small widths keep the rendered buffers cheap.
        config.qr.svg_width = 60;
        config.qr.png_width = 60;
        config.qr.print_width = 120;
        config
    }

    #[test]
    fn test_full_run_produces_nine_files_and_sheet() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let report = generate_qr_codes(&config).unwrap();

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.succeeded, 3);
        assert_eq!(report.summary.failed, 0);
        assert!(report.printable_path.is_file());

        let produced: Vec<_> = report
            .outcomes
            .iter()
            .flat_map(|o| o.produced.iter())
            .collect();
        assert_eq!(produced.len(), 9);
        for path in produced {
            assert!(path.is_file(), "missing rendition {}", path.display());
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_rendition_filenames() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let report = generate_qr_codes(&config).unwrap();
        let en = &report.outcomes[0];
        let names: Vec<_> = en
            .produced
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "ruby-profile-en.svg",
                "ruby-profile-en.png",
                "ruby-profile-en-print.png"
            ]
        );
    }

    #[test]
    fn test_png_rendition_meets_minimum_width() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let report = generate_qr_codes(&config).unwrap();
        let print_png = &report.outcomes[0].produced[2];
        let (width, height) = image::image_dimensions(print_png).unwrap();
        assert!(width >= 120);
        assert_eq!(width, height);
    }

    #[test]
    fn test_empty_target_list_is_successful() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.qr.targets.clear();

        let report = generate_qr_codes(&config).unwrap();
        assert!(report.summary.is_empty());
        // The sheet is still written after the (empty) loop.
        assert!(report.printable_path.is_file());
    }
}
