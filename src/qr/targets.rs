//! Target enumeration and the fixed rendition set.

use crate::config::{QrConfig, SiteConfig};
use std::path::{Path, PathBuf};

/// One page to encode: a unit of work for the QR pipeline.
#[derive(Debug, Clone)]
pub struct QrTarget {
    /// Unique key used in output filenames
    pub name: String,

    /// Fully qualified URL encoded into the QR code
    pub url: String,

    /// Human-readable label
    pub label: String,
}

/// Output format of one rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenditionFormat {
    /// Scalable vector markup, for print layout
    Svg,
    /// Raster image
    Png,
}

/// One output format/resolution produced for every target.
#[derive(Debug, Clone)]
pub struct Rendition {
    pub format: RenditionFormat,

    /// Minimum edge length in pixels
    pub width: u32,

    /// Filename suffix between the target name and the extension
    pub suffix: &'static str,

    pub extension: &'static str,
}

impl Rendition {
    /// Deterministic output path: `<dir>/<prefix>-<name>[suffix].<ext>`.
    pub fn output_path(&self, dir: &Path, prefix: &str, target_name: &str) -> PathBuf {
        dir.join(format!(
            "{prefix}-{target_name}{}.{}",
            self.suffix, self.extension
        ))
    }
}

/// Build the ordered list of targets from configuration, resolving each
/// target path against the site base URL.
pub fn enumerate_targets(site: &SiteConfig, qr: &QrConfig) -> Vec<QrTarget> {
    qr.targets
        .iter()
        .map(|target| QrTarget {
            name: target.name.clone(),
            url: join_url(&site.base_url, &target.path),
            label: target.label.clone(),
        })
        .collect()
}

/// The fixed rendition set: SVG, web PNG, print PNG.
pub fn renditions(qr: &QrConfig) -> [Rendition; 3] {
    [
        Rendition {
            format: RenditionFormat::Svg,
            width: qr.svg_width,
            suffix: "",
            extension: "svg",
        },
        Rendition {
            format: RenditionFormat::Png,
            width: qr.png_width,
            suffix: "",
            extension: "png",
        },
        Rendition {
            format: RenditionFormat::Png,
            width: qr.print_width,
            suffix: "-print",
            extension: "png",
        },
    ]
}

/// Join a base URL and a relative path with exactly one separating slash.
/// The empty path yields `<base>/` (the site root).
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
