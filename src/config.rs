//! Configuration for the asset pipelines and the validation checklist.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the asset toolchain.
///
/// Every field has a serde default reproducing the constants the site was
/// originally built with, so running without a config file is equivalent to
/// running with an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings
    #[serde(default)]
    pub site: SiteConfig,

    /// QR code pipeline configuration
    #[serde(default)]
    pub qr: QrConfig,

    /// Image optimization pipeline configuration
    #[serde(default)]
    pub images: ImagesConfig,

    /// Pre-deployment validation checklist configuration
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Site-wide settings shared by the pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public base URL the QR targets point at
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://sorokoletovdu.github.io/ruby-profile".to_string()
}

/// QR code pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    /// Directory the renditions and the printable sheet are written to
    #[serde(default = "default_qr_output_dir")]
    pub output_dir: PathBuf,

    /// Filename prefix for every rendition
    #[serde(default = "default_qr_file_prefix")]
    pub file_prefix: String,

    /// Nominal width of the SVG rendition in pixels
    #[serde(default = "default_svg_width")]
    pub svg_width: u32,

    /// Width of the web PNG rendition in pixels
    #[serde(default = "default_png_width")]
    pub png_width: u32,

    /// Width of the print PNG rendition in pixels
    #[serde(default = "default_print_width")]
    pub print_width: u32,

    /// Pages to encode, in output order
    #[serde(default = "default_qr_targets")]
    pub targets: Vec<QrTargetConfig>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            output_dir: default_qr_output_dir(),
            file_prefix: default_qr_file_prefix(),
            svg_width: default_svg_width(),
            png_width: default_png_width(),
            print_width: default_print_width(),
            targets: default_qr_targets(),
        }
    }
}

/// One QR target: a page of the site to encode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrTargetConfig {
    /// Unique key used in output filenames
    pub name: String,

    /// Path relative to the site base URL (empty for the site root)
    #[serde(default)]
    pub path: String,

    /// Human-readable label for console output and the printable sheet
    pub label: String,
}

fn default_qr_output_dir() -> PathBuf {
    PathBuf::from("public/qr-codes")
}

fn default_qr_file_prefix() -> String {
    "ruby-profile".to_string()
}

fn default_qr_targets() -> Vec<QrTargetConfig> {
    vec![
        QrTargetConfig {
            name: "en".to_string(),
            path: "en/".to_string(),
            label: "English".to_string(),
        },
        QrTargetConfig {
            name: "de".to_string(),
            path: "de/".to_string(),
            label: "German".to_string(),
        },
        QrTargetConfig {
            name: "root".to_string(),
            path: String::new(),
            label: "Auto-redirect".to_string(),
        },
    ]
}

/// Image optimization pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Directory raw images are read from
    #[serde(default = "default_images_source_dir")]
    pub source_dir: PathBuf,

    /// Directory optimized images are written to
    #[serde(default = "default_images_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum output width in pixels; narrower images are never upscaled
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// JPEG quality (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// File extensions considered images (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            source_dir: default_images_source_dir(),
            output_dir: default_images_output_dir(),
            max_width: default_max_width(),
            quality: default_quality(),
            extensions: default_extensions(),
        }
    }
}

fn default_images_source_dir() -> PathBuf {
    PathBuf::from("public/raw")
}

fn default_images_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Validation checklist configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Build artifacts that must exist after a site build
    #[serde(default = "default_build_files")]
    pub build_files: Vec<PathBuf>,

    /// Per-language content files to inspect
    #[serde(default = "default_content_files")]
    pub content_files: Vec<ContentFileConfig>,

    /// Section headings of which at least one must appear in each content file
    #[serde(default = "default_required_sections")]
    pub required_sections: Vec<String>,

    /// Site framework configuration file
    #[serde(default = "default_site_config")]
    pub site_config: PathBuf,

    /// Package manifest file
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Dependencies that must be declared in the manifest
    #[serde(default = "default_required_dependencies")]
    pub required_dependencies: Vec<String>,

    /// Scripts that should be declared in the manifest
    #[serde(default = "default_required_scripts")]
    pub required_scripts: Vec<String>,

    /// CI workflow files that should exist
    #[serde(default = "default_workflows")]
    pub workflows: Vec<PathBuf>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            build_files: default_build_files(),
            content_files: default_content_files(),
            required_sections: default_required_sections(),
            site_config: default_site_config(),
            manifest: default_manifest(),
            required_dependencies: default_required_dependencies(),
            required_scripts: default_required_scripts(),
            workflows: default_workflows(),
        }
    }
}

/// One localized content file to validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFileConfig {
    /// Path relative to the project root
    pub path: PathBuf,

    /// Language name used in check messages
    pub language: String,
}

fn default_build_files() -> Vec<PathBuf> {
    ["dist/index.html", "dist/en/index.html", "dist/de/index.html"]
        .iter()
        .map(PathBuf::from)
        .collect()
}

fn default_content_files() -> Vec<ContentFileConfig> {
    vec![
        ContentFileConfig {
            path: PathBuf::from("src/content/ruby/en.md"),
            language: "English".to_string(),
        },
        ContentFileConfig {
            path: PathBuf::from("src/content/ruby/de.md"),
            language: "German".to_string(),
        },
    ]
}

fn default_required_sections() -> Vec<String> {
    vec![
        "Emergency Contacts".to_string(),
        "Notfallkontakte".to_string(),
    ]
}

fn default_site_config() -> PathBuf {
    PathBuf::from("astro.config.mjs")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_required_dependencies() -> Vec<String> {
    ["astro", "@astrojs/tailwind", "tailwindcss", "sharp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_required_scripts() -> Vec<String> {
    ["dev", "build", "preview", "validate"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_workflows() -> Vec<PathBuf> {
    [
        ".github/workflows/deploy.yml",
        ".github/workflows/validate.yml",
        ".github/workflows/optimize-images.yml",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

// Default value functions for serde
fn default_svg_width() -> u32 {
    300
}
fn default_png_width() -> u32 {
    600
}
fn default_print_width() -> u32 {
    1200
}
fn default_max_width() -> u32 {
    1200
}
fn default_quality() -> u8 {
    90
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    /// Format is auto-detected from file extension (.yaml, .yml, or .json).
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Config = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            "json" => serde_json::from_str(&contents)?,
            _ => {
                // Try YAML first (it's a superset of JSON)
                serde_yaml::from_str(&contents)?
            }
        };
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load the file at `path` if it exists, otherwise fall back to the
    /// compiled-in defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "configuration file {} not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.site.base_url.trim().is_empty() {
            anyhow::bail!("Site base URL must not be empty");
        }
        if self.qr.file_prefix.is_empty() {
            anyhow::bail!("QR file prefix must not be empty");
        }
        if self.qr.svg_width == 0 || self.qr.png_width == 0 || self.qr.print_width == 0 {
            anyhow::bail!("QR rendition widths must be > 0");
        }
        for target in &self.qr.targets {
            if target.name.is_empty() {
                anyhow::bail!("QR target names must not be empty");
            }
        }
        let mut names: Vec<&str> = self.qr.targets.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.qr.targets.len() {
            anyhow::bail!("QR target names must be unique");
        }
        if self.images.max_width == 0 {
            anyhow::bail!("Image max width must be > 0");
        }
        if self.images.quality == 0 || self.images.quality > 100 {
            anyhow::bail!("Image quality must be 1-100");
        }
        if self.images.extensions.is_empty() {
            anyhow::bail!("Image extension list must not be empty");
        }
        Ok(())
    }
}
