//! site-assets CLI
//!
//! Build-time asset pipelines for the pet profile site: QR code generation,
//! image optimization, and a pre-deployment validation checklist.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use site_assets::{console, generate_qr_codes, optimize_images, validate, Config};

#[derive(Parser)]
#[command(name = "site-assets")]
#[command(about = "Asset pipelines and deployment checks for the profile site", long_about = None)]
struct Cli {
    /// Path to configuration file (compiled-in defaults if absent)
    #[arg(short, long, default_value = "site-assets.yaml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both asset pipelines (default if no command specified)
    All,

    /// Generate QR code renditions and the printable sheet
    QrCodes,

    /// Optimize raw images for web delivery
    OptimizeImages,

    /// Run the pre-deployment validation checklist
    Validate {
        /// Project root to validate
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "site-assets.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::All) => {
            let config = load_config(&cli.config)?;
            qr_command(&config)?;
            images_command(&config)?;
        }

        Some(Commands::QrCodes) => {
            let config = load_config(&cli.config)?;
            qr_command(&config)?;
        }

        Some(Commands::OptimizeImages) => {
            let config = load_config(&cli.config)?;
            images_command(&config)?;
        }

        Some(Commands::Validate { root }) => {
            let config = load_config(&cli.config)?;
            validate_command(&config, &root)?;
        }

        Some(Commands::GenerateConfig { output }) => {
            generate_config_command(output)?;
        }
    }

    Ok(())
}

fn load_config(path: &PathBuf) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

/// Per-item failures are reported in the summary but do not fail the run;
/// only a setup error propagates.
fn qr_command(config: &Config) -> Result<()> {
    let report = generate_qr_codes(config)?;
    console::summary("QR codes", &report.summary);
    println!("Printable sheet: {}", report.printable_path.display());
    Ok(())
}

fn images_command(config: &Config) -> Result<()> {
    let report = optimize_images(config)?;
    console::summary("Image optimization", &report.summary);
    Ok(())
}

/// Any error-severity check fails the process with exit code 1; warnings do
/// not.
fn validate_command(config: &Config, root: &PathBuf) -> Result<()> {
    let report = validate::run_validation(root, config)?;
    validate::print_report(&report);
    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn generate_config_command(output: PathBuf) -> Result<()> {
    // Generate a commented YAML config
    let yaml = r#"# site-assets configuration

# === SITE ===
site:
  # Public base URL the QR targets point at
  base_url: "https://sorokoletovdu.github.io/ruby-profile"

# === QR PIPELINE ===
qr:
  # Directory renditions and the printable sheet are written to
  output_dir: "public/qr-codes"

  # Filename prefix for every rendition
  file_prefix: "ruby-profile"

  # Rendition widths in pixels
  svg_width: 300     # scalable, for print layout
  png_width: 600     # web display
  print_width: 1200  # high resolution for printing

  # Pages to encode, in output order.
  # `path` is resolved against site.base_url; empty means the site root.
  targets:
    - name: en
      path: "en/"
      label: "English"
    - name: de
      path: "de/"
      label: "German"
    - name: root
      path: ""
      label: "Auto-redirect"

# === IMAGE PIPELINE ===
images:
  # Directory raw images are read from (created empty if missing)
  source_dir: "public/raw"

  # Directory optimized images are written to
  output_dir: "public"

  # Maximum output width in pixels; narrower images are never upscaled
  max_width: 1200

  # JPEG quality (1-100)
  quality: 90

  # File extensions considered images (case-insensitive)
  extensions: [jpg, jpeg, png, webp]

# === VALIDATION CHECKLIST ===
validation:
  # Build artifacts that must exist after a site build
  build_files:
    - dist/index.html
    - dist/en/index.html
    - dist/de/index.html

  # Per-language content files to inspect
  content_files:
    - path: src/content/ruby/en.md
      language: English
    - path: src/content/ruby/de.md
      language: German

  # At least one of these headings must appear in each content file
  required_sections: ["Emergency Contacts", "Notfallkontakte"]

  # Site framework configuration file
  site_config: astro.config.mjs

  # Package manifest and what it must declare
  manifest: package.json
  required_dependencies: [astro, "@astrojs/tailwind", tailwindcss, sharp]
  required_scripts: [dev, build, preview, validate]

  # CI workflow files that should exist
  workflows:
    - .github/workflows/deploy.yml
    - .github/workflows/validate.yml
    - .github/workflows/optimize-images.yml
"#;

    std::fs::write(&output, yaml)?;
    println!("Generated sample configuration at: {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        // No subcommand - should default to running both pipelines
        let cli = Cli::try_parse_from(["site-assets"]);
        assert!(cli.is_ok());
        assert!(cli.unwrap().command.is_none());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["site-assets", "-c", "other.yaml"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_validate_with_root() {
        let cli = Cli::try_parse_from(["site-assets", "validate", "-r", "../site"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_generate_config() {
        let cli = Cli::try_parse_from(["site-assets", "generate-config", "-o", "out.yaml"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_sample_config_parses_and_validates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.yaml");
        generate_config_command(path.clone()).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.qr.targets.len(), 3);
        assert_eq!(config.images.max_width, 1200);
    }
}
