//! Build-time asset pipelines for a bilingual pet-profile site.
//!
//! Two sequential batch pipelines plus a deployment checklist, all driven by
//! one configuration:
//!
//! - **QR**: Encode each configured page URL into SVG, web PNG, and print
//!   PNG renditions, plus a printable HTML sheet
//! - **Images**: Discover raw images and re-encode each as a width-capped
//!   JPEG, reporting compression ratios
//! - **Validation**: Independent success/warning/error checks against the
//!   project tree before deployment
//!
//! Both pipelines share one shape: enumerate work items, transform each item
//! independently, fold the outcomes into a summary. A failing item is
//! recorded and counted; it never aborts the batch.
//!
//! # Usage
//!
//! ```no_run
//! use site_assets::{generate_qr_codes, optimize_images, Config};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     let qr = generate_qr_codes(&config)?;
//!     let images = optimize_images(&config)?;
//!     println!("qr: {} / images: {}", qr.summary, images.summary);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod images;
pub mod qr;
pub mod report;
pub mod validate;

pub use config::Config;
pub use images::{optimize_images, ImageRunReport};
pub use qr::{generate_qr_codes, QrRunReport};
pub use report::{ItemOutcome, RunSummary};
pub use validate::{run_validation, ValidationReport};
