//! Printable HTML sheet referencing the print-resolution renditions.

use crate::config::Config;
use crate::qr::targets::QrTarget;
use anyhow::{Context, Result};
use std::path::PathBuf;

const SHEET_FILENAME: &str = "printable.html";

const SHEET_STYLE: &str = r#"    @media print {
      @page { margin: 0.5in; size: letter; }
      .no-print { display: none; }
    }
    body {
      font-family: Arial, sans-serif;
      max-width: 8.5in;
      margin: 0 auto;
      padding: 20px;
    }
    .container {
      text-align: center;
      page-break-after: always;
    }
    .qr-section {
      border: 2px dashed #ccc;
      padding: 20px;
      margin: 20px 0;
      background: #f9f9f9;
    }
    h1 {
      color: #333;
      margin-bottom: 10px;
    }
    .url {
      font-family: monospace;
      color: #666;
      font-size: 14px;
      margin: 10px 0;
    }
    .instructions {
      background: #e3f2fd;
      border-left: 4px solid #2196f3;
      padding: 15px;
      margin: 20px 0;
      text-align: left;
    }
    .dog-emoji {
      font-size: 48px;
      margin: 20px 0;
    }
    img {
      max-width: 300px;
      height: auto;
    }
    .tag-size {
      border: 2px solid #f44336;
      padding: 20px;
      margin: 20px auto;
      max-width: 2in;
      background: white;
    }
    .tag-size img {
      max-width: 100%;
    }
    .tag-text {
      font-size: 10px;
      font-weight: bold;
      margin-top: 5px;
    }"#;

/// Write the printable sheet into the QR output directory and return its
/// path. The sheet hard-codes `<img>` references to the print renditions of
/// the given targets; it does not verify that those files exist.
pub fn write_printable_sheet(config: &Config, targets: &[QrTarget]) -> Result<PathBuf> {
    let path = config.qr.output_dir.join(SHEET_FILENAME);
    let html = render_sheet(&config.qr.file_prefix, targets);
    std::fs::write(&path, html)
        .with_context(|| format!("failed to write printable sheet {}", path.display()))?;
    tracing::info!("printable sheet written to {}", path.display());
    Ok(path)
}

fn render_sheet(prefix: &str, targets: &[QrTarget]) -> String {
    let mut sections = String::new();
    for target in targets {
        sections.push_str(&format!(
            r#"    <div class="qr-section">
      <h2>{label}</h2>
      <img src="{prefix}-{name}-print.png" alt="QR Code - {label}" />
      <p class="url">{url}</p>
    </div>
"#,
            label = target.label,
            name = target.name,
            url = target.url,
        ));
    }

    // The collar tag uses the auto-redirect code when present.
    let tag_target = targets
        .iter()
        .find(|t| t.name == "root")
        .or_else(|| targets.first());
    let tag_block = match tag_target {
        Some(target) => format!(
            r#"    <div style="page-break-before: always;">
      <h2 class="no-print">✂️ Cut Here - Collar Tag</h2>
      <div class="tag-size">
        <img src="{prefix}-{name}-print.png" alt="Ruby QR Code" />
        <div class="tag-text">
          SCAN ME<br>
          IF FOUND<br>
          🐩 Ruby
        </div>
      </div>
      <p class="no-print" style="color: #666; font-size: 12px;">
        Suggested: Print on cardstock, laminate, and attach to collar with a split ring
      </p>
    </div>
"#,
            name = target.name,
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Ruby's QR Codes - Printable</title>
  <style>
{SHEET_STYLE}
  </style>
</head>
<body>
  <div class="container">
    <div class="dog-emoji">🐩</div>
    <h1>Ruby's Profile Page - QR Codes</h1>
    <p>Scan to view Ruby's emergency contact information</p>

    <div class="instructions no-print">
      <strong>Instructions:</strong>
      <ul>
        <li>Print this page (Ctrl/Cmd + P)</li>
        <li>Cut out the collar tag section below</li>
        <li>Laminate or use clear tape to protect</li>
        <li>Attach to Ruby's collar or ID tag</li>
      </ul>
    </div>

{sections}
{tag_block}  </div>
</body>
</html>
"#
    )
}
