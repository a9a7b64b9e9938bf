//! The individual checklist predicates.
//!
//! Every check is independent: it inspects the filesystem or file contents,
//! appends classified outcomes to its section, and never consults another
//! check's result.

use crate::config::{Config, ImagesConfig, ValidationConfig};
use crate::validate::report::{Section, ValidationReport};
use anyhow::Result;
use regex::Regex;
use std::path::Path;

/// Run every check against `root` in declared order.
pub fn run_validation(root: &Path, config: &Config) -> Result<ValidationReport> {
    let frontmatter_title = Regex::new(r"(?m)^---\s*\ntitle:")?;
    let placeholder = Regex::new(r"\[[^\]]*\]")?;

    let mut report = ValidationReport::default();
    report.push(check_build_output(root, &config.validation));
    report.push(check_content_files(
        root,
        &config.validation,
        &frontmatter_title,
        &placeholder,
    ));
    report.push(check_site_config(root, &config.validation));
    report.push(check_images(root, &config.images));
    report.push(check_manifest(root, &config.validation));
    report.push(check_workflows(root, &config.validation));
    Ok(report)
}

fn check_build_output(root: &Path, config: &ValidationConfig) -> Section {
    let mut section = Section::new("Checking build output");
    for file in &config.build_files {
        if root.join(file).is_file() {
            section.success(format!("Found {}", file.display()));
        } else {
            section.error(format!(
                "Missing {} - run the site build first",
                file.display()
            ));
        }
    }
    section
}

fn check_content_files(
    root: &Path,
    config: &ValidationConfig,
    frontmatter_title: &Regex,
    placeholder: &Regex,
) -> Section {
    let mut section = Section::new("Validating content files");
    for content in &config.content_files {
        let path = root.join(&content.path);
        let language = &content.language;

        if !path.is_file() {
            section.error(format!(
                "Missing {language} content file: {}",
                content.path.display()
            ));
            continue;
        }
        section.success(format!("Found {language} content file"));

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                section.error(format!("{language} content is unreadable: {err}"));
                continue;
            }
        };

        if frontmatter_title.is_match(&text) {
            section.success(format!("{language} content has valid frontmatter"));
        } else {
            section.error(format!("{language} content missing 'title' in frontmatter"));
        }

        let placeholders = placeholder.find_iter(&text).count();
        if placeholders > 0 {
            section.warning(format!(
                "{language} content has {placeholders} unfilled placeholder(s)"
            ));
        } else {
            section.success(format!("{language} content has no placeholders"));
        }

        if config
            .required_sections
            .iter()
            .any(|heading| text.contains(heading))
        {
            section.success(format!("{language} content has emergency contact section"));
        } else {
            section.warning(format!(
                "{language} content might be missing emergency contact section"
            ));
        }
    }
    section
}

fn check_site_config(root: &Path, config: &ValidationConfig) -> Section {
    let mut section = Section::new("Validating configuration");
    let path = root.join(&config.site_config);

    if !path.is_file() {
        section.error(format!("Missing {}", config.site_config.display()));
        return section;
    }
    section.success(format!("Found {}", config.site_config.display()));

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            section.error(format!(
                "{} is unreadable: {err}",
                config.site_config.display()
            ));
            return section;
        }
    };

    if text.contains("site:") && text.contains("base:") {
        section.success("Site and base URL configured");
    } else {
        section.warning("Site or base URL might not be configured");
    }

    if text.contains("i18n:") {
        section.success("i18n configuration found");
    } else {
        section.error("Missing i18n configuration");
    }
    section
}

fn check_images(root: &Path, images: &ImagesConfig) -> Section {
    let mut section = Section::new("Checking images");
    let output_dir = root.join(&images.output_dir);

    if !output_dir.is_dir() {
        section.warning(format!(
            "Output directory {} not found",
            images.output_dir.display()
        ));
        return section;
    }
    section.success(format!(
        "Output directory {} exists",
        images.output_dir.display()
    ));

    if has_optimized_image(&output_dir) {
        section.success("Found optimized image");
    } else {
        section.warning("No optimized images found - run the image pipeline");
    }
    section
}

fn has_optimized_image(output_dir: &Path) -> bool {
    std::fs::read_dir(output_dir)
        .map(|entries| {
            entries.flatten().any(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name.ends_with("-optimized.jpg"))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

fn check_manifest(root: &Path, config: &ValidationConfig) -> Section {
    let mut section = Section::new("Checking dependencies");
    let path = root.join(&config.manifest);

    if !path.is_file() {
        section.error(format!("Missing {}", config.manifest.display()));
        return section;
    }

    let manifest: serde_json::Value = match std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|err| err.to_string()))
    {
        Ok(manifest) => manifest,
        Err(err) => {
            section.error(format!("{} is invalid: {err}", config.manifest.display()));
            return section;
        }
    };

    let dependencies = manifest.get("dependencies");
    for dep in &config.required_dependencies {
        let present = dependencies
            .and_then(|deps| deps.get(dep))
            .is_some();
        if present {
            section.success(format!("Found dependency: {dep}"));
        } else {
            section.error(format!("Missing dependency: {dep}"));
        }
    }

    let scripts = manifest.get("scripts");
    for script in &config.required_scripts {
        let present = scripts.and_then(|s| s.get(script)).is_some();
        if present {
            section.success(format!("Found script: {script}"));
        } else {
            section.warning(format!("Missing script: {script}"));
        }
    }
    section
}

fn check_workflows(root: &Path, config: &ValidationConfig) -> Section {
    let mut section = Section::new("Checking workflows");
    for workflow in &config.workflows {
        if root.join(workflow).is_file() {
            section.success(format!("Found {}", workflow.display()));
        } else {
            section.warning(format!("Missing {}", workflow.display()));
        }
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::validate::report::Severity;
    use std::path::Path;
    use tempfile::TempDir;

    const VALID_CONTENT: &str = "---\ntitle: Ruby\n---\n\n## Emergency Contacts\n\nCall us.\n";
    const VALID_MANIFEST: &str = r#"{
        "dependencies": {
            "astro": "^4.0.0",
            "@astrojs/tailwind": "^5.0.0",
            "tailwindcss": "^3.0.0",
            "sharp": "^0.33.0"
        },
        "scripts": {
            "dev": "astro dev",
            "build": "astro build",
            "preview": "astro preview",
            "validate": "site-assets validate"
        }
    }"#;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn valid_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "dist/index.html", "<html></html>");
        write(root, "dist/en/index.html", "<html></html>");
        write(root, "dist/de/index.html", "<html></html>");
        write(root, "src/content/ruby/en.md", VALID_CONTENT);
        write(
            root,
            "src/content/ruby/de.md",
            "---\ntitle: Ruby\n---\n\n## Notfallkontakte\n\nRuf uns an.\n",
        );
        write(
            root,
            "astro.config.mjs",
            "export default { site: 'x', base: 'y', i18n: {} }",
        );
        write(root, "public/ruby-photo-optimized.jpg", "jpeg");
        write(root, "package.json", VALID_MANIFEST);
        write(root, ".github/workflows/deploy.yml", "on: push");
        write(root, ".github/workflows/validate.yml", "on: push");
        write(root, ".github/workflows/optimize-images.yml", "on: push");
        dir
    }

    fn severities(report: &ValidationReport) -> (usize, usize) {
        let outcomes: Vec<_> = report
            .sections
            .iter()
            .flat_map(|s| s.outcomes.iter())
            .collect();
        (
            outcomes
                .iter()
                .filter(|o| o.severity == Severity::Error)
                .count(),
            outcomes
                .iter()
                .filter(|o| o.severity == Severity::Warning)
                .count(),
        )
    }

    #[test]
    fn test_valid_project_has_no_errors_or_warnings() {
        let dir = valid_project();
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        let (errors, warnings) = severities(&report);
        assert_eq!(errors, 0, "unexpected errors: {report:?}");
        assert_eq!(warnings, 0, "unexpected warnings: {report:?}");
    }

    #[test]
    fn test_missing_frontmatter_title_is_an_error() {
        let dir = valid_project();
        write(
            dir.path(),
            "src/content/ruby/en.md",
            "## Emergency Contacts\n\nNo frontmatter here.\n",
        );
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(report.has_errors());
        let messages: Vec<_> = report
            .sections
            .iter()
            .flat_map(|s| s.outcomes.iter())
            .filter(|o| o.severity == Severity::Error)
            .map(|o| o.message.clone())
            .collect();
        assert!(messages
            .iter()
            .any(|m| m.contains("missing 'title' in frontmatter")));
    }

    #[test]
    fn test_placeholder_is_a_warning_not_an_error() {
        let dir = valid_project();
        write(
            dir.path(),
            "src/content/ruby/en.md",
            "---\ntitle: Ruby\n---\n\n## Emergency Contacts\n\nCall [PHONE NUMBER].\n",
        );
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(!report.has_errors());
        assert!(report.has_warnings());
        let warning = report
            .sections
            .iter()
            .flat_map(|s| s.outcomes.iter())
            .find(|o| o.severity == Severity::Warning)
            .unwrap();
        assert!(warning.message.contains("1 unfilled placeholder"));
    }

    #[test]
    fn test_missing_build_output_is_an_error() {
        let dir = valid_project();
        std::fs::remove_file(dir.path().join("dist/de/index.html")).unwrap();
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(report.has_errors());
    }

    #[test]
    fn test_missing_i18n_config_is_an_error() {
        let dir = valid_project();
        write(
            dir.path(),
            "astro.config.mjs",
            "export default { site: 'x', base: 'y' }",
        );
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(report.has_errors());
    }

    #[test]
    fn test_missing_dependency_is_an_error_missing_script_a_warning() {
        let dir = valid_project();
        write(
            dir.path(),
            "package.json",
            r#"{
                "dependencies": {
                    "astro": "^4.0.0",
                    "@astrojs/tailwind": "^5.0.0",
                    "tailwindcss": "^3.0.0"
                },
                "scripts": { "dev": "astro dev", "build": "astro build", "preview": "astro preview" }
            }"#,
        );
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(report.has_errors());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_missing_workflow_is_a_warning() {
        let dir = valid_project();
        std::fs::remove_file(dir.path().join(".github/workflows/validate.yml")).unwrap();
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_missing_content_file_is_an_error() {
        let dir = valid_project();
        std::fs::remove_file(dir.path().join("src/content/ruby/de.md")).unwrap();
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(report.has_errors());
    }

    #[test]
    fn test_missing_section_string_is_a_warning() {
        let dir = valid_project();
        write(
            dir.path(),
            "src/content/ruby/en.md",
            "---\ntitle: Ruby\n---\n\nJust a bio, no contact info.\n",
        );
        let report = run_validation(dir.path(), &Config::default()).unwrap();
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }
}
