//! Check outcomes and the printed checklist report.

use crate::console;

/// Classification of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// The result of one independent check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub severity: Severity,
    pub message: String,
}

/// A titled group of check outcomes, printed together.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.outcomes.push(CheckOutcome {
            severity: Severity::Success,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.outcomes.push(CheckOutcome {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.outcomes.push(CheckOutcome {
            severity: Severity::Error,
            message: message.into(),
        });
    }
}

/// All sections of one validation run, in declared order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub sections: Vec<Section>,
}

impl ValidationReport {
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    fn count(&self, severity: Severity) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.outcomes.iter())
            .filter(|o| o.severity == severity)
            .count()
    }

    /// Whether any check was classified an error.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Whether any check was classified a warning.
    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }
}

/// Print the report section by section, then the closing banner.
pub fn print_report(report: &ValidationReport) {
    for section in &report.sections {
        console::heading(&section.title);
        for outcome in &section.outcomes {
            match outcome.severity {
                Severity::Success => console::success(&outcome.message),
                Severity::Warning => console::warning(&outcome.message),
                Severity::Error => console::error(&outcome.message),
            }
        }
    }

    println!("\n{}", "=".repeat(50));
    if report.has_errors() {
        console::error("Validation FAILED");
        println!("Fix the errors above before deploying.");
    } else if report.has_warnings() {
        console::warning("Validation passed with warnings");
        println!("Consider addressing the warnings above.");
    } else {
        console::success("All validations passed");
        println!("Project is ready for deployment.");
    }
}
