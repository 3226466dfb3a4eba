//! README template placeholders.

use std::collections::HashMap;
use std::sync::LazyLock;

use minijinja::{context, Environment};
use regex::Regex;

/// Placeholders recognised in the README template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Generated-file notice
    Disclaimer,
    /// Number of completions
    Count,
    /// Completion table rows
    Table,
    /// Screenshot list
    Screenshots,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Disclaimer,
        Placeholder::Count,
        Placeholder::Table,
        Placeholder::Screenshots,
    ];

    /// Name used inside the marker.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Disclaimer => "DISCLAIMER",
            Placeholder::Count => "COMPL_COUNT",
            Placeholder::Table => "COMPL_TABLE",
            Placeholder::Screenshots => "SCREENSHOTS",
        }
    }

    /// Literal marker text, e.g. `<!--{{DISCLAIMER}}-->`.
    pub fn marker(self) -> String {
        format!("<!--{{{{{}}}}}-->", self.name())
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\{\{([A-Z0-9_]+)\}\}-->").expect("valid marker regex"));

/// Marker problems found in a template. None of them stop generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerReport {
    /// Known placeholders absent from the template
    pub missing: Vec<Placeholder>,
    /// Known placeholders appearing more than once
    pub duplicated: Vec<Placeholder>,
    /// Marker names that are not recognised
    pub unknown: Vec<String>,
}

impl MarkerReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.unknown.is_empty()
    }
}

/// Scan a template for placeholder markers.
pub fn scan_markers(template: &str) -> MarkerReport {
    let mut counts: HashMap<Placeholder, usize> = HashMap::new();
    let mut unknown = Vec::new();

    for caps in MARKER_RE.captures_iter(template) {
        let name = &caps[1];
        match Placeholder::from_name(name) {
            Some(p) => *counts.entry(p).or_default() += 1,
            None => {
                if !unknown.iter().any(|u| u == name) {
                    unknown.push(name.to_string());
                }
            }
        }
    }

    let count_of = |p: &Placeholder| counts.get(p).copied().unwrap_or(0);

    MarkerReport {
        missing: Placeholder::ALL
            .into_iter()
            .filter(|p| count_of(p) == 0)
            .collect(),
        duplicated: Placeholder::ALL
            .into_iter()
            .filter(|p| count_of(p) > 1)
            .collect(),
        unknown,
    }
}

/// Replace every occurrence of each placeholder marker with its value.
///
/// Markers missing from the template are skipped.
pub fn substitute(template: &str, values: &[(Placeholder, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(&placeholder.marker(), value)
        })
}

/// Render the notice injected at the top of the generated README.
pub fn render_disclaimer(source: &str) -> Result<String, minijinja::Error> {
    let env = Environment::new();
    env.render_str(DISCLAIMER_TEMPLATE, context! { source => source })
}

const DISCLAIMER_TEMPLATE: &str = r#"<!--

NOTICE:
This is an automatically generated file - Do not edit it directly.
The source file is {{ source }}

-->"#;
