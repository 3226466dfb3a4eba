//! Completion table and screenshot list rendering.

use url::Url;

use crate::completion::{Completion, CompletionTable};
use crate::screenshots::{Screenshot, ScreenshotIndex};

/// Hostname of Google Custom Search engines.
pub const CUSTOM_SEARCH_HOST: &str = "cse.google.com";

/// Label shown instead of [`CUSTOM_SEARCH_HOST`].
pub const CUSTOM_SEARCH_LABEL: &str = "Google Custom Search";

/// Rendered README sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    /// Markdown table rows, one per completion
    pub table: String,

    /// Expanded screenshot headings and images
    pub screenshots: String,
}

impl Sections {
    fn append(mut self, other: Sections) -> Self {
        self.table.push_str(&other.table);
        self.screenshots.push_str(&other.screenshots);
        self
    }
}

/// Errors that can occur when rendering the completion table.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid search URL for completion '{key}': {url}: {message}")]
    InvalidSearchUrl {
        key: String,
        url: String,
        message: String,
    },
}

/// Render the completion table and screenshot list.
///
/// Rows follow the table's key order. Screenshots are looked up by each
/// completion's `alias` field, which may differ from its table key.
pub fn render_sections(
    completions: &CompletionTable,
    screenshots: &ScreenshotIndex,
) -> Result<Sections, RenderError> {
    completions
        .iter()
        .try_fold(Sections::default(), |acc, (key, completion)| {
            let domain =
                display_domain(&completion.search).map_err(|e| RenderError::InvalidSearchUrl {
                    key: key.to_string(),
                    url: completion.search.clone(),
                    message: e.to_string(),
                })?;

            let entry = render_entry(completion, &domain, screenshots.group(&completion.alias));
            Ok(acc.append(entry))
        })
}

/// Domain label shown for a search URL.
pub fn display_domain(search: &str) -> Result<String, url::ParseError> {
    let url = Url::parse(search)?;
    let host = url.host_str().unwrap_or_default();

    if host == CUSTOM_SEARCH_HOST {
        Ok(CUSTOM_SEARCH_LABEL.to_string())
    } else {
        Ok(host.to_string())
    }
}

/// Heading suffix for the screenshot at `index`: "" for the first, " 2" for
/// the second and so on.
fn ordinal_suffix(index: usize) -> String {
    if index > 0 {
        format!(" {}", index + 1)
    } else {
        String::new()
    }
}

fn render_entry(completion: &Completion, domain: &str, shots: &[Screenshot]) -> Sections {
    let name = &completion.name;

    let (cells, list) = shots.iter().enumerate().fold(
        (String::new(), String::new()),
        |(mut cells, mut list), (i, shot)| {
            let num = ordinal_suffix(i);
            cells.push_str(&format!(
                "[:framed_picture:](#{}{}) ",
                name,
                num.replace(' ', "-")
            ));
            list.push_str(&format!("##### {}{}\n", name, num));
            list.push_str(&format!("![{} screenshot](./{})\n\n", name, shot.link));
            (cells, list)
        },
    );

    Sections {
        table: format!(
            "| `{}` | `{}` | `{}` | {} |\n",
            completion.alias, name, domain, cells
        ),
        screenshots: list,
    }
}
