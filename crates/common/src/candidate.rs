//! Candidate headline records and their fixed three-line text format.
//!
//! ```text
//! 1) Title: <title>
//! Description: <description>
//! URL: <url>
//!
//! 2) Title: ...
//! ```
//!
//! The format is the only channel through which the drafting delegate
//! recovers a source URL, so [`parse_candidates`] must recover exactly what
//! [`render_candidates`] wrote.

use serde::{Deserialize, Serialize};

const TITLE_PREFIX: &str = "Title:";
const DESCRIPTION_PREFIX: &str = "Description:";
const URL_PREFIX: &str = "URL:";

/// One normalized headline/description/URL triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl CandidateRecord {
    /// Build a record, folding line breaks into spaces and trimming each
    /// field so it fits on a single line of the block format.
    pub fn new(
        title: impl AsRef<str>,
        description: impl AsRef<str>,
        url: impl AsRef<str>,
    ) -> Self {
        Self {
            title: single_line(title.as_ref()),
            description: single_line(description.as_ref()),
            url: single_line(url.as_ref()),
        }
    }

    /// Whether the URL looks like something a reader can follow.
    pub fn has_resolvable_url(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Render as a three-line block, optionally with a 1-based `N)` marker.
    pub fn render(&self, index: Option<usize>) -> String {
        let marker = index.map(|i| format!("{i}) ")).unwrap_or_default();
        format!(
            "{marker}{TITLE_PREFIX} {}\n{DESCRIPTION_PREFIX} {}\n{URL_PREFIX} {}",
            self.title, self.description, self.url
        )
    }
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ").trim().to_string()
}

/// Render records as blank-line separated blocks.
pub fn render_candidates(records: &[CandidateRecord], numbered: bool) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.render(numbered.then_some(i + 1)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Recover every complete record from text containing candidate blocks.
///
/// Lines that are not part of a block are skipped, so blocks quoted inside
/// longer prose still parse. A block missing any of its three fields is
/// dropped.
pub fn parse_candidates(text: &str) -> Vec<CandidateRecord> {
    let mut records = Vec::new();
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = strip_index_marker(line).strip_prefix(TITLE_PREFIX) {
            title = Some(value.trim().to_string());
            description = None;
        } else if let Some(value) = line.strip_prefix(DESCRIPTION_PREFIX) {
            if title.is_some() {
                description = Some(value.trim().to_string());
            }
        } else if let Some(value) = line.strip_prefix(URL_PREFIX) {
            if let (Some(t), Some(d)) = (title.take(), description.take()) {
                records.push(CandidateRecord {
                    title: t,
                    description: d,
                    url: value.trim().to_string(),
                });
            }
        }
    }

    records
}

/// Strip a leading `N) ` list marker, if present.
fn strip_index_marker(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix(')') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(n: usize) -> CandidateRecord {
        CandidateRecord::new(
            format!("Headline {n}"),
            format!("Description {n}"),
            format!("https://news.example.com/{n}"),
        )
    }

    #[test]
    fn renders_numbered_blocks() {
        let text = render_candidates(&[sample(1), sample(2)], true);
        assert_eq!(
            text,
            "1) Title: Headline 1\nDescription: Description 1\nURL: https://news.example.com/1\n\n\
             2) Title: Headline 2\nDescription: Description 2\nURL: https://news.example.com/2"
        );
    }

    #[test]
    fn renders_unnumbered_blocks() {
        let text = render_candidates(&[sample(1)], false);
        assert!(text.starts_with("Title: Headline 1\n"));
    }

    #[test]
    fn new_folds_line_breaks() {
        let record = CandidateRecord::new(" Two\nlines ", "a\r\nb", "https://x.test ");
        assert_eq!(record.title, "Two lines");
        assert_eq!(record.description, "a  b");
        assert_eq!(record.url, "https://x.test");
    }

    #[test]
    fn parses_blocks_embedded_in_prose() {
        let text = format!(
            "Here are today's headlines:\n\n{}\n\nWhich one would you like?",
            render_candidates(&[sample(1), sample(2), sample(3)], true)
        );
        let parsed = parse_candidates(&text);
        assert_eq!(parsed, vec![sample(1), sample(2), sample(3)]);
    }

    #[test]
    fn incomplete_block_is_dropped() {
        let text = "Title: Lonely\nURL: https://x.test\n\nTitle: Whole\nDescription: d\nURL: u";
        let parsed = parse_candidates(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Whole");
    }

    #[test]
    fn resolvable_url_requires_http_scheme() {
        assert!(sample(1).has_resolvable_url());
        assert!(!CandidateRecord::new("t", "d", "[No URL]").has_resolvable_url());
        assert!(!CandidateRecord::new("t", "d", "").has_resolvable_url());
    }

    proptest! {
        #[test]
        fn render_then_parse_recovers_records(
            fields in prop::collection::vec((".{0,40}", ".{0,80}", ".{0,40}"), 0..6),
            numbered in any::<bool>(),
        ) {
            let records: Vec<CandidateRecord> = fields
                .iter()
                .map(|(t, d, u)| CandidateRecord::new(t, d, u))
                .collect();
            let parsed = parse_candidates(&render_candidates(&records, numbered));
            prop_assert_eq!(parsed, records);
        }
    }
}
