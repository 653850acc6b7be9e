//! Image reference extraction from comment bodies.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::entities::AttachmentReference;

static MD_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\]]*\]\((https?://[^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap()
});

static HTML_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"(https?://[^"]+)"|'(https?://[^']+)')[^>]*>"#)
        .unwrap()
});

static QUOTED_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).unwrap());

static EXCLUDE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s(?:data-)?exclude\b").unwrap());

/// Cleaned body and the image references removed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Body with accepted references (and their trailing line break) removed.
    pub body: String,
    /// Accepted references in order of appearance.
    pub references: Vec<AttachmentReference>,
}

impl Extraction {
    /// Returns the referenced locators in order of appearance.
    pub fn locators(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.locator.as_str())
    }
}

#[derive(Debug)]
struct Candidate {
    start: usize,
    end: usize,
    locator: String,
    excluded: bool,
}

/// Extractor for image references in comment bodies.
pub struct AttachmentExtractor;

impl AttachmentExtractor {
    /// Finds markdown and HTML image references in `body` and removes them.
    ///
    /// A reference with a backtick directly before or after it is treated as
    /// code, and its locator is then ignored everywhere in the body. `<img>`
    /// tags carrying an `exclude` or `data-exclude` attribute are left alone.
    #[must_use]
    pub fn extract(body: &str) -> Extraction {
        if !body.contains("http") {
            return Extraction {
                body: body.trim().to_string(),
                references: Vec::new(),
            };
        }

        let mut candidates = Self::candidates(body);
        candidates.sort_by_key(|c| c.start);

        let code_quoted: HashSet<&str> = candidates
            .iter()
            .filter(|c| Self::is_code_quoted(body, c.start, c.end))
            .map(|c| c.locator.as_str())
            .collect();

        let mut cleaned = String::with_capacity(body.len());
        let mut references = Vec::new();
        let mut cursor = 0;

        for candidate in &candidates {
            if candidate.start < cursor
                || candidate.excluded
                || code_quoted.contains(candidate.locator.as_str())
            {
                trace!(locator = %candidate.locator, "Skipping image reference");
                continue;
            }

            cleaned.push_str(&body[cursor..candidate.start]);
            references.push(AttachmentReference::new(
                &body[candidate.start..candidate.end],
                candidate.locator.clone(),
            ));
            cursor = Self::skip_line_break(body, candidate.end);
        }
        cleaned.push_str(&body[cursor..]);

        Extraction {
            body: cleaned.trim().to_string(),
            references,
        }
    }

    fn candidates(body: &str) -> Vec<Candidate> {
        let markdown = MD_IMAGE_RE.captures_iter(body).filter_map(|cap| {
            let whole = cap.get(0)?;
            Some(Candidate {
                start: whole.start(),
                end: whole.end(),
                locator: cap.get(1)?.as_str().to_string(),
                excluded: false,
            })
        });

        let html = HTML_IMAGE_RE.captures_iter(body).filter_map(|cap| {
            let whole = cap.get(0)?;
            let locator = cap.get(1).or_else(|| cap.get(2))?;
            Some(Candidate {
                start: whole.start(),
                end: whole.end(),
                locator: locator.as_str().to_string(),
                excluded: Self::has_exclude_attr(whole.as_str()),
            })
        });

        markdown.chain(html).collect()
    }

    fn is_code_quoted(body: &str, start: usize, end: usize) -> bool {
        body[..start].ends_with('`') || body[end..].starts_with('`')
    }

    fn has_exclude_attr(tag: &str) -> bool {
        let unquoted = QUOTED_ATTR_RE.replace_all(tag, "\"\"");
        EXCLUDE_ATTR_RE.is_match(&unquoted)
    }

    fn skip_line_break(body: &str, end: usize) -> usize {
        let rest = &body[end..];
        if rest.starts_with("\r\n") {
            end + 2
        } else if rest.starts_with('\n') {
            end + 1
        } else {
            end
        }
    }
}
