//! Identifier and module-header recognition within one file's text.

use regex::Regex;

use crate::error::DriftError;

/// Context assigned to occurrences that precede every module header.
pub const GLOBAL_CONTEXT: &str = "Global/Intro";

const GUIDELINE_PATTERN: &str = r"WSG-\d+\.\d+";
const TECHNIQUE_PATTERN: &str = r"STAR-[A-Z0-9]+-\d+|[A-Z]{2,}\d{2}-\d+";
const MODULE_HEADER_PATTERN: &str = r"(?m)^##\s+([A-Z]{3}-\d+):";

/// One identifier found in a file, with every distinct section it appears under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHit {
    /// The identifier text.
    pub id: String,
    /// Distinct contexts in first-seen order.
    pub contexts: Vec<String>,
}

/// A module header and its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    offset: usize,
    module: String,
}

/// Compiled identifier and header patterns.
///
/// Built once per analysis run and passed to the indexer.
#[derive(Debug, Clone)]
pub struct IdentifierScanner {
    guideline: Regex,
    technique: Regex,
    module_header: Regex,
}

impl IdentifierScanner {
    /// Compiles the guideline, technique, and module-header patterns.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, DriftError> {
        Ok(Self {
            guideline: Regex::new(GUIDELINE_PATTERN)?,
            technique: Regex::new(TECHNIQUE_PATTERN)?,
            module_header: Regex::new(MODULE_HEADER_PATTERN)?,
        })
    }

    /// Finds every identifier in `content` and the module context of each occurrence.
    ///
    /// The two identifier patterns run independently over the whole text.
    /// Repeated occurrences collapse into one [`FileHit`] per identifier whose
    /// contexts are the distinct sections touched. Hits are ordered by first
    /// occurrence.
    #[must_use]
    pub fn scan(&self, content: &str) -> Vec<FileHit> {
        let headers = self.headers(content);

        let mut matches: Vec<(usize, &str)> = self
            .guideline
            .find_iter(content)
            .chain(self.technique.find_iter(content))
            .map(|m| (m.start(), m.as_str()))
            .collect();
        matches.sort_by_key(|(offset, _)| *offset);

        let mut hits: Vec<FileHit> = Vec::new();
        for (offset, id) in matches {
            let context = context_at(&headers, offset);
            match hits.iter_mut().find(|hit| hit.id == id) {
                Some(hit) => {
                    if !hit.contexts.iter().any(|c| c == context) {
                        hit.contexts.push(context.to_string());
                    }
                }
                None => {
                    hits.push(FileHit { id: id.to_string(), contexts: vec![context.to_string()] });
                }
            }
        }
        hits
    }

    fn headers(&self, content: &str) -> Vec<Header> {
        self.module_header
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let module = caps.get(1)?;
                Some(Header { offset: whole.start(), module: module.as_str().to_string() })
            })
            .collect()
    }
}

/// Module of the last header strictly before `offset`, or [`GLOBAL_CONTEXT`].
///
/// `headers` is in file order, so offsets are ascending.
fn context_at(headers: &[Header], offset: usize) -> &str {
    let preceding = headers.partition_point(|h| h.offset < offset);
    match preceding {
        0 => GLOBAL_CONTEXT,
        n => &headers[n - 1].module,
    }
}
