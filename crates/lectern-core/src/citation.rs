//! Citation extraction from generated answer text.
//!
//! The prompt template instructs the generation provider to prefix each
//! answer line with the bracketed id of the chunk it draws from (see
//! [`pipeline`](crate::pipeline)). This module is the other half of that
//! contract: it walks the answer line by line, pulls out candidate chunk
//! ids, and resolves them against the store into displayable citations.
//! Lines that cannot be resolved are dropped, not errors.

use crate::chunk::ChunkId;
use crate::error::StoreError;
use crate::store::ChunkStore;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

/// Title used for references that cannot be resolved to a content item.
const UNKNOWN_TITLE: &str = "Unknown Course";

/// First run of digits anywhere in a line: the candidate chunk id.
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits pattern"));

/// Leading bracketed-number prefix, stripped from the citation content.
static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d+\]\s*").expect("valid prefix pattern"));

/// A resolved reference from generated answer text back to a content item.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Citation {
    /// Id of the cited chunk; 0 marks an unresolved reference
    pub id: ChunkId,
    /// Title of the owning content item
    pub title: String,
    /// Answer-line text with the bracketed prefix removed
    pub content: String,
    /// URL of the owning content item, if navigable
    pub view_url: Option<String>,
}

impl Citation {
    fn unresolved(content: String) -> Self {
        Self {
            id: ChunkId::from_u64(0),
            title: UNKNOWN_TITLE.to_string(),
            content,
            view_url: None,
        }
    }

    /// A citation is resolved when it points at a real chunk and carries a
    /// navigable URL.
    pub fn is_resolved(&self) -> bool {
        self.id.as_u64() != 0 && self.view_url.is_some()
    }
}

/// Parses generated answer text into resolved citations.
///
/// Lines are trimmed and blank lines skipped. Each remaining line yields at
/// most one citation: the first run of digits is the candidate chunk id
/// (no digits → unresolved), and a leading `[<digits>]` prefix is stripped
/// from the content. Unresolved references (id 0, unknown chunk, or an
/// owner without a view URL) are filtered from the result.
///
/// # Errors
///
/// Only store transport failures propagate; "row absent" is an unresolved
/// citation, not an error.
#[instrument(skip_all, fields(answer_len = answer.len()))]
pub async fn parse_citations<S>(answer: &str, store: &S) -> Result<Vec<Citation>, StoreError>
where
    S: ChunkStore + ?Sized,
{
    let mut citations = Vec::new();

    for line in answer.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let citation = resolve_line(line, store).await?;
        if citation.is_resolved() {
            citations.push(citation);
        } else {
            debug!(line, "dropping unresolved citation line");
        }
    }

    Ok(citations)
}

async fn resolve_line<S>(line: &str, store: &S) -> Result<Citation, StoreError>
where
    S: ChunkStore + ?Sized,
{
    let content = PREFIX_RE.replace(line, "").into_owned();

    let candidate = DIGITS_RE
        .find(line)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .filter(|&id| id != 0);
    let Some(id) = candidate else {
        return Ok(Citation::unresolved(content));
    };

    let Some(chunk) = store.get_chunk(ChunkId::from_u64(id)).await? else {
        return Ok(Citation::unresolved(content));
    };

    let Some(owner) = store.resolve_owner(&chunk.moduletype, chunk.moduleid).await? else {
        return Ok(Citation::unresolved(content));
    };

    Ok(Citation {
        id: chunk.id,
        title: owner.title,
        content,
        view_url: owner.view_url,
    })
}
