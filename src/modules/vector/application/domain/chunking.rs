//! Chunking rule for index population (spec §4.5): concatenate all
//! text-bearing blocks with double-newline separators, split into chunks of
//! ~1,000 characters with ~100-character overlap, preferring (in order)
//! sentence terminators, paragraph breaks, or whitespace as cut points, and
//! cap at 50 chunks per session.

pub const CHUNK_TARGET_CHARS: usize = 1_000;
pub const CHUNK_OVERLAP_CHARS: usize = 100;
pub const MAX_CHUNKS_PER_SESSION: usize = 50;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

pub fn concatenate(texts: &[String]) -> String {
    texts.iter().filter(|t| !t.is_empty()).cloned().collect::<Vec<_>>().join("\n\n")
}

/// Splits `text` into overlapping chunks, capping at `MAX_CHUNKS_PER_SESSION`
/// and logging a warning if the input would have produced more.
pub fn chunk(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        let target_end = (start + CHUNK_TARGET_CHARS).min(chars.len());
        let end = if target_end == chars.len() {
            target_end
        } else {
            find_cut_point(&chars, start, target_end)
        };

        let chunk_text: String = chars[start..end].iter().collect();
        let trimmed = chunk_text.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        if end >= chars.len() {
            break;
        }

        start = end.saturating_sub(CHUNK_OVERLAP_CHARS).max(start + 1);
    }

    if chunks.len() > MAX_CHUNKS_PER_SESSION {
        tracing::warn!(
            chunk_count = chunks.len(),
            cap = MAX_CHUNKS_PER_SESSION,
            "session text produced more chunks than the cap; truncating"
        );
        chunks.truncate(MAX_CHUNKS_PER_SESSION);
    }

    chunks
}

/// Looks backward from `preferred_end` for a sentence terminator, then a
/// paragraph break, then whitespace, falling back to the hard cut if none
/// are found in the search window.
fn find_cut_point(chars: &[char], start: usize, preferred_end: usize) -> usize {
    let window_start = start + CHUNK_TARGET_CHARS / 2;

    for i in (window_start..preferred_end).rev() {
        if SENTENCE_TERMINATORS.contains(&chars[i]) {
            return i + 1;
        }
    }

    for i in (window_start..preferred_end.saturating_sub(1)).rev() {
        if chars[i] == '\n' && chars[i + 1] == '\n' {
            return i + 2;
        }
    }

    for i in (window_start..preferred_end).rev() {
        if chars[i].is_whitespace() {
            return i + 1;
        }
    }

    preferred_end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_yields_one_chunk() {
        let chunks = chunk("a short paragraph of text.");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk("").is_empty());
    }

    #[test]
    fn long_text_is_split_with_overlap() {
        let sentence = "This is one sentence. ";
        let text = sentence.repeat(200);
        let chunks = chunk(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.len() <= MAX_CHUNKS_PER_SESSION);
    }

    #[test]
    fn pathological_input_is_capped_at_fifty_chunks() {
        let text = "word ".repeat(100_000);
        let chunks = chunk(&text);
        assert_eq!(chunks.len(), MAX_CHUNKS_PER_SESSION);
    }

    #[test]
    fn concatenate_joins_with_double_newline() {
        let joined = concatenate(&["a".to_string(), "b".to_string()]);
        assert_eq!(joined, "a\n\nb");
    }
}
