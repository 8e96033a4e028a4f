use super::document::{Chunk, Document};
use super::error::KnowledgeError;

/// Splits text into spans of `chunk_size` characters, each starting
/// `chunk_size - chunk_overlap` characters after the previous one.
///
/// Sizes count Unicode scalar values, so spans never cut a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, KnowledgeError> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(KnowledgeError::InvalidChunking {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.content)
            .into_iter()
            .enumerate()
            .map(|(index, content)| {
                let mut metadata = document.metadata.clone();
                metadata.insert("chunk_index".to_string(), index.into());
                Chunk {
                    id: format!("{}_{index}", document.id),
                    document_id: document.id.clone(),
                    index,
                    content: content.to_string(),
                    metadata,
                }
            })
            .collect()
    }

    /// Character-aligned spans of `text`. Empty text yields no spans.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let chars = bounds.len() - 1;
        let step = self.chunk_size - self.chunk_overlap;

        let mut spans = Vec::new();
        let mut start = 0;
        while start < chars {
            let end = (start + self.chunk_size).min(chars);
            spans.push(&text[bounds[start]..bounds[end]]);
            if end == chars {
                break;
            }
            start += step;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(spans: &[&str], overlap: usize) -> String {
        let mut text = String::new();
        for (i, span) in spans.iter().enumerate() {
            if i == 0 {
                text.push_str(span);
            } else {
                text.extend(span.chars().skip(overlap));
            }
        }
        text
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        assert!(FixedSizeChunker::new(10, 10).is_err());
        assert!(FixedSizeChunker::new(0, 0).is_err());
        assert!(FixedSizeChunker::new(10, 9).is_ok());
    }

    #[test]
    fn empty_text_has_no_chunks() {
        let chunker = FixedSizeChunker::new(5, 2).expect("chunker");
        assert!(chunker.chunk(&Document::new("empty", "")).is_empty());
    }

    #[test]
    fn spans_overlap_by_a_constant_and_reassemble() {
        let chunker = FixedSizeChunker::new(7, 3).expect("chunker");
        let text = "The fireworks begin at ten o'clock sharp over the lake.";

        let spans = chunker.split(text);

        assert!(spans.len() > 2);
        for pair in spans.windows(2) {
            let tail: String = pair[0].chars().skip(7 - 3).collect();
            let head: String = pair[1].chars().take(3).collect();
            assert_eq!(tail, head);
        }
        for span in &spans[..spans.len() - 1] {
            assert_eq!(span.chars().count(), 7);
        }
        assert_eq!(reassemble(&spans, 3), text);
    }

    #[test]
    fn multibyte_text_is_split_on_characters() {
        let chunker = FixedSizeChunker::new(4, 1).expect("chunker");
        let text = "Crème brûlée à la carte";

        let spans = chunker.split(text);

        assert_eq!(spans[0], "Crèm");
        assert_eq!(reassemble(&spans, 1), text);
    }

    #[test]
    fn chunks_inherit_metadata_and_are_numbered() {
        let chunker = FixedSizeChunker::new(4, 1).expect("chunker");
        let document = Document::new("menu.md", "abcdefghij").with_metadata("kind", "menu");

        let chunks = chunker.chunk(&document);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].id, "menu.md_1");
        assert_eq!(chunks[1].document_id, "menu.md");
        assert_eq!(chunks[2].content, "ghij");
        assert_eq!(chunks[2].metadata["chunk_index"].to_string(), "2");
        assert_eq!(chunks[2].metadata["kind"].to_string(), "menu");
    }
}
