//! Adapter-neutral document shape.
//!
//! Format backends reduce their input to this structure — tables of rows of
//! trimmed cell texts, plus paragraph-like text blocks — so the extraction
//! heuristics never depend on a particular parsing library.

/// One table: a sequence of rows, each a sequence of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    /// Rows in document order; cells in left-to-right order.
    pub rows: Vec<Vec<String>>,
}

/// A parsed document, reduced to what the extractors need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStructure {
    /// Tables in document order.
    pub tables: Vec<TableBlock>,
    /// Paragraph blocks outside of tables, in document order.
    pub paragraphs: Vec<String>,
}

impl DocumentStructure {
    /// True when the document carries neither tables nor paragraphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.paragraphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(DocumentStructure::default().is_empty());

        let with_table = DocumentStructure {
            tables: vec![TableBlock { rows: vec![] }],
            paragraphs: vec![],
        };
        assert!(!with_table.is_empty());

        let with_paragraph = DocumentStructure {
            tables: vec![],
            paragraphs: vec!["نص".to_string()],
        };
        assert!(!with_paragraph.is_empty());
    }
}
