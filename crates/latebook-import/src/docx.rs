//! Word-processor backend: ZIP + streaming XML walk.
//!
//! DOCX files are ZIP archives; the content lives in `word/document.xml`.
//! The walk reduces the document to a [`DocumentStructure`]: `w:tbl` /
//! `w:tr` / `w:tc` elements build the table model (cell text is the
//! concatenation of the cell's `w:t` runs), paragraphs outside tables
//! become text blocks. Table extraction runs first; the free-text fallback
//! runs only when no table yielded a candidate.

use crate::freetext::extract_paragraphs;
use crate::table::extract_tables;
use crate::traits::RosterBackend;
use latebook_core::{DocumentStructure, InputFormat, LatebookError, Result, Student, TableBlock};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Backend for word-processor rosters (.docx).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new word-processor backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse document bytes into the adapter-neutral structure.
    ///
    /// # Errors
    /// Returns `MalformedDocument` when the archive or its XML cannot be
    /// read.
    pub fn read_structure(data: &[u8]) -> Result<DocumentStructure> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            LatebookError::MalformedDocument(format!("not a DOCX archive: {e}"))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                LatebookError::MalformedDocument(format!("missing word/document.xml: {e}"))
            })?
            .read_to_string(&mut xml)
            .map_err(|e| {
                LatebookError::MalformedDocument(format!("unreadable document.xml: {e}"))
            })?;

        Self::walk_document(&xml)
    }

    /// Walk `word/document.xml` events into tables and paragraph blocks.
    ///
    /// Nested tables are not split out: their text folds into the enclosing
    /// cell, which matches how the heuristics treat a cell as one token
    /// stream.
    fn walk_document(xml: &str) -> Result<DocumentStructure> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut structure = DocumentStructure::default();
        let mut table_depth = 0usize;
        let mut current_rows: Vec<Vec<String>> = Vec::new();
        let mut current_row: Option<Vec<String>> = None;
        let mut current_cell: Option<String> = None;
        let mut current_paragraph: Option<String> = None;
        let mut in_text_run = false;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"w:tbl" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            current_rows = Vec::new();
                        }
                    }
                    b"w:tr" if table_depth == 1 => {
                        current_row = Some(Vec::new());
                    }
                    b"w:tc" if table_depth == 1 => {
                        current_cell = Some(String::new());
                    }
                    b"w:p" if table_depth == 0 => {
                        current_paragraph = Some(String::new());
                    }
                    b"w:t" => in_text_run = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:tbl" => {
                        table_depth = table_depth.saturating_sub(1);
                        if table_depth == 0 && !current_rows.is_empty() {
                            structure.tables.push(TableBlock {
                                rows: std::mem::take(&mut current_rows),
                            });
                        }
                    }
                    b"w:tr" if table_depth == 1 => {
                        if let Some(row) = current_row.take() {
                            current_rows.push(row);
                        }
                    }
                    b"w:tc" if table_depth == 1 => {
                        if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut())
                        {
                            row.push(cell.trim().to_string());
                        }
                    }
                    b"w:p" => {
                        if table_depth == 0 {
                            if let Some(p) = current_paragraph.take() {
                                let text = p.trim().to_string();
                                if !text.is_empty() {
                                    structure.paragraphs.push(text);
                                }
                            }
                        } else if let Some(cell) = current_cell.as_mut() {
                            // Paragraph boundary inside a cell: keep runs apart.
                            cell.push(' ');
                        }
                    }
                    b"w:t" => in_text_run = false,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    // Breaks and tabs separate tokens.
                    b"w:br" | b"w:tab" | b"w:cr" => {
                        if let Some(cell) = current_cell.as_mut() {
                            cell.push(' ');
                        } else if let Some(p) = current_paragraph.as_mut() {
                            p.push(' ');
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text_run => {
                    let text = e.unescape().map_err(|e| {
                        LatebookError::MalformedDocument(format!("bad XML text: {e}"))
                    })?;
                    if let Some(cell) = current_cell.as_mut() {
                        cell.push_str(&text);
                    } else if let Some(p) = current_paragraph.as_mut() {
                        p.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(LatebookError::MalformedDocument(format!(
                        "invalid document.xml: {e}"
                    )));
                }
            }
            buf.clear();
        }

        Ok(structure)
    }
}

impl RosterBackend for DocxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<Student>> {
        let structure = Self::read_structure(data)?;

        let students = extract_tables(&structure);
        if !students.is_empty() {
            return Ok(students);
        }

        // Fallback: paragraph scan, only when no table yielded anything.
        debug!("no table candidates, falling back to paragraph scan");
        Ok(extract_paragraphs(&structure))
    }
}
