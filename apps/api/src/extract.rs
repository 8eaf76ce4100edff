//! Text extraction for uploaded resumes (PDF, DOCX).
//!
//! The format is picked from the file name. Everything else is rejected with
//! `UnsupportedFormat` before any bytes are inspected.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use thiserror::Error;

/// Upper bound on the decompressed size of `word/document.xml`.
const MAX_DOCUMENT_XML_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0} (only .pdf and .docx are accepted)")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Case-insensitive extension check on the uploaded file name.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentFormat::Docx)
        } else {
            Err(ExtractError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match DocumentFormat::from_file_name(file_name)? {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Docx("word/document.xml not found".to_string()))?;

    let mut xml = Vec::new();
    entry
        .take(MAX_DOCUMENT_XML_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if xml.len() as u64 >= MAX_DOCUMENT_XML_BYTES {
        return Err(ExtractError::Docx(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }
    paragraphs_text(&xml)
}

/// Joins `w:t` runs, one line per `w:p`. `w:tab` and `w:br` inside a run become
/// `\t` and `\n`; tab-stop definitions in paragraph properties are skipped.
fn paragraphs_text(xml: &[u8]) -> Result<String, ExtractError> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_run = false;
    let mut in_text = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if in_run => out.push('\t'),
                b"br" | b"cr" if in_run => out.push('\n'),
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

/// In-memory DOCX archives for tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::io::{Cursor, Write};

    pub fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// A document with one `w:p` per line.
    pub fn docx_from_lines(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|l| format!("<w:p><w:r><w:t xml:space=\"preserve\">{l}</w:t></w:r></w:p>"))
            .collect();
        docx_with(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{docx_from_lines, docx_with};
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_file_name("cv.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_file_name("Jane Resume.Docx").unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let err = extract_text("resume.txt", b"Jane Doe").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref f) if f == "resume.txt"));
        assert!(matches!(
            DocumentFormat::from_file_name("resume.doc"),
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
<w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Python &amp; SQL</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>
</w:body></w:document>"#;
        let text = extract_text("resume.docx", &docx_with(xml)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["Jane Doe", "Skills\tPython & SQL", "", "Line one", "Line two"]
        );
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_text("resume.docx", &bytes),
            Err(ExtractError::Docx(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_not_a_docx() {
        assert!(matches!(
            extract_text("resume.docx", b"not a zip"),
            Err(ExtractError::Docx(_))
        ));
    }

    #[test]
    fn test_tab_stop_definitions_add_no_tabs() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr><w:r><w:t>Acme Corp</w:t><w:tab/><w:t>2019</w:t></w:r></w:p>
</w:body></w:document>"#;
        let text = extract_text("resume.docx", &docx_with(xml)).unwrap();
        assert_eq!(text, "Acme Corp\t2019\n");
    }

    #[test]
    fn test_docx_from_lines_round_trips() {
        let text = extract_text("cv.docx", &docx_from_lines(&["Jane Doe", "Skills"])).unwrap();
        assert_eq!(text, "Jane Doe\nSkills\n");
    }
}
