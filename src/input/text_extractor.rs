//! Text extraction from various file formats

use crate::error::{Result, ResumeRankerError};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeRankerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        docx_to_text(&bytes).map_err(|e| match e {
            ResumeRankerError::DocxExtraction(msg) => {
                ResumeRankerError::DocxExtraction(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }
}

/// Paragraph text of a `.docx` archive, one paragraph per line.
pub fn docx_to_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ResumeRankerError::DocxExtraction(format!("not a DOCX archive: {}", e)))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ResumeRankerError::DocxExtraction(format!("missing word/document.xml: {}", e)))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

/// Walk WordprocessingML, keeping `<w:t>` runs. Tabs and breaks inside a
/// paragraph are kept as `\t` and `\n`.
pub fn document_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ResumeRankerError::DocxExtraction(format!("malformed document.xml: {}", e)))?;

        match event {
            XmlEvent::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            XmlEvent::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            XmlEvent::Text(e) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ResumeRankerError::DocxExtraction(format!("bad text run: {}", e)))?;
                current.push_str(&text);
            }
            XmlEvent::CData(e) if in_text => current.push_str(&String::from_utf8_lossy(&e)),
            XmlEvent::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// UTF-8 first, Latin-1 when the bytes are not valid UTF-8.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(decode_text(bytes))
    }
}

pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(markdown_to_text(&decode_text(bytes)))
    }
}

/// Keep the text content of a markdown document, one block per line.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
