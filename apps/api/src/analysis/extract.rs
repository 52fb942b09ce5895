//! Text extraction from uploaded resume files.
//!
//! Plain text is decoded as UTF-8 (lossy). PDFs go through `pdf_extract`
//! on a blocking thread; if that fails the raw bytes are decoded and stripped
//! of control characters. DOCX uploads are unzipped and `word/document.xml`
//! is stripped of tags; bytes that are not a readable archive get the same
//! raw-text cleanup as a failed PDF.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;
use zip::result::ZipError;
use zip::ZipArchive;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const TEXT_MIME: &str = "text/plain";
const DOCX_BODY_ENTRY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Pdf,
    Docx,
}

impl FileKind {
    /// Picks a kind from the declared content type, then the file extension.
    /// Unknown uploads are treated as plain text.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
            Some(PDF_MIME) => return Self::Pdf,
            Some(DOCX_MIME) => return Self::Docx,
            Some(TEXT_MIME) => return Self::PlainText,
            _ => {}
        }

        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            _ => Self::PlainText,
        }
    }
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern is valid"))
}

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("static pattern is valid"))
}

pub async fn extract_text(kind: FileKind, bytes: Vec<u8>) -> String {
    match kind {
        FileKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        FileKind::Pdf => extract_pdf(bytes).await,
        FileKind::Docx => extract_docx(&bytes),
    }
}

async fn extract_pdf(bytes: Vec<u8>) -> String {
    let raw = bytes.clone();
    // pdf_extract may panic on malformed input; the join error covers that case.
    let result = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await;

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF parsing error, using raw text fallback: {e}");
            clean_binary_text(&raw)
        }
        Err(e) => {
            warn!("PDF parsing task failed, using raw text fallback: {e}");
            clean_binary_text(&raw)
        }
    }
}

/// Raw-byte fallback: control and Latin-1 high bytes become spaces, whitespace collapses.
fn clean_binary_text(bytes: &[u8]) -> String {
    let replaced: String = String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0x1F || (0x7F..=0xFF).contains(&code) {
                ' '
            } else {
                c
            }
        })
        .collect();
    collapse_whitespace(&replaced)
}

fn extract_docx(bytes: &[u8]) -> String {
    match read_docx_body(bytes) {
        Ok(xml) => strip_xml_tags(&xml),
        Err(e) => {
            warn!("DOCX parsing error, using raw text fallback: {e}");
            clean_binary_text(strip_xml_tags(&String::from_utf8_lossy(bytes)).as_bytes())
        }
    }
}

fn read_docx_body(bytes: &[u8]) -> Result<String, ZipError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_name(DOCX_BODY_ENTRY)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn strip_xml_tags(xml: &str) -> String {
    collapse_whitespace(&xml_tag_re().replace_all(xml, " "))
}

fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(FileKind::detect(Some("application/pdf"), None), FileKind::Pdf);
        assert_eq!(FileKind::detect(Some(DOCX_MIME), Some("cv.txt")), FileKind::Docx);
        assert_eq!(
            FileKind::detect(Some("text/plain; charset=utf-8"), Some("cv.pdf")),
            FileKind::PlainText
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            FileKind::detect(Some("application/octet-stream"), Some("CV.PDF")),
            FileKind::Pdf
        );
        assert_eq!(FileKind::detect(None, Some("resume.docx")), FileKind::Docx);
        assert_eq!(FileKind::detect(None, None), FileKind::PlainText);
    }

    #[tokio::test]
    async fn test_plain_text_passthrough() {
        let text = extract_text(FileKind::PlainText, b"Hello resume".to_vec()).await;
        assert_eq!(text, "Hello resume");
    }

    fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
        use std::io::Write;
        use zip::write::FileOptions;
        use zip::{CompressionMethod, ZipWriter};

        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
            .collect();
        let document = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );

        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(b"<?xml version=\"1.0\"?><Types></Types>")
            .unwrap();
        writer.start_file(DOCX_BODY_ENTRY, options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_docx_archive_is_unzipped() {
        let bytes = docx_fixture(&[
            "Jane Doe",
            "jane.doe@example.com | +1 555 123 4567",
            "Experience",
            "Led migration to Kubernetes, reducing deploy time by 40%",
            "Education",
        ]);
        assert!(bytes.starts_with(b"PK"));

        let text = extract_text(FileKind::Docx, bytes).await;
        assert!(!text.contains("PK"), "raw archive leaked: {text}");
        assert!(!text.contains('<'));
        assert!(text.starts_with("Jane Doe jane.doe@example.com"));
        assert!(text.contains("Kubernetes"));
        assert!(crate::analysis::rules::has_email(&text));
    }

    #[tokio::test]
    async fn test_docx_without_body_entry_uses_raw_fallback() {
        use std::io::Write;
        use zip::{write::FileOptions, ZipWriter};

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("notes.txt", FileOptions::default()).unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let text = extract_text(FileKind::Docx, bytes).await;
        assert!(!text.chars().any(|c| c.is_control()));
    }

    #[tokio::test]
    async fn test_docx_strips_tags() {
        let xml = b"<w:p><w:r><w:t>Senior</w:t></w:r>  <w:r><w:t>Engineer</w:t></w:r></w:p>";
        let text = extract_text(FileKind::Docx, xml.to_vec()).await;
        assert_eq!(text, "Senior Engineer");
    }

    #[tokio::test]
    async fn test_invalid_pdf_uses_raw_fallback() {
        let bytes = b"not really a pdf\x01\x02 but readable text".to_vec();
        let text = extract_text(FileKind::Pdf, bytes).await;
        assert!(text.contains("readable text"));
        assert!(!text.contains('\u{1}'));
    }

    #[test]
    fn test_clean_binary_text_collapses_whitespace() {
        assert_eq!(clean_binary_text(b"a\x00\x00  b\n\nc"), "a b c");
    }
}
