/// Document writer: an append-only sequence of paragraphs plus a style
/// registry, saved as a .docx package.
use std::fmt::Write as FmtWrite;
use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use crate::error::{DocxError, Result};
use crate::package::write_package;
use crate::paragraph::Paragraph;
use crate::style::StyleRegistry;
use crate::xml;

/// A Word document under construction.
#[derive(Debug, Clone)]
pub struct Document {
    styles: StyleRegistry,
    paragraphs: Vec<Paragraph>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the built-in style registry.
    pub fn new() -> Self {
        Self {
            styles: StyleRegistry::with_builtins(),
            paragraphs: Vec::new(),
        }
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Append a paragraph. `style` must name a registered style.
    pub fn add_paragraph(
        &mut self,
        text: impl Into<String>,
        style: Option<&str>,
    ) -> Result<&mut Paragraph> {
        if let Some(id) = style
            && !self.styles.contains(id)
        {
            return Err(DocxError::UnknownStyle(id.to_string()));
        }
        let idx = self.paragraphs.len();
        self.paragraphs
            .push(Paragraph::new(text, style.map(str::to_string)));
        Ok(&mut self.paragraphs[idx])
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Serialize the body as a complete `document.xml` part (A4 page).
    pub fn document_xml(&self) -> Result<String> {
        let mut out = String::with_capacity(256 + self.paragraphs.len() * 96);
        out.push_str(xml::DECLARATION);
        write!(
            out,
            r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#,
            xml::NS_W,
            xml::NS_R
        )?;
        for para in &self.paragraphs {
            para.to_xml(&mut out)?;
        }
        out.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#);
        out.push_str(r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#);
        out.push_str("</w:sectPr></w:body></w:document>");
        Ok(out)
    }

    /// Build the .docx package in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = write_package(
            Cursor::new(Vec::new()),
            self.document_xml()?,
            self.styles.to_xml()?,
            self.styles.uses_numbering(),
        )?;
        Ok(cursor.into_inner())
    }

    /// Write the package to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        debug!(
            "Saving document: {} paragraph(s), {} bytes -> {}",
            self.paragraphs.len(),
            bytes.len(),
            path.display()
        );
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
