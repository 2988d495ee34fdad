/// Paragraph type and its WordprocessingML serialization.
use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::style::Alignment;
use crate::xml::escape;

/// A single-run paragraph of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    /// Paragraph style id
    style: Option<String>,
    /// Direct alignment, overriding the style's
    alignment: Option<Alignment>,
}

impl Paragraph {
    pub(crate) fn new(text: impl Into<String>, style: Option<String>) -> Self {
        Self {
            text: text.into(),
            style,
            alignment: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.alignment.is_some() {
            xml.push_str("<w:pPr>");
            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape(style))?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())?;
            }
            xml.push_str("</w:pPr>");
        }

        if !self.text.is_empty() {
            write!(
                xml,
                "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                escape(&self.text)
            )?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}
