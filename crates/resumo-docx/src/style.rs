//! Paragraph styles and the document style registry.
//!
//! A [`StyleDefinition`] may name a base style by id. Inheritance is plain
//! composition: the registry resolves a style by walking the `based_on`
//! chain and layering each definition's explicit attributes over its
//! parent's (see [`StyleRegistry::resolve`]).

use std::fmt::Write as FmtWrite;

use tracing::debug;

use crate::error::{DocxError, Result};
use crate::xml::{self, escape};

/// Numbering instance used by the built-in bullet list styles.
pub(crate) const BULLET_NUM_ID: u32 = 1;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `w:jc` element.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Bullet list level a style is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLevel {
    First,
    Second,
}

impl ListLevel {
    /// Zero-based `w:ilvl` value.
    pub fn ilvl(self) -> u32 {
        match self {
            ListLevel::First => 0,
            ListLevel::Second => 1,
        }
    }
}

/// A named paragraph style.
///
/// Every attribute is optional; `None` means "inherit from the base style".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDefinition {
    /// Style identifier referenced by paragraphs (e.g. "Titulo").
    id: String,
    /// UI-visible name.
    name: String,
    /// Font family name.
    font: Option<String>,
    /// Font size in whole points.
    size_pt: Option<u32>,
    bold: Option<bool>,
    alignment: Option<Alignment>,
    /// Id of the style this one is based on.
    based_on: Option<String>,
    list_level: Option<ListLevel>,
    is_default: bool,
    is_custom: bool,
}

impl StyleDefinition {
    /// Create a custom paragraph style with no explicit attributes.
    pub fn paragraph(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            font: None,
            size_pt: None,
            bold: None,
            alignment: None,
            based_on: None,
            list_level: None,
            is_default: false,
            is_custom: true,
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_size_pt(mut self, size_pt: u32) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_based_on(mut self, base_id: impl Into<String>) -> Self {
        self.based_on = Some(base_id.into());
        self
    }

    pub fn with_list_level(mut self, level: ListLevel) -> Self {
        self.list_level = Some(level);
        self
    }

    fn built_in(mut self) -> Self {
        self.is_custom = false;
        self
    }

    fn default_for_type(mut self) -> Self {
        self.is_default = true;
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    pub fn size_pt(&self) -> Option<u32> {
        self.size_pt
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }

    pub fn list_level(&self) -> Option<ListLevel> {
        self.list_level
    }

    /// Overwrite this style's attributes with the ones `other` sets
    /// explicitly. Attributes `other` leaves unset are kept.
    fn merge_from(&mut self, other: &StyleDefinition) {
        if other.font.is_some() {
            self.font.clone_from(&other.font);
        }
        if other.size_pt.is_some() {
            self.size_pt = other.size_pt;
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.alignment.is_some() {
            self.alignment = other.alignment;
        }
        if other.based_on.is_some() {
            self.based_on.clone_from(&other.based_on);
        }
        if other.list_level.is_some() {
            self.list_level = other.list_level;
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str(r#"<w:style w:type="paragraph""#);
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        if self.is_custom {
            xml.push_str(r#" w:customStyle="1""#);
        }
        write!(xml, r#" w:styleId="{}">"#, escape(&self.id))?;
        write!(xml, r#"<w:name w:val="{}"/>"#, escape(&self.name))?;
        if let Some(ref base) = self.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape(base))?;
        }
        xml.push_str("<w:qFormat/>");

        if self.list_level.is_some() || self.alignment.is_some() {
            xml.push_str("<w:pPr>");
            if let Some(level) = self.list_level {
                write!(
                    xml,
                    r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                    level.ilvl(),
                    BULLET_NUM_ID
                )?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.font.is_some() || self.size_pt.is_some() || self.bold.is_some() {
            xml.push_str("<w:rPr>");
            if let Some(ref font) = self.font {
                let font = escape(font);
                write!(
                    xml,
                    r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
                )?;
            }
            match self.bold {
                Some(true) => xml.push_str("<w:b/><w:bCs/>"),
                Some(false) => xml.push_str(r#"<w:b w:val="0"/><w:bCs w:val="0"/>"#),
                None => {}
            }
            if let Some(size) = self.size_pt {
                // Half-points.
                write!(xml, r#"<w:sz w:val="{}"/>"#, size * 2)?;
                write!(xml, r#"<w:szCs w:val="{}"/>"#, size * 2)?;
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str("</w:style>");
        Ok(())
    }
}

/// Effective formatting of a style after walking its base-style chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub font: Option<String>,
    pub size_pt: Option<u32>,
    pub bold: bool,
    pub alignment: Option<Alignment>,
    pub list_level: Option<ListLevel>,
}

/// The set of styles known to a document, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: Vec<StyleDefinition>,
}

impl StyleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in styles every document starts
    /// with: `Normal`, `ListBullet` and `ListBullet2`.
    pub fn with_builtins() -> Self {
        let normal = StyleDefinition::paragraph("Normal", "Normal")
            .with_font("Calibri")
            .with_size_pt(11)
            .built_in()
            .default_for_type();
        let list_bullet = StyleDefinition::paragraph("ListBullet", "List Bullet")
            .with_based_on("Normal")
            .with_list_level(ListLevel::First)
            .built_in();
        let list_bullet_2 = StyleDefinition::paragraph("ListBullet2", "List Bullet 2")
            .with_based_on("Normal")
            .with_list_level(ListLevel::Second)
            .built_in();
        Self {
            styles: vec![normal, list_bullet, list_bullet_2],
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.styles.iter().position(|s| s.id == id)
    }

    /// Add a style, or update the existing style with the same id.
    ///
    /// When the id is already registered, the attributes `style` sets
    /// explicitly are applied to the existing entry; no duplicate is
    /// created. The base style, if any, must already be registered.
    pub fn register(&mut self, style: StyleDefinition) -> Result<&mut StyleDefinition> {
        if let Some(base) = style.based_on() {
            if !self.contains(base) {
                return Err(DocxError::UnknownStyle(base.to_string()));
            }
            if self.chain_reaches(base, style.id()) {
                return Err(DocxError::StyleCycle(style.id().to_string()));
            }
        }

        match self.position(style.id()) {
            Some(idx) => {
                debug!("Updating existing style '{}'", style.id());
                self.styles[idx].merge_from(&style);
                Ok(&mut self.styles[idx])
            }
            None => {
                debug!("Adding style '{}'", style.id());
                let idx = self.styles.len();
                self.styles.push(style);
                Ok(&mut self.styles[idx])
            }
        }
    }

    /// Whether walking the base chain from `from` visits `target`.
    fn chain_reaches(&self, from: &str, target: &str) -> bool {
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(id) = current {
            if id == target {
                return true;
            }
            steps += 1;
            if steps > self.styles.len() {
                return false;
            }
            current = self.get(id).and_then(|s| s.based_on());
        }
        false
    }

    /// Resolve the effective formatting of `id` through its base styles.
    pub fn resolve(&self, id: &str) -> Result<ResolvedStyle> {
        let mut chain: Vec<&StyleDefinition> = Vec::new();
        let mut current = Some(id);
        while let Some(style_id) = current {
            let style = self
                .get(style_id)
                .ok_or_else(|| DocxError::UnknownStyle(style_id.to_string()))?;
            if chain.iter().any(|s| s.id == style.id) {
                return Err(DocxError::StyleCycle(style_id.to_string()));
            }
            chain.push(style);
            current = style.based_on();
        }

        let mut resolved = ResolvedStyle::default();
        for style in chain.iter().rev() {
            if style.font.is_some() {
                resolved.font.clone_from(&style.font);
            }
            if style.size_pt.is_some() {
                resolved.size_pt = style.size_pt;
            }
            if let Some(bold) = style.bold {
                resolved.bold = bold;
            }
            if style.alignment.is_some() {
                resolved.alignment = style.alignment;
            }
            if style.list_level.is_some() {
                resolved.list_level = style.list_level;
            }
        }
        Ok(resolved)
    }

    /// Whether any style is bound to the bullet numbering definition.
    pub fn uses_numbering(&self) -> bool {
        self.styles.iter().any(|s| s.list_level.is_some())
    }

    /// Serialize the registry as a complete `styles.xml` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(xml::DECLARATION);
        write!(
            xml,
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            xml::NS_W,
            xml::NS_R
        )?;

        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
        xml.push_str(r#"<w:sz w:val="22"/><w:szCs w:val="22"/>"#);
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#);
        xml.push_str("</w:docDefaults>");

        for style in &self.styles {
            style.to_xml(&mut xml)?;
        }

        xml.push_str("</w:styles>");
        Ok(xml)
    }
}
