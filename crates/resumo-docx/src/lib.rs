//! Minimal WordprocessingML (.docx) writer.
//!
//! `resumo-docx` covers exactly what a generated summary needs: a style
//! registry with base-style references, append-only paragraphs with direct
//! alignment, bullet numbering for list styles, and OPC packaging into a zip
//! container.
//!
//! ```ignore
//! use resumo_docx::{Alignment, Document, StyleDefinition};
//!
//! let mut doc = Document::new();
//! doc.styles_mut().register(
//!     StyleDefinition::paragraph("Titulo", "Titulo")
//!         .with_font("Calibri")
//!         .with_size_pt(12)
//!         .with_bold(true)
//!         .with_alignment(Alignment::Left),
//! )?;
//! doc.add_paragraph("Introdução", Some("Titulo"))?;
//! doc.save("resumo.docx")?;
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`style`] | [`StyleDefinition`], [`StyleRegistry`], [`Alignment`], base-style resolution |
//! | [`paragraph`] | [`Paragraph`] and its XML serialization |
//! | [`document`] | [`Document`]: paragraphs + styles, `save` / `to_bytes` |
//! | [`package`] | zip container, content types, relationships, numbering part |

pub mod document;
pub mod error;
pub mod package;
pub mod paragraph;
pub mod style;

mod xml;

pub use document::Document;
pub use error::{DocxError, Result};
pub use paragraph::Paragraph;
pub use style::{Alignment, ListLevel, ResolvedStyle, StyleDefinition, StyleRegistry};
