//! Turn the model's plain-text summary into a styled document.
//!
//! Each non-blank line becomes one paragraph. Blankness is judged on the
//! raw line, so a line holding only markers (`***`, a bare `•`) still
//! yields an empty paragraph. Markdown residue (`*`, `#`) is stripped
//! next, then the line is classified by its prefix:
//!
//! | Prefix                              | Style       |
//! |-------------------------------------|-------------|
//! | two or more whitespace chars, `•`   | `Marcador2` |
//! | `•` (after any shorter indent)      | `Marcador1` |
//! | anything else                       | `Titulo`    |
//!
//! Every paragraph also carries its style's alignment as direct formatting.

use resumo_docx::{Alignment, Document, StyleDefinition, StyleRegistry};
use tracing::debug;

use crate::error::RenderError;
use crate::prompt::BULLET;

pub const STYLE_NORMAL: &str = "Normal";
pub const STYLE_HEADING: &str = "Titulo";
pub const STYLE_BULLET: &str = "Marcador1";
pub const STYLE_SUB_BULLET: &str = "Marcador2";

const FONT: &str = "Calibri";

/// Minimum indent, in characters, that makes a bullet second-level.
const SUB_BULLET_INDENT: usize = 2;

/// Role of one summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Bullet,
    SubBullet,
}

impl LineKind {
    pub fn style_id(self) -> &'static str {
        match self {
            Self::Heading => STYLE_HEADING,
            Self::Bullet => STYLE_BULLET,
            Self::SubBullet => STYLE_SUB_BULLET,
        }
    }
}

/// The four paragraph styles a summary document uses.
pub fn summary_styles() -> [StyleDefinition; 4] {
    [
        StyleDefinition::paragraph(STYLE_NORMAL, "Normal")
            .with_font(FONT)
            .with_size_pt(11)
            .with_alignment(Alignment::Justify),
        StyleDefinition::paragraph(STYLE_HEADING, "Titulo")
            .with_font(FONT)
            .with_size_pt(12)
            .with_bold(true)
            .with_alignment(Alignment::Left)
            .with_based_on(STYLE_NORMAL),
        StyleDefinition::paragraph(STYLE_BULLET, "Marcador1")
            .with_font(FONT)
            .with_size_pt(11)
            .with_alignment(Alignment::Left)
            .with_based_on("ListBullet"),
        StyleDefinition::paragraph(STYLE_SUB_BULLET, "Marcador2")
            .with_font(FONT)
            .with_size_pt(11)
            .with_alignment(Alignment::Left)
            .with_based_on("ListBullet2"),
    ]
}

/// Register the summary styles in `registry`. Safe to call repeatedly:
/// existing entries are updated in place.
pub fn ensure_summary_styles(registry: &mut StyleRegistry) -> Result<(), RenderError> {
    for style in summary_styles() {
        registry.register(style)?;
    }
    Ok(())
}

/// Remove markdown emphasis and heading markers.
pub fn sanitize_line(line: &str) -> String {
    line.chars().filter(|c| !matches!(c, '*' | '#')).collect()
}

/// Classify a sanitized line and return its paragraph text, which may be
/// empty.
pub fn classify_line(line: &str) -> (LineKind, &str) {
    let body = line.trim_start();
    match body.strip_prefix(BULLET) {
        Some(rest) => {
            let indent = line.chars().count() - body.chars().count();
            let kind = if indent >= SUB_BULLET_INDENT {
                LineKind::SubBullet
            } else {
                LineKind::Bullet
            };
            let text = rest.trim_start_matches(|c: char| c == BULLET || c.is_whitespace());
            (kind, text.trim_end())
        }
        None => (LineKind::Heading, body.trim_end()),
    }
}

/// Build a document holding one styled paragraph per summary line.
pub fn render_summary(summary: &str) -> Result<Document, RenderError> {
    let mut doc = Document::new();
    ensure_summary_styles(doc.styles_mut())?;

    for raw in summary.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        let cleaned = sanitize_line(line);
        let (kind, text) = classify_line(&cleaned);
        let style = kind.style_id();
        let alignment = doc.styles().resolve(style)?.alignment;
        let paragraph = doc.add_paragraph(text, Some(style))?;
        if let Some(alignment) = alignment {
            paragraph.set_alignment(alignment);
        }
    }

    debug!("Rendered {} paragraph(s)", doc.paragraph_count());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(doc: &Document) -> Vec<(&str, &str)> {
        doc.paragraphs()
            .iter()
            .map(|p| (p.text(), p.style().unwrap_or("")))
            .collect()
    }

    #[test]
    fn heading_bullet_and_sub_bullet() {
        let doc = render_summary("Introdução\n• Primeiro ponto\n  • Detalhe").unwrap();
        assert_eq!(
            styled(&doc),
            vec![
                ("Introdução", "Titulo"),
                ("Primeiro ponto", "Marcador1"),
                ("Detalhe", "Marcador2"),
            ]
        );
    }

    #[test]
    fn single_heading_line() {
        let doc = render_summary("Resumo").unwrap();
        assert_eq!(styled(&doc), vec![("Resumo", "Titulo")]);
    }

    #[test]
    fn blank_lines_and_crlf_are_ignored() {
        let doc = render_summary("Tópico\r\n\r\n   \n• Item\r\n").unwrap();
        assert_eq!(
            styled(&doc),
            vec![("Tópico", "Titulo"), ("Item", "Marcador1")]
        );
    }

    #[test]
    fn markdown_markers_are_stripped() {
        let doc = render_summary("### **Conclusão**\n• **Lucro** em alta\n").unwrap();
        assert_eq!(
            styled(&doc),
            vec![("Conclusão", "Titulo"), ("Lucro em alta", "Marcador1")]
        );
        assert!(doc.paragraphs().iter().all(|p| !p.text().contains(['*', '#'])));
    }

    #[test]
    fn tab_and_deep_indent_are_sub_bullets() {
        assert_eq!(
            classify_line("\t\t• Nível dois"),
            (LineKind::SubBullet, "Nível dois")
        );
        assert_eq!(
            classify_line("      • Mais fundo"),
            (LineKind::SubBullet, "Mais fundo")
        );
    }

    #[test]
    fn single_space_indent_is_first_level() {
        assert_eq!(classify_line(" • Quase"), (LineKind::Bullet, "Quase"));
    }

    #[test]
    fn marker_only_lines_become_empty_paragraphs() {
        assert_eq!(classify_line("  •  "), (LineKind::SubBullet, ""));
        assert_eq!(classify_line("••"), (LineKind::Bullet, ""));
        let doc = render_summary("Titulo\n***\n•\nFim").unwrap();
        assert_eq!(
            styled(&doc),
            vec![
                ("Titulo", "Titulo"),
                ("", "Titulo"),
                ("", "Marcador1"),
                ("Fim", "Titulo"),
            ]
        );
    }

    #[test]
    fn bullet_inside_text_stays_heading() {
        assert_eq!(
            classify_line("Custos • Receitas"),
            (LineKind::Heading, "Custos • Receitas")
        );
    }

    #[test]
    fn paragraphs_carry_style_alignment() {
        let doc = render_summary("Título\n• Item\n  • Sub").unwrap();
        assert!(
            doc.paragraphs()
                .iter()
                .all(|p| p.alignment() == Some(Alignment::Left))
        );
    }

    #[test]
    fn style_registration_is_idempotent() {
        let mut registry = StyleRegistry::with_builtins();
        ensure_summary_styles(&mut registry).unwrap();
        let count = registry.len();
        let ids = [STYLE_NORMAL, STYLE_HEADING, STYLE_BULLET, STYLE_SUB_BULLET];
        let first: Vec<_> = ids.iter().map(|id| registry.resolve(id).unwrap()).collect();
        let definitions: Vec<_> = ids.iter().map(|id| registry.get(id).cloned()).collect();

        ensure_summary_styles(&mut registry).unwrap();
        assert_eq!(registry.len(), count);
        let second: Vec<_> = ids.iter().map(|id| registry.resolve(id).unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(
            definitions,
            ids.iter().map(|id| registry.get(id).cloned()).collect::<Vec<_>>()
        );

        for id in [STYLE_NORMAL, STYLE_HEADING, STYLE_BULLET, STYLE_SUB_BULLET] {
            assert_eq!(registry.iter().filter(|s| s.id() == id).count(), 1);
        }
    }

    #[test]
    fn preset_attributes_resolve() {
        let mut registry = StyleRegistry::with_builtins();
        ensure_summary_styles(&mut registry).unwrap();

        let normal = registry.resolve(STYLE_NORMAL).unwrap();
        assert_eq!(normal.font.as_deref(), Some("Calibri"));
        assert_eq!(normal.size_pt, Some(11));
        assert_eq!(normal.alignment, Some(Alignment::Justify));
        assert!(!normal.bold);

        let heading = registry.resolve(STYLE_HEADING).unwrap();
        assert_eq!(heading.size_pt, Some(12));
        assert!(heading.bold);
        assert_eq!(heading.alignment, Some(Alignment::Left));

        let bullet = registry.resolve(STYLE_BULLET).unwrap();
        assert_eq!(bullet.list_level, Some(resumo_docx::ListLevel::First));
        let sub = registry.resolve(STYLE_SUB_BULLET).unwrap();
        assert_eq!(sub.list_level, Some(resumo_docx::ListLevel::Second));
        assert_eq!(sub.size_pt, Some(11));
    }

    #[test]
    fn existing_style_is_updated_not_duplicated() {
        let mut registry = StyleRegistry::with_builtins();
        registry
            .register(StyleDefinition::paragraph(STYLE_HEADING, "Titulo").with_size_pt(20))
            .unwrap();
        ensure_summary_styles(&mut registry).unwrap();

        let heading = registry.resolve(STYLE_HEADING).unwrap();
        assert_eq!(heading.size_pt, Some(12));
        assert!(heading.bold);
        assert_eq!(
            registry.iter().filter(|s| s.id() == STYLE_HEADING).count(),
            1
        );
    }
}
