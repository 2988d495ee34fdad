//! Integration tests: write packages to disk and read them back.

use std::io::Read;

use resumo_docx::{Alignment, Document, StyleDefinition};

fn read_part(path: &std::path::Path, name: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = String::new();
    entry.read_to_string(&mut out).unwrap();
    out
}

fn sample_document() -> Document {
    let mut doc = Document::new();
    doc.styles_mut()
        .register(
            StyleDefinition::paragraph("Titulo", "Titulo")
                .with_font("Calibri")
                .with_size_pt(12)
                .with_bold(true)
                .with_alignment(Alignment::Left),
        )
        .unwrap();
    doc.styles_mut()
        .register(
            StyleDefinition::paragraph("Marcador1", "Marcador1")
                .with_font("Calibri")
                .with_size_pt(11)
                .with_based_on("ListBullet"),
        )
        .unwrap();
    doc.add_paragraph("Introdução", Some("Titulo"))
        .unwrap()
        .set_alignment(Alignment::Left);
    doc.add_paragraph("Primeiro ponto", Some("Marcador1"))
        .unwrap()
        .set_alignment(Alignment::Left);
    doc
}

#[test]
fn saved_package_round_trips_through_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumo.docx");

    sample_document().save(&path).unwrap();

    let document = read_part(&path, "word/document.xml");
    assert!(document.contains("Introdução"));
    assert!(document.contains(r#"<w:pStyle w:val="Titulo"/>"#));
    assert!(document.contains(r#"<w:pStyle w:val="Marcador1"/>"#));

    let styles = read_part(&path, "word/styles.xml");
    assert!(styles.contains(r#"w:styleId="Marcador1""#));
    assert!(styles.contains(r#"<w:basedOn w:val="ListBullet"/>"#));

    let numbering = read_part(&path, "word/numbering.xml");
    assert!(numbering.contains("w:abstractNum"));
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumo.docx");
    std::fs::write(&path, b"not a zip").unwrap();

    sample_document().save(&path).unwrap();

    let document = read_part(&path, "word/document.xml");
    assert!(document.contains("Primeiro ponto"));
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("resumo.docx");
    let err = sample_document().save(&path).unwrap_err();
    assert!(matches!(err, resumo_docx::DocxError::Io(_)));
}
