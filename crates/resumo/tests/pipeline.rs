use std::io::Read;
use std::sync::Mutex;

use resumo::client::GenerateFuture;
use resumo::{Config, Error, FileAccessError, RemoteServiceError, TextGenerator};

struct ScriptedGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn config_for(dir: &tempfile::TempDir) -> Config {
    let base = dir.path().join("relatorio");
    let json = serde_json::json!({
        "GOOGLE_API_KEY": "test-key",
        "caminho_base": base.to_string_lossy(),
    });
    Config::parse(&json.to_string(), std::path::Path::new("config.json")).unwrap()
}

fn read_entry(path: &std::path::Path, name: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = String::new();
    entry.read_to_string(&mut out).unwrap();
    out
}

#[tokio::test]
async fn renders_summary_into_docx() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(
        config.input_path(),
        "A receita da empresa cresceu. A receita superou a meta.",
    )
    .unwrap();

    let generator =
        ScriptedGenerator::new("**Introdução**\n• Primeiro ponto\n  • Detalhe\n\n## Conclusão\n");
    let report = resumo::run(&config, &generator).await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(report.output_path, dir.path().join("relatorio.docx"));
    assert_eq!(report.paragraphs, 4);
    assert!(report.summary.starts_with("**Introdução**"));

    let document = read_entry(&report.output_path, "word/document.xml");
    assert!(document.contains(r#"<w:pStyle w:val="Titulo"/>"#));
    assert!(document.contains(r#"<w:pStyle w:val="Marcador1"/>"#));
    assert!(document.contains(r#"<w:pStyle w:val="Marcador2"/>"#));
    assert!(document.contains(">Introdução<"));
    assert!(document.contains(">Detalhe<"));
    assert!(!document.contains('*'));
    assert!(!document.contains("##"));

    let styles = read_entry(&report.output_path, "word/styles.xml");
    for id in ["Normal", "Titulo", "Marcador1", "Marcador2"] {
        assert!(styles.contains(&format!(r#"w:styleId="{id}""#)), "{id}");
    }
}

#[tokio::test]
async fn prompt_embeds_source_and_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(config.input_path(), "Dados novos. Dados antigos.").unwrap();

    let generator = ScriptedGenerator::new("Resumo");
    resumo::run(&config, &generator).await.unwrap();

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("Dados novos. Dados antigos."));
    assert!(prompts[0].contains("Número de sentenças: 2"));
    assert!(prompts[0].contains("Palavras-chave mais frequentes: dados, novos, antigos"));
}

#[tokio::test]
async fn empty_input_still_issues_one_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(config.input_path(), "").unwrap();

    let generator = ScriptedGenerator::new("Sem conteúdo");
    let report = resumo::run(&config, &generator).await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert!(generator.prompts.lock().unwrap()[0].contains("Número de sentenças: 0"));
    assert_eq!(report.paragraphs, 1);
    let document = read_entry(&report.output_path, "word/document.xml");
    assert!(document.contains(r#"<w:pStyle w:val="Titulo"/>"#));
}

#[tokio::test]
async fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(config.input_path(), "Texto.").unwrap();
    std::fs::write(config.output_path(), b"old contents").unwrap();

    let report = resumo::run(&config, &ScriptedGenerator::new("Novo"))
        .await
        .unwrap();
    let document = read_entry(&report.output_path, "word/document.xml");
    assert!(document.contains(">Novo<"));
}

#[tokio::test]
async fn missing_input_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    let generator = ScriptedGenerator::new("nunca");

    let err = resumo::run(&config, &generator).await.unwrap_err();
    assert!(matches!(err, Error::FileAccess(FileAccessError::NotFound(_))));
    assert_eq!(generator.calls(), 0);
    assert!(!config.output_path().exists());
}

#[tokio::test]
async fn blank_reply_produces_no_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(config.input_path(), "Texto.").unwrap();

    let err = resumo::run(&config, &ScriptedGenerator::new("\n \n"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Remote(RemoteServiceError::EmptyResponse(_))
    ));
    assert!(!config.output_path().exists());
}

#[tokio::test]
async fn unwritable_output_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    std::fs::write(config.input_path(), "Texto.").unwrap();
    std::fs::create_dir(config.output_path()).unwrap();

    let err = resumo::run(&config, &ScriptedGenerator::new("Tópico"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Render(_)));
}
