//! Summarization prompt.
//!
//! The prompt is written in Portuguese for the target audience. It embeds
//! the full source text and the lexical statistics, and fixes the line
//! format the renderer expects back: unprefixed topic lines, `• ` for
//! first-level points, two spaces plus `• ` for second-level points.

use crate::lexical::LexicalSummary;

/// Marker the model is asked to use for sub-points.
pub const BULLET: char = '•';

const INSTRUCTION: &str = "\
Como professor de português, analise o conteúdo abaixo e redija um texto que \
destaque os seus principais pontos, com um tom profissional.";

const FORMAT_RULES: &str = "\
O resumo deve:
1. Ter um tom profissional e formal
2. Destacar os pontos-chave do texto original
3. Ser estruturado em tópicos claros
4. Usar a seguinte formatação:
   - Tópicos principais sem marcadores
   - Subtópicos iniciados por • (ex: • Subtópico)
   - Sub-subtópicos iniciados por dois espaços e • (ex:   • Sub-subtópico)
5. Manter uma estrutura hierárquica clara
6. NÃO usar asteriscos (**) nem cerquilhas (###) na formatação

Formate o resumo de maneira clara e legível, seguindo estritamente as regras \
de formatação acima.";

/// Build the instruction sent to the model for `source`.
pub fn build_prompt(source: &str, stats: &LexicalSummary) -> String {
    let keywords = stats.keywords().collect::<Vec<_>>().join(", ");
    format!(
        "{INSTRUCTION}\n\n\
         Conteúdo original:\n{source}\n\n\
         Análise prévia:\n\
         - Número de sentenças: {}\n\
         - Palavras-chave mais frequentes: {keywords}\n\n\
         {FORMAT_RULES}",
        stats.sentence_count
    )
}
