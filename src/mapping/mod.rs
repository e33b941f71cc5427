//! Mapeamento heurístico de saída para linhas do fonte.
//!
//! Associa cada linha capturada do stdout à linha do fonte que
//! provavelmente a produziu. A detecção é textual (presença de uma chamada
//! a `printf`/`puts` na linha) e o pareamento é posicional: i-ésimo
//! candidato com i-ésima linha de saída. Isso é uma aproximação assumida,
//! não um trace de execução: uma chamada dentro de um loop emite várias
//! linhas que acabam agregadas na anotação do último candidato.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::responses::InlineAnnotation;

/// Separador usado ao agregar linhas restantes na última anotação.
const REMAINDER_SEPARATOR: &str = ", ";

fn print_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(printf|puts)\s*\(").expect("regex literal válida"))
}

/// Linhas candidatas a ponto de emissão (1-based), em ordem do fonte.
///
/// Uma linha é candidata quando contém sintaticamente uma chamada de
/// impressão. Linhas que emitem sem `printf`/`puts` (por exemplo via
/// `fwrite`) não são detectadas; a heurística é documentadamente parcial.
pub fn emission_points(source: &str) -> Vec<u32> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| print_call_re().is_match(line))
        .map(|(i, _)| i as u32 + 1)
        .collect()
}

/// Produz no máximo uma anotação por candidato, em ordem do fonte.
///
/// O i-ésimo candidato recebe a i-ésima linha de saída; o último candidato
/// absorve todas as linhas restantes, unidas por `", "`, acomodando
/// chamadas que emitem vários valores ou rodam em loop. Com menos linhas
/// de saída que candidatos, os candidatos excedentes ficam sem anotação.
pub fn map_output(source: &str, stdout_lines: &[String]) -> Vec<InlineAnnotation> {
    let points = emission_points(source);
    let mut annotations = Vec::new();

    for (i, line) in points.iter().enumerate() {
        if i + 1 < points.len() {
            if let Some(text) = stdout_lines.get(i) {
                annotations.push(InlineAnnotation::new(*line, text.clone()));
            }
        } else {
            let rest: &[String] = stdout_lines.get(i..).unwrap_or_default();
            if !rest.is_empty() {
                annotations.push(InlineAnnotation::new(*line, rest.join(REMAINDER_SEPARATOR)));
            }
        }
    }

    annotations
}
