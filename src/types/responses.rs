//! Tipos de resposta da API do Compiler Explorer e visões derivadas.

use serde::{Deserialize, Serialize};

/// Uma linha de saída no formato do Godbolt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLine {
    pub text: String,
}

impl OutputLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Resultado de execução do binário compilado.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecResult {
    #[serde(default)]
    pub stdout: Vec<OutputLine>,

    #[serde(default)]
    pub stderr: Vec<OutputLine>,
}

/// Resposta bruta do endpoint de compilação.
///
/// O `stderr` de nível superior carrega os diagnósticos de compilação;
/// o `exec_result` só aparece quando o binário chegou a rodar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    #[serde(default)]
    pub exec_result: Option<ExecResult>,

    #[serde(default)]
    pub stderr: Option<Vec<OutputLine>>,
}

/// Saída normalizada de uma compilação.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// Texto completo do stdout de execução.
    pub stdout: String,

    /// Texto de stderr: o da execução, ou os diagnósticos de compilação
    /// quando a execução não produziu stderr.
    pub stderr: String,

    /// Linhas do stdout, com uma linha vazia final removida.
    pub stdout_lines: Vec<String>,
}

impl CompileOutput {
    /// Normaliza a resposta bruta da API.
    pub fn from_response(response: &CompileResponse) -> Self {
        let stdout = response
            .exec_result
            .as_ref()
            .map(|e| join_lines(&e.stdout))
            .unwrap_or_default();

        let exec_stderr = response
            .exec_result
            .as_ref()
            .map(|e| join_lines(&e.stderr))
            .unwrap_or_default();

        let stderr = if exec_stderr.is_empty() {
            response
                .stderr
                .as_ref()
                .map(|lines| join_lines(lines))
                .unwrap_or_default()
        } else {
            exec_stderr
        };

        let mut stdout_lines: Vec<String> = if stdout.is_empty() {
            Vec::new()
        } else {
            stdout.split('\n').map(str::to_string).collect()
        };
        if stdout_lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            stdout_lines.pop();
        }

        Self {
            stdout,
            stderr,
            stdout_lines,
        }
    }

    /// Só há diagnóstico, nenhum stdout: deve virar exibição de erro.
    pub fn error_only(&self) -> bool {
        !self.stderr.is_empty() && self.stdout.is_empty()
    }
}

fn join_lines(lines: &[OutputLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Anotação inline: texto associado a uma linha do fonte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineAnnotation {
    /// Número da linha no fonte (1-based).
    pub line: u32,

    /// Fragmento de texto associado.
    pub text: String,
}

impl InlineAnnotation {
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Resultado estruturado de uma invocação do runner.
///
/// O núcleo devolve dados; quem transforma isso em marcação é a camada de
/// renderização ([`crate::render`]), e quem acopla a marcação à UI viva é o
/// host.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// URL compartilhável do Compiler Explorer, se habilitada.
    pub link: Option<String>,

    /// Restrição de largura do bloco, se configurada.
    pub max_width: Option<String>,

    /// Restrição de altura do bloco, se configurada.
    pub max_height: Option<String>,

    /// Visão compilada. `None` na primeira renderização (gate), quando o
    /// host recebe só a decoração estática.
    pub compiled: Option<CompiledView>,
}

/// Visão de um snippet compilado: saída agregada e anotações por linha.
#[derive(Debug, Clone)]
pub struct CompiledView {
    pub stdout: String,
    pub stderr: String,
    pub annotations: Vec<InlineAnnotation>,
}

impl CompiledView {
    /// Houve apenas diagnóstico, sem stdout.
    pub fn error_only(&self) -> bool {
        !self.stderr.is_empty() && self.stdout.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<OutputLine> {
        texts.iter().map(|t| OutputLine::new(*t)).collect()
    }

    #[test]
    fn test_from_response_joins_stdout() {
        let response = CompileResponse {
            exec_result: Some(ExecResult {
                stdout: lines(&["a", "b"]),
                stderr: vec![],
            }),
            stderr: None,
        };

        let output = CompileOutput::from_response(&response);
        assert_eq!(output.stdout, "a\nb");
        assert_eq!(output.stdout_lines, vec!["a", "b"]);
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_from_response_trims_trailing_empty_line() {
        let response = CompileResponse {
            exec_result: Some(ExecResult {
                stdout: lines(&["a", "b", ""]),
                stderr: vec![],
            }),
            stderr: None,
        };

        let output = CompileOutput::from_response(&response);
        // Só a última linha vazia é removida
        assert_eq!(output.stdout_lines, vec!["a", "b"]);
        assert_eq!(output.stdout, "a\nb\n");
    }

    #[test]
    fn test_from_response_prefers_exec_stderr() {
        let response = CompileResponse {
            exec_result: Some(ExecResult {
                stdout: vec![],
                stderr: lines(&["segfault"]),
            }),
            stderr: Some(lines(&["warning: unused"])),
        };

        let output = CompileOutput::from_response(&response);
        assert_eq!(output.stderr, "segfault");
    }

    #[test]
    fn test_from_response_falls_back_to_compile_diagnostics() {
        let response = CompileResponse {
            exec_result: None,
            stderr: Some(lines(&["error: expected ';'", "1 error generated."])),
        };

        let output = CompileOutput::from_response(&response);
        assert_eq!(output.stderr, "error: expected ';'\n1 error generated.");
        assert!(output.stdout.is_empty());
        assert!(output.error_only());
    }

    #[test]
    fn test_from_response_empty() {
        let output = CompileOutput::from_response(&CompileResponse::default());
        assert!(output.stdout.is_empty());
        assert!(output.stderr.is_empty());
        assert!(output.stdout_lines.is_empty());
        assert!(!output.error_only());
    }

    #[test]
    fn test_error_only_requires_empty_stdout() {
        let with_stdout = CompileOutput {
            stdout: "ok".to_string(),
            stderr: "warning: x".to_string(),
            stdout_lines: vec!["ok".to_string()],
        };
        assert!(!with_stdout.error_only());
    }

    #[test]
    fn test_response_deserializes_camel_case() {
        let raw = r#"{"execResult":{"stdout":[{"text":"hi"}],"stderr":[]},"stderr":[]}"#;
        let response: CompileResponse = serde_json::from_str(raw).expect("json válido");

        let exec = response.exec_result.expect("execResult presente");
        assert_eq!(exec.stdout[0].text, "hi");
    }
}
