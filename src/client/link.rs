//! Links compartilháveis no formato `clientstate` do Compiler Explorer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::PalcoResult;

/// Estado de cliente no formato do Compiler Explorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientState {
    pub sessions: Vec<Session>,
}

/// Uma sessão de edição dentro do estado de cliente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: u32,
    pub language: String,
    pub source: String,
    pub compilers: Vec<serde_json::Value>,
    pub executors: Vec<Executor>,
}

/// Um executor configurado na sessão.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Executor {
    pub compiler: ExecutorCompiler,
}

/// Compilador e flags de um executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorCompiler {
    pub id: String,
    pub options: String,
}

impl ClientState {
    /// Monta o estado para uma tripla (fonte, compilador, flags).
    pub fn for_snippet(source: &str, compiler: &str, flags: &str) -> Self {
        Self {
            sessions: vec![Session {
                id: 1,
                language: "c".to_string(),
                source: source.to_string(),
                compilers: Vec::new(),
                executors: vec![Executor {
                    compiler: ExecutorCompiler {
                        id: compiler.to_string(),
                        options: flags.to_string(),
                    },
                }],
            }],
        }
    }
}

/// Deriva a URL compartilhável de uma tripla, sem tocar a rede.
///
/// O payload é o JSON do estado de cliente em base64, no mesmo formato que
/// o próprio Compiler Explorer usa em seus links.
pub fn share_url(endpoint: &str, source: &str, compiler: &str, flags: &str) -> PalcoResult<String> {
    let state = ClientState::for_snippet(source, compiler, flags);
    let payload = serde_json::to_string(&state)?;

    Ok(format!(
        "{}/clientstate/{}",
        endpoint.trim_end_matches('/'),
        STANDARD.encode(payload)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "#include <stdio.h>\nint main() { printf(\"oi\\n\"); }\n";

    #[test]
    fn test_share_url_shape() {
        let url = share_url("https://godbolt.org", SOURCE, "cg141", "-O0").expect("url");
        assert!(url.starts_with("https://godbolt.org/clientstate/"));
    }

    #[test]
    fn test_share_url_roundtrip() {
        let url = share_url("https://godbolt.org", SOURCE, "cg141", "-O2 -Wall").expect("url");

        let payload = url
            .rsplit('/')
            .next()
            .expect("payload presente");
        let decoded = STANDARD.decode(payload).expect("base64 válido");
        let state: ClientState = serde_json::from_slice(&decoded).expect("json válido");

        // O payload reconstrói exatamente a tripla que gerou o link
        assert_eq!(state.sessions.len(), 1);
        let session = &state.sessions[0];
        assert_eq!(session.source, SOURCE);
        assert_eq!(session.language, "c");
        assert!(session.compilers.is_empty());
        assert_eq!(session.executors[0].compiler.id, "cg141");
        assert_eq!(session.executors[0].compiler.options, "-O2 -Wall");
    }

    #[test]
    fn test_share_url_is_pure() {
        let a = share_url("https://godbolt.org", SOURCE, "cg141", "-O0").expect("url");
        let b = share_url("https://godbolt.org", SOURCE, "cg141", "-O0").expect("url");
        assert_eq!(a, b);
    }
}
