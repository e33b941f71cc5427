//! Tipos de requisição do Palco.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Requisição de compilação de um snippet.
///
/// A tripla (fonte, compilador, flags) define a unidade de compilação;
/// o `request_id` existe apenas para correlação de logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    /// ID único da requisição.
    pub request_id: String,

    /// Código-fonte do snippet.
    pub source: String,

    /// Identificador do compilador no Compiler Explorer.
    pub compiler: String,

    /// Flags de linha de comando passadas ao compilador.
    pub flags: String,
}

impl CompileRequest {
    /// Cria uma nova requisição de compilação.
    pub fn new(
        source: impl Into<String>,
        compiler: impl Into<String>,
        flags: impl Into<String>,
    ) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            source: source.into(),
            compiler: compiler.into(),
            flags: flags.into(),
        }
    }

    /// Chave de cache desta requisição.
    pub fn cache_key(&self) -> String {
        cache_key(&self.source, &self.compiler, &self.flags)
    }
}

/// Gera a chave de cache determinística de uma tripla (fonte, compilador, flags).
///
/// SHA-256 sobre os três campos separados por `\0`, em hexadecimal,
/// prefixado pelo id do compilador. Função pura: entradas idênticas sempre
/// produzem a mesma chave. Colisões são aceitas como troca de baixíssima
/// probabilidade pela compacidade do cache.
pub fn cache_key(source: &str, compiler: &str, flags: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update([0u8]);
    hasher.update(compiler.as_bytes());
    hasher.update([0u8]);
    hasher.update(flags.as_bytes());

    format!("{}:{}", compiler, hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let key1 = cache_key("int main() {}", "cg141", "-O0");
        let key2 = cache_key("int main() {}", "cg141", "-O0");

        // Mesma tripla = mesma chave
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_distinguishes_fields() {
        let base = cache_key("int main() {}", "cg141", "-O0");

        assert_ne!(base, cache_key("int main() { return 1; }", "cg141", "-O0"));
        assert_ne!(base, cache_key("int main() {}", "cclang1901", "-O0"));
        assert_ne!(base, cache_key("int main() {}", "cg141", "-O2"));
    }

    #[test]
    fn test_cache_key_no_separator_ambiguity() {
        // O separador \0 impede que campos "escorreguem" um para o outro
        let key1 = cache_key("ab", "c", "");
        let key2 = cache_key("a", "bc", "");

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_prefixed_with_compiler() {
        let key = cache_key("int main() {}", "cg141", "-O0");
        assert!(key.starts_with("cg141:"));
    }

    #[test]
    fn test_request_cache_key_matches_free_function() {
        let request = CompileRequest::new("int main() {}", "cg141", "-O0");
        assert_eq!(
            request.cache_key(),
            cache_key("int main() {}", "cg141", "-O0")
        );
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = CompileRequest::new("x", "cg141", "-O0");
        let b = CompileRequest::new("x", "cg141", "-O0");

        // IDs diferentes, mas a chave de cache é a mesma
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.cache_key(), b.cache_key());
    }
}
