//! Cliente HTTP para a API do Compiler Explorer (godbolt.org).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::base::CompilerClient;
use crate::types::config::GodboltConfig;
use crate::types::requests::CompileRequest;
use crate::types::responses::CompileResponse;
use crate::{PalcoError, PalcoResult};

/// Cliente da API de compilação do Compiler Explorer.
pub struct GodboltClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GodboltClient {
    /// Cria um cliente para o endpoint, com timeout de transporte padrão.
    pub fn new(endpoint: impl Into<String>) -> PalcoResult<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(60))
    }

    /// Cria um cliente com timeout de transporte explícito.
    ///
    /// O timeout é responsabilidade do transporte; o runner em si não
    /// impõe nenhum.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> PalcoResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Cria um cliente a partir da configuração.
    pub fn from_config(config: &GodboltConfig, timeout_secs: u64) -> PalcoResult<Self> {
        Self::with_timeout(&config.endpoint, Duration::from_secs(timeout_secs))
    }

    /// Endpoint base do serviço.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn compile_url(&self, compiler: &str) -> String {
        format!("{}/api/compiler/{}/compile", self.endpoint, compiler)
    }
}

#[async_trait]
impl CompilerClient for GodboltClient {
    fn name(&self) -> &str {
        "godbolt"
    }

    async fn compile(&self, request: &CompileRequest) -> PalcoResult<CompileResponse> {
        // Pede execução (não só compilação) com os filtros usuais de
        // apresentação: demangle e supressão de diretivas/comentários.
        let body = json!({
            "source": request.source,
            "options": {
                "userArguments": request.flags,
                "filters": {
                    "execute": true,
                    "intel": true,
                    "demangle": true,
                    "directives": true,
                    "commentOnly": true,
                },
            },
        });

        tracing::debug!(
            request_id = %request.request_id,
            compiler = %request.compiler,
            "Enviando snippet para o Compiler Explorer"
        );

        let response = self
            .client
            .post(self.compile_url(&request.compiler))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                request_id = %request.request_id,
                status = %status,
                "Compiler Explorer respondeu com erro"
            );
            return Err(PalcoError::Api(status.as_u16()));
        }

        let parsed = response.json::<CompileResponse>().await?;

        tracing::debug!(
            request_id = %request.request_id,
            has_exec = parsed.exec_result.is_some(),
            "Resposta do Compiler Explorer recebida"
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_url() {
        let client = GodboltClient::new("https://godbolt.org").expect("cliente");
        assert_eq!(
            client.compile_url("cg141"),
            "https://godbolt.org/api/compiler/cg141/compile"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = GodboltClient::new("https://godbolt.org/").expect("cliente");
        assert_eq!(client.endpoint(), "https://godbolt.org");
        assert_eq!(
            client.compile_url("cg141"),
            "https://godbolt.org/api/compiler/cg141/compile"
        );
    }
}
