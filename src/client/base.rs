//! Trait base para clientes de compilação remota.

use async_trait::async_trait;

use crate::types::requests::CompileRequest;
use crate::types::responses::CompileResponse;
use crate::PalcoResult;

/// Cliente de um serviço remoto de compilação e execução.
///
/// O runner só conhece esta interface; a seam existe para os testes
/// substituírem o serviço real por um dublê que conta chamadas ou devolve
/// respostas fixas.
#[async_trait]
pub trait CompilerClient: Send + Sync {
    /// Nome do serviço (para logs).
    fn name(&self) -> &str;

    /// Compila e executa o snippet, retornando a resposta bruta.
    ///
    /// Uma única requisição de rede, sem retry: a nova tentativa só
    /// acontece porque o cache remove entradas que falharam.
    async fn compile(&self, request: &CompileRequest) -> PalcoResult<CompileResponse>;
}
