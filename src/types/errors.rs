//! Tipos de erro do Palco.

use std::sync::Arc;

use thiserror::Error;

/// Tipo de resultado padrão do Palco.
pub type PalcoResult<T> = Result<T, PalcoError>;

/// Erros possíveis no Palco.
///
/// Diagnósticos de compilação NÃO são erros: uma resposta HTTP bem-sucedida
/// com stderr do compilador vira texto visível para o usuário, nunca uma
/// variante daqui.
#[derive(Error, Debug)]
pub enum PalcoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de transporte HTTP: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Compiler Explorer respondeu com status {0}")]
    Api(u16),

    #[error("Tarefa de compilação perdida: {0}")]
    TaskLost(String),

    /// Falha observada por chamadores coalescidos da mesma compilação.
    #[error("{0}")]
    Shared(Arc<PalcoError>),

    #[error("{0}")]
    Other(String),
}

impl PalcoError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
