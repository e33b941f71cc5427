//! # Palco
//!
//! Runner de código C para apresentações de slides.
//!
//! Palco compila snippets embutidos nos slides através da API do Compiler
//! Explorer (godbolt.org) e devolve ao host anotações inline por linha de
//! `printf`/`puts`, um painel compacto de stdout/stderr e um link
//! compartilhável para reproduzir o snippet fora da apresentação.
//!
//! O host monta e dispara todos os runners ao carregar a apresentação;
//! por isso a primeira invocação de cada snippet é suprimida e a
//! compilação só acontece quando o usuário pede explicitamente. Requisições
//! idênticas em voo são coalescidas e resultados ficam em cache pelo tempo
//! de vida do processo.
//!
//! ## Módulos
//!
//! - [`cache`] - Cache coalescido de compilações e gate de primeira execução
//! - [`cli`] - Interface de linha de comando
//! - [`client`] - Cliente HTTP do Compiler Explorer e links compartilháveis
//! - [`mapping`] - Mapeamento heurístico de saída para linhas do fonte
//! - [`render`] - Montagem do fragmento HTML final
//! - [`runner`] - Orquestração de uma invocação do runner
//! - [`types`] - Tipos compartilhados

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod mapping;
pub mod render;
pub mod runner;
pub mod types;

pub use runner::SnippetRunner;
pub use types::config::Config;
pub use types::errors::{PalcoError, PalcoResult};
