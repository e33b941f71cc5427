//! Orquestração de uma invocação do runner.
//!
//! O [`SnippetRunner`] é o objeto de serviço que o host injeta e invoca
//! com (fonte, opções): resolve as opções, consulta o gate de primeira
//! execução, compila via cache coalescido e deriva as anotações por
//! linha. Máquina de estados por configuração de snippet:
//!
//! ```text
//! não-visto -> visto-sem-execução -> compilando -> sucesso | falha
//! ```
//!
//! `falha` volta a `compilando` no próximo gesto do usuário (a entrada do
//! cache foi removida); `sucesso` é terminal pela sessão e os gestos
//! seguintes reutilizam o resultado em cache.

mod engine;

pub use engine::SnippetRunner;
