//! Cache de compilações e gate de primeira execução.
//!
//! Este módulo guarda o estado de processo do runner: o cache coalescido
//! de compilações (uma requisição em voo por tripla, resultados retidos
//! pelo tempo de vida do processo) e o conjunto de chaves já observadas,
//! usado para suprimir a primeira renderização automática de cada snippet.

mod flight;
mod gate;

pub use flight::{CacheStats, CompileCache};
pub use gate::RunGate;
