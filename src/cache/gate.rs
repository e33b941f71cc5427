//! Gate de primeira execução por snippet.

use std::collections::HashSet;
use std::sync::Mutex;

/// Suprime a primeira invocação automática de cada snippet.
///
/// O renderer do host monta e dispara todos os runners embutidos ao
/// carregar a apresentação, inclusive os de slides fora de tela. Sem este
/// gate, cada bloco de código dispararia uma compilação remota no load da
/// página. A chave é a mesma do cache de compilação, então mudar
/// fonte/compilador/flags rearma a supressão para aquela variante.
#[derive(Debug, Default)]
pub struct RunGate {
    seen: Mutex<HashSet<String>>,
}

impl RunGate {
    /// Cria um gate vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna `true` se esta é a primeira observação da chave.
    ///
    /// A primeira observação fica registrada e o chamador deve renderizar
    /// apenas a decoração estática, sem chamada remota. O registro é
    /// permanente pelo tempo de vida do processo; não há expiração.
    pub fn first_run(&self, key: &str) -> bool {
        self.seen
            .lock()
            .expect("run gate mutex poisoned")
            .insert(key.to_string())
    }

    /// Número de chaves já observadas.
    pub fn seen_count(&self) -> usize {
        self.seen.lock().expect("run gate mutex poisoned").len()
    }

    /// Esquece todas as observações (reset entre casos de teste).
    pub fn reset(&self) {
        self.seen.lock().expect("run gate mutex poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_suppresses() {
        let gate = RunGate::new();

        assert!(gate.first_run("cg141:abc"));
        assert!(!gate.first_run("cg141:abc"));
        assert!(!gate.first_run("cg141:abc"));
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let gate = RunGate::new();

        assert!(gate.first_run("cg141:abc"));
        // Outra variante (flags diferentes geram outra chave) rearma o gate
        assert!(gate.first_run("cg141:def"));
        assert_eq!(gate.seen_count(), 2);
    }

    #[test]
    fn test_reset_forgets_observations() {
        let gate = RunGate::new();

        assert!(gate.first_run("k"));
        gate.reset();
        assert!(gate.first_run("k"));
    }
}
