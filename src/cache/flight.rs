//! Cache coalescido de compilações.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

use crate::types::errors::{PalcoError, PalcoResult};
use crate::types::responses::CompileOutput;

/// Resultado compartilhado entre chamadores coalescidos.
type SharedResult = Result<Arc<CompileOutput>, Arc<PalcoError>>;

/// Futuro compartilhado de uma compilação em voo ou concluída.
type SharedCompile = Shared<BoxFuture<'static, SharedResult>>;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número atual de entradas (em voo ou concluídas).
    pub size: usize,

    /// Número de acertos (cache hits, incluindo joins em voo).
    pub hits: u64,

    /// Número de falhas (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache de compilações com coalescência de requisições em voo.
///
/// Cada chave tem no máximo uma requisição remota pendente; chamadores
/// concorrentes da mesma chave aguardam a mesma operação e observam o
/// mesmo resultado. Falhas são removidas do mapa antes do erro ser
/// propagado, para que a próxima invocação recompile em vez de
/// reapresentar a falha. Sucessos ficam retidos indefinidamente: não há
/// TTL nem política de evicção, e o mapa cresce uma entrada por tripla
/// distinta pelo tempo de vida do processo.
pub struct CompileCache {
    entries: Arc<Mutex<HashMap<String, SharedCompile>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CompileCache {
    /// Cria um cache vazio.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Retorna o resultado para a chave, compilando no máximo uma vez.
    ///
    /// Se já existe uma entrada (em voo ou concluída), o chamador se junta
    /// a ela e `compile` nunca é invocado. Caso contrário `compile` produz
    /// o futuro da requisição remota, que roda numa tarefa própria: mesmo
    /// que todos os chamadores desistam, a operação termina e povoa o
    /// cache para usos futuros.
    pub async fn get_or_compile<F, Fut>(
        &self,
        key: &str,
        compile: F,
    ) -> PalcoResult<Arc<CompileOutput>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PalcoResult<CompileOutput>> + Send + 'static,
    {
        let shared = {
            let mut entries = self.entries.lock().expect("compile cache mutex poisoned");

            if let Some(existing) = entries.get(key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                existing.clone()
            } else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let shared = spawn_compile(Arc::clone(&self.entries), key.to_string(), compile());
                entries.insert(key.to_string(), shared.clone());
                shared
            }
        };

        shared.await.map_err(PalcoError::Shared)
    }

    /// Verifica se há entrada para a chave.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("compile cache mutex poisoned")
            .contains_key(key)
    }

    /// Número de entradas no cache.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("compile cache mutex poisoned")
            .len()
    }

    /// Verifica se o cache está vazio.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Limpa todo o cache (reset entre casos de teste).
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("compile cache mutex poisoned")
            .clear();
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for CompileCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispara a compilação numa tarefa e devolve o futuro compartilhável.
///
/// A evicção em caso de falha acontece dentro da tarefa, antes do erro
/// chegar aos chamadores: quando um deles observar a falha, a entrada já
/// saiu do mapa e uma nova invocação dispara uma nova requisição.
fn spawn_compile(
    entries: Arc<Mutex<HashMap<String, SharedCompile>>>,
    key: String,
    fut: impl Future<Output = PalcoResult<CompileOutput>> + Send + 'static,
) -> SharedCompile {
    let handle = tokio::spawn(async move {
        let result = fut.await;

        if let Err(e) = &result {
            tracing::debug!(key = %key, error = %e, "Compilação falhou; removendo entrada do cache");
            entries
                .lock()
                .expect("compile cache mutex poisoned")
                .remove(&key);
        }

        result.map(Arc::new).map_err(Arc::new)
    });

    async move {
        match handle.await {
            Ok(result) => result,
            Err(e) => Err(Arc::new(PalcoError::TaskLost(e.to_string()))),
        }
    }
    .boxed()
    .shared()
}
