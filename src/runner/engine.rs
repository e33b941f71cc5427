//! Motor do runner de snippets.

use std::sync::Arc;

use crate::cache::{CacheStats, CompileCache, RunGate};
use crate::client::{link, CompilerClient, GodboltClient};
use crate::mapping;
use crate::render;
use crate::types::config::{Config, RunnerOptions, RunnerOverrides};
use crate::types::requests::{cache_key, CompileRequest};
use crate::types::responses::{CompileOutput, CompiledView, RunOutcome};
use crate::PalcoResult;

/// Runner de snippets embutidos.
///
/// Possui todo o estado de processo (cache de compilações e conjunto de
/// chaves vistas), criado vazio e descartado com o processo. É um objeto
/// injetado, não um singleton: cada teste cria o seu e pode resetá-lo.
pub struct SnippetRunner {
    client: Arc<dyn CompilerClient>,
    cache: CompileCache,
    gate: RunGate,
    defaults: RunnerOptions,
    endpoint: String,
}

impl SnippetRunner {
    /// Cria um runner com um cliente explícito.
    ///
    /// `endpoint` é usado apenas para montar links compartilháveis.
    pub fn new(
        client: Arc<dyn CompilerClient>,
        defaults: RunnerOptions,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cache: CompileCache::new(),
            gate: RunGate::new(),
            defaults,
            endpoint: endpoint.into(),
        }
    }

    /// Cria um runner com o cliente HTTP real, a partir da configuração.
    pub fn from_config(config: &Config) -> PalcoResult<Self> {
        let client = GodboltClient::from_config(&config.godbolt, config.general.timeout_secs)?;

        Ok(Self::new(
            Arc::new(client),
            config.runner_options(),
            config.godbolt.endpoint.clone(),
        ))
    }

    /// Opções padrão deste runner.
    pub fn defaults(&self) -> &RunnerOptions {
        &self.defaults
    }

    /// Executa uma invocação do runner para o snippet.
    ///
    /// A primeira observação de cada tripla (fonte, compilador, flags)
    /// retorna só a decoração estática, sem chamada remota; as seguintes
    /// compilam através do cache coalescido.
    pub async fn run(&self, source: &str, overrides: &RunnerOverrides) -> PalcoResult<RunOutcome> {
        let opts = self.defaults.merge(overrides);
        let key = cache_key(source, &opts.compiler, &opts.flags);

        let mut outcome = self.static_outcome(source, &opts)?;

        if self.gate.first_run(&key) {
            tracing::debug!(key = %key, "Primeira renderização: compilação suprimida");
            return Ok(outcome);
        }

        let output = self.compile_cached(&key, source, &opts).await?;
        outcome.compiled = Some(self.view_of(source, &output));

        Ok(outcome)
    }

    /// Compila imediatamente, ignorando o gate de primeira execução.
    ///
    /// Para invocações que já são um gesto explícito do usuário (CLI,
    /// botão de re-execução do host). Marca a chave como vista, então uma
    /// renderização automática posterior do mesmo snippet não dispara
    /// nova supressão.
    pub async fn run_now(
        &self,
        source: &str,
        overrides: &RunnerOverrides,
    ) -> PalcoResult<RunOutcome> {
        let opts = self.defaults.merge(overrides);
        let key = cache_key(source, &opts.compiler, &opts.flags);
        let _ = self.gate.first_run(&key);

        let mut outcome = self.static_outcome(source, &opts)?;
        let output = self.compile_cached(&key, source, &opts).await?;
        outcome.compiled = Some(self.view_of(source, &output));

        Ok(outcome)
    }

    /// Como [`run`](Self::run), mas já renderiza o fragmento HTML.
    pub async fn run_html(&self, source: &str, overrides: &RunnerOverrides) -> PalcoResult<String> {
        let opts = self.defaults.merge(overrides);
        let outcome = self.run(source, overrides).await?;
        Ok(render::fragment(&outcome, &opts))
    }

    /// Estatísticas do cache de compilações.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Descarta todo o estado (cache e gate), para isolar casos de teste.
    pub fn reset(&self) {
        self.cache.clear();
        self.gate.reset();
    }

    fn static_outcome(&self, source: &str, opts: &RunnerOptions) -> PalcoResult<RunOutcome> {
        let link = if opts.link {
            Some(link::share_url(
                &self.endpoint,
                source,
                &opts.compiler,
                &opts.flags,
            )?)
        } else {
            None
        };

        Ok(RunOutcome {
            link,
            max_width: opts.max_width.clone(),
            max_height: opts.max_height.clone(),
            compiled: None,
        })
    }

    async fn compile_cached(
        &self,
        key: &str,
        source: &str,
        opts: &RunnerOptions,
    ) -> PalcoResult<Arc<CompileOutput>> {
        let client = Arc::clone(&self.client);
        let request = CompileRequest::new(source, &opts.compiler, &opts.flags);

        self.cache
            .get_or_compile(key, move || async move {
                let response = client.compile(&request).await?;
                Ok(CompileOutput::from_response(&response))
            })
            .await
    }

    fn view_of(&self, source: &str, output: &CompileOutput) -> CompiledView {
        CompiledView {
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            annotations: mapping::map_output(source, &output.stdout_lines),
        }
    }
}
