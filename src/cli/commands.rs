//! Implementação dos comandos CLI do Palco.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::client::link;
use crate::render;
use crate::types::config::{Config, RunnerOverrides};
use crate::types::responses::RunOutcome;
use crate::{PalcoResult, SnippetRunner};

/// Lê o snippet do arquivo indicado ou do stdin.
fn read_source(file: Option<&Path>) -> PalcoResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn overrides_from_args(compiler: Option<String>, flags: Option<String>) -> RunnerOverrides {
    RunnerOverrides {
        compiler,
        flags,
        ..Default::default()
    }
}

/// Compiles a snippet and prints the annotated listing (or HTML fragment).
pub async fn run(
    file: Option<PathBuf>,
    compiler: Option<String>,
    flags: Option<String>,
    html: bool,
    config: &Config,
) -> PalcoResult<()> {
    let source = read_source(file.as_deref())?;
    let overrides = overrides_from_args(compiler, flags);
    let runner = SnippetRunner::from_config(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Compilando via Compiler Explorer...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    // Gesto explícito do usuário: sem supressão de primeira execução
    let result = runner.run_now(&source, &overrides).await;
    spinner.finish_and_clear();

    let outcome = result?;

    if html {
        let opts = runner.defaults().merge(&overrides);
        println!("{}", render::fragment(&outcome, &opts));
        return Ok(());
    }

    print_outcome(&source, &outcome);
    Ok(())
}

/// Imprime a listagem anotada e as seções de saída.
fn print_outcome(source: &str, outcome: &RunOutcome) {
    let Some(view) = &outcome.compiled else {
        return;
    };

    if view.error_only() {
        eprintln!("Erro de compilação:\n");
        eprintln!("{}", view.stderr);
        return;
    }

    let width = source.lines().count().to_string().len();
    for (i, line) in source.lines().enumerate() {
        let number = i as u32 + 1;
        let annotation = view.annotations.iter().find(|a| a.line == number);

        match annotation {
            Some(a) => println!("{number:>width$} | {line}    // -> {}", a.text),
            None => println!("{number:>width$} | {line}"),
        }
    }

    if !view.stdout.is_empty() {
        println!("\n--- stdout ---");
        println!("{}", view.stdout.trim_end_matches('\n'));
    }
    if !view.stderr.is_empty() {
        println!("\n--- stderr ---");
        println!("{}", view.stderr.trim_end_matches('\n'));
    }

    if let Some(url) = &outcome.link {
        println!("\nCompiler Explorer: {url}");
    }
}

/// Imprime o link compartilhável sem contatar o serviço.
pub async fn link_cmd(
    file: Option<PathBuf>,
    compiler: Option<String>,
    flags: Option<String>,
    config: &Config,
) -> PalcoResult<()> {
    let source = read_source(file.as_deref())?;
    let opts = config.runner_options().merge(&overrides_from_args(compiler, flags));

    let url = link::share_url(
        &config.godbolt.endpoint,
        &source,
        &opts.compiler,
        &opts.flags,
    )?;
    println!("{url}");

    Ok(())
}

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> PalcoResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("palco.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'palco config' to inspect it.");
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Palco initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Adjust compiler/flags in palco.toml");
    println!("  2. Try it: echo 'int main() {{ puts(\"oi\"); }}' | palco run");

    Ok(())
}

/// Mostra a configuração resolvida.
pub async fn config_cmd(config: &Config) -> PalcoResult<()> {
    let content = toml::to_string_pretty(config)?;
    println!("{content}");
    Ok(())
}

/// Mostra a versão.
pub fn version() {
    println!("palco {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Runner de código C para apresentações de slides");
    println!("https://github.com/SamoraDC/palco");
}
