//! Interface de linha de comando do Palco.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Palco - runner de código C para apresentações de slides.
#[derive(Parser, Debug)]
#[command(name = "palco")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "palco.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compila e executa um snippet, anotando a saída por linha.
    Run {
        /// Arquivo com o snippet (stdin se omitido).
        file: Option<PathBuf>,

        /// Identificador do compilador no Compiler Explorer.
        #[arg(long)]
        compiler: Option<String>,

        /// Flags do compilador.
        #[arg(long, allow_hyphen_values = true)]
        flags: Option<String>,

        /// Imprime o fragmento HTML em vez da listagem anotada.
        #[arg(long)]
        html: bool,
    },

    /// Imprime o link compartilhável do Compiler Explorer (sem rede).
    Link {
        /// Arquivo com o snippet (stdin se omitido).
        file: Option<PathBuf>,

        /// Identificador do compilador no Compiler Explorer.
        #[arg(long)]
        compiler: Option<String>,

        /// Flags do compilador.
        #[arg(long, allow_hyphen_values = true)]
        flags: Option<String>,
    },

    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Mostra a configuração resolvida.
    Config,

    /// Mostra versão.
    Version,
}
