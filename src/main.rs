use clap::Parser;
use palco::cli::{Cli, Commands};
use palco::types::config::Config;
use palco::PalcoResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> PalcoResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::load_or_default()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        // Use config value if no flag was specified
        config.general.log_level.clone()
    };

    // Initialize logging with appropriate level
    let filter = EnvFilter::from_default_env().add_directive(
        format!("palco={}", log_level)
            .parse()
            .unwrap_or_else(|_| "palco=info".parse().expect("fallback directive is valid")),
    );

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Run {
            file,
            compiler,
            flags,
            html,
        } => {
            palco::cli::commands::run(file, compiler, flags, html, &config).await?;
        }
        Commands::Link {
            file,
            compiler,
            flags,
        } => {
            palco::cli::commands::link_cmd(file, compiler, flags, &config).await?;
        }
        Commands::Init { path } => {
            palco::cli::commands::init(path).await?;
        }
        Commands::Config => {
            palco::cli::commands::config_cmd(&config).await?;
        }
        Commands::Version => {
            palco::cli::commands::version();
        }
    }

    Ok(())
}
