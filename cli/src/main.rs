//! CLI entrypoint for lyricsmith
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lyricsmith_application::{
    AnalyzeStyleUseCase, GenerationLogger, NoGenerationLogger, NoSessionObserver,
    SessionObserver, SongwritingSession, TextGenerator,
};
use lyricsmith_domain::GenerationRequest;
use lyricsmith_infrastructure::{
    ConfigLoader, FileConfig, JsonlGenerationLogger, RelayServer, shutdown_signal, text_generator,
};
use lyricsmith_presentation::{
    Cli, Command, ConsoleFormatter, ReplConfig, SessionRepl, SimpleObserver, SpinnerObserver,
    WriteArgs,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting lyricsmith");

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_config_issue(issue));
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Refusing to start with an invalid configuration");
    }

    match cli.command() {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Session => {
            let session = build_session(&config, observer(&config, cli.quiet))?;
            let repl_config = ReplConfig {
                show_progress: config.session.show_progress && !cli.quiet,
                history_file: config.session.history_file.clone(),
                include_production_cues: config.session.include_production_cues,
            };
            SessionRepl::new(session, repl_config).run().await?;
            Ok(())
        }
        Command::Write(args) => write(&config, args, cli.quiet).await,
        Command::Analyze { name } => {
            let use_case = AnalyzeStyleUseCase::new(generator(&config)?)
                .with_logger(transcript_logger(&config)?);
            let spinner = (!cli.quiet).then(|| SpinnerObserver::spinner("Analyzing the sound..."));
            let outcome = use_case.execute(&name).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            println!("{}", ConsoleFormatter::format_analysis(name.trim(), &outcome?));
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level, plus an optional log file.
///
/// `RUST_LOG` takes precedence over `-v` when set.
fn init_logging(verbose: u8, file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file.filter(|f| !f.trim().is_empty()) {
        Some(path) => {
            let path = Path::new(path);
            let name = path
                .file_name()
                .with_context(|| format!("logging.file '{}' has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

async fn serve(config: FileConfig, bind: Option<String>) -> Result<()> {
    let mut relay = config.relay.clone();
    if let Some(bind) = bind {
        relay.bind = bind;
    }

    let server = RelayServer::from_config(&relay, &config.provider)
        .await
        .with_context(|| format!("Cannot bind relay to {}", relay.bind))?;
    server.run(shutdown_signal()).await?;
    Ok(())
}

async fn write(config: &FileConfig, args: WriteArgs, quiet: bool) -> Result<()> {
    let mut request = GenerationRequest::new_song(args.artist, args.topic)
        .with_production_cues(!args.no_cues);
    if let Some(structure) = args.structure {
        request = request.with_structure_source(structure);
    }
    if let Some(path) = &args.inspiration_file {
        let lyrics = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read inspiration file {}", path.display()))?;
        request = request.with_inspiration(lyrics);
    }

    let session = build_session(config, observer(config, quiet))?;
    session.request_new_song(request).await?;

    let spinner = (!quiet && session.busy().style)
        .then(|| SpinnerObserver::spinner("Deriving style prompt..."));
    session.settle().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    println!("{}", ConsoleFormatter::format_song(&session.snapshot()));
    Ok(())
}

// === Dependency Injection ===

fn generator(config: &FileConfig) -> Result<Arc<dyn TextGenerator>> {
    Ok(text_generator(config)?)
}

fn transcript_logger(config: &FileConfig) -> Result<Arc<dyn GenerationLogger>> {
    match config.logging.transcript.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(path) => {
            let logger = JsonlGenerationLogger::open(path)
                .with_context(|| format!("Cannot open transcript {}", path))?;
            info!("Writing generation transcript to {}", logger.path().display());
            Ok(Arc::new(logger))
        }
        None => Ok(Arc::new(NoGenerationLogger)),
    }
}

fn observer(config: &FileConfig, quiet: bool) -> Arc<dyn SessionObserver> {
    if quiet {
        Arc::new(NoSessionObserver)
    } else if config.session.show_progress {
        Arc::new(SpinnerObserver::new())
    } else {
        Arc::new(SimpleObserver)
    }
}

fn build_session(
    config: &FileConfig,
    observer: Arc<dyn SessionObserver>,
) -> Result<SongwritingSession> {
    Ok(SongwritingSession::new(generator(config)?)
        .with_logger(transcript_logger(config)?)
        .with_observer(observer))
}
