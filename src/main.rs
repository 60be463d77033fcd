// Main entry point
use clap::Parser;
use colored::Colorize;
use commit_progress::domain::error::ProgressError;
use commit_progress::domain::model::{Progress, ProgressSource, RawQuery};
use commit_progress::infrastructure::config::{self, load_config, Config};
use commit_progress::interfaces::cli::Cli;
use commit_progress::interfaces::http::create_app;
use commit_progress::presentation::{badge, theme::Theme};
use commit_progress::{AppState, QueryOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let state = AppState::from_config(config.clone()).await?;

    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    if cli.serve {
        return serve(state, &cli).await;
    }

    let raw = RawQuery {
        username: cli.username.clone(),
        year: cli.year.clone(),
        target: cli.target.clone(),
    };
    let options = QueryOptions {
        no_cache: cli.nocache,
    };
    let result = state.service.query_progress(&raw, options).await;

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    if cli.svg {
        let svg = match &result {
            Ok(progress) => badge::render_progress(progress.percentage, &theme),
            Err(e) => badge::render_failure(e, &theme),
        };
        print!("{}", svg);
        return exit_for(&result);
    }

    match &result {
        Ok(progress) if cli.json => println!("{}", serde_json::to_string_pretty(progress)?),
        Ok(progress) => println!("{}", format_progress(progress)),
        Err(e) if cli.json => {
            let message = match e {
                ProgressError::SubjectNotFound(_) => badge::NOT_FOUND_TEXT.to_string(),
                other => other.to_string(),
            };
            println!("{}", serde_json::json!({ "error": message }));
        }
        Err(ProgressError::SubjectNotFound(user)) => {
            eprintln!("{}", format!("✘ user not found: {}", user).red())
        }
        Err(e) => eprintln!("{}", format!("✘ {}", e).red()),
    }

    exit_for(&result)
}

fn exit_for(result: &Result<Progress, ProgressError>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_client_error() => std::process::exit(2),
        Err(_) => std::process::exit(1),
    }
}

fn format_progress(progress: &Progress) -> String {
    let source = match progress.source {
        ProgressSource::MemoryCache => "[memory cache]",
        ProgressSource::PersistentCache => "[cache]",
        ProgressSource::Online => "[online]",
    };
    let percentage = format!("{}%", progress.percentage);
    let percentage = if progress.percentage >= 100 {
        percentage.green().bold()
    } else {
        percentage.yellow().bold()
    };
    format!(
        "{} {} {} / {} contributions in {} {}",
        progress.username.bright_magenta().bold(),
        percentage,
        progress.count,
        progress.target,
        progress.year,
        source.cyan()
    )
}

async fn serve(state: AppState, cli: &Cli) -> anyhow::Result<()> {
    let host = cli
        .host
        .clone()
        .unwrap_or_else(|| state.config.server.host.clone());
    let port = cli.port.unwrap_or(state.config.server.port);

    let listener = TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    eprintln!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    eprintln!("\nShutting down...");
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = logging.path.as_deref().filter(|p| !p.is_empty()) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
        return Ok(());
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    let cfg: &Config = &state.config;

    println!("{}", "commit-progress Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match state.service.store() {
        Some(store) => println!(
            "Persistent Cache: {} ({} entries)",
            config::get_database_path(cfg).display(),
            store.count().await?
        ),
        None => println!("Persistent Cache: Disabled"),
    }

    println!("Memory Cache: {} entries", state.service.cache().len());
    println!("TTL: {}s", state.service.cache().ttl().as_secs());
    println!("Upstream: {}", cfg.upstream.base_url);

    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    Ok(())
}
