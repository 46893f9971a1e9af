mod cli;
mod env;

use std::time::Duration;

use clap::Parser;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use env::Env;
use hypr_transcribe_sarvam::TranscribeConfig;

#[derive(clap::Parser)]
#[command(
    name = "stt-service",
    version,
    about = "Speech-to-text gateway powered by Sarvam AI"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Transcribe a local audio file and print the result as JSON
    Transcribe(cli::TranscribeArgs),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let env = Env::load()?;

    let _sentry = init_sentry(&env);
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => runtime.block_on(serve(env)),
        Command::Transcribe(args) => runtime.block_on(cli::transcribe(args, &env)),
    }
}

fn init_sentry(env: &Env) -> Option<sentry::ClientInitGuard> {
    let dsn = env.sentry.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(sentry::integrations::tracing::layer())
        .init();
}

async fn serve(env: Env) -> anyhow::Result<()> {
    let max_upload_bytes = usize::try_from(env.max_upload_bytes)?;
    let config = TranscribeConfig::new(&env.sarvam).with_max_upload_bytes(max_upload_bytes);
    config.log_api_key_status();

    let app = hypr_transcribe_sarvam::router(config)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any)
                .max_age(Duration::from_secs(3600)),
        );

    let addr = env.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        model = hypr_transcribe_sarvam::MODEL,
        "stt_service_listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("stt_service_stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "shutdown_signal_failed");
    }
}
