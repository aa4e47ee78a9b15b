use clap::Parser;
use unimatch::{catalog, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL of the match API backend.
    #[arg(long, env, default_value = "http://localhost:5001")]
    api_base_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Set the Secure attribute on session cookies.
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,unimatch=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let catalog = catalog::load()?;
    tracing::info!(
        "loaded questionnaire '{}' with {} questions",
        catalog.title,
        catalog.questions().count()
    );

    let state = AppState::new(catalog, &args.api_base_url, args.secure_cookies);
    let routes = unimatch::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, routes).await?;

    Ok(())
}
