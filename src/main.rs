use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use doc_scan::{
    config::Config,
    api::routes::create_router,
    client::{FormValues, HttpScanService, SearchSubmissionHandler, SubmissionOutcome},
    AppState,
};

#[derive(Parser)]
#[command(name = "doc-scan", about = "Scan the documents linked from a page for a keyword")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the scan API and the search page
    Serve,
    /// Submit one scan to a running service and print the rendered results
    Submit {
        #[arg(long)]
        url: String,
        #[arg(long)]
        keyword: String,
        /// Base URL of the scan service, defaults to SCAN_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Submit { url, keyword, endpoint } => {
            let endpoint = endpoint.unwrap_or_else(|| config.scan_endpoint.clone());
            submit(&endpoint, FormValues::new(url, keyword)).await
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server_addr = config.server_addr;
    let app = create_router(AppState::new(config)?);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn submit(endpoint: &str, form: FormValues) -> Result<(), Box<dyn std::error::Error>> {
    let service = HttpScanService::new(endpoint);
    tracing::info!("Using scan service at {}", service.scan_url());
    let mut handler = SearchSubmissionHandler::new(service);

    let outcome = handler.handle_submit(&form).await;
    if let Some(alert) = handler.surface().alert() {
        eprintln!("{}", alert);
    } else {
        println!("{}", handler.surface().results_html());
    }

    match outcome {
        SubmissionOutcome::Matches(_) => Ok(()),
        SubmissionOutcome::Invalid => Err("invalid submission".into()),
        SubmissionOutcome::Failed(err) => Err(err.into()),
    }
}
