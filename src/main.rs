use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use mri_synth::Pipeline;
use synthmri::api;
use synthmri::models::AppConfig;
use synthmri::server;

#[derive(Parser)]
#[command(name = "synthmri")]
#[command(about = "Synthetic MRI generator - upload a grayscale image, get a stylized scan back")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Run the synthesis pipeline on a local file
    Generate {
        /// Source image (any common format, any size)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JPEG path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Synthetic MRI Generator API",
        description = "Upload a grayscale image and receive a synthetic MRI-style scan",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_upload, api::handle_gallery),
    components(schemas(api::UploadForm, api::UploadResponse, api::GalleryResponse)),
    tags(
        (name = "Generation", description = "Synthetic image generation"),
        (name = "Gallery", description = "Previously generated images")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { input, output }) => run_generate_command(&input, &output),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Run the pipeline directly on a file (no server needed)
fn run_generate_command(input: &Path, output: &Path) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synthmri=warn,mri_synth=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    Pipeline::default()
        .generate_file(input, output)
        .map_err(|e| anyhow::anyhow!("Generation failed: {e}"))?;

    println!("Generated {}", output.display());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config = AppConfig::from_env();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("synthmri v{VERSION} - Synthetic MRI generator\n");

    println!("Configuration:");
    println!(
        "  CONFIG_FILE      = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!("  BIND_ADDR        = {}", config.bind_addr);
    println!("  STATIC_DIR       = {}", config.static_dir.display());
    println!("  MAX_UPLOAD_BYTES = {}", config.max_upload_bytes);

    println!("\nCommands:");
    println!("  synthmri serve      Start the HTTP server");
    println!("  synthmri generate   Run the pipeline on a local file");
    println!("\nRun 'synthmri --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synthmri=debug,mri_synth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        static_dir = %config.static_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    let state = server::create_app_state(config).await?;

    // OpenAPI documentation (production only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "synthmri server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
