use clap::Parser;
use mirage::adapters::health_handler::HealthHandler;
use mirage::cli::Cli;
use mirage::config::Settings;
use mirage::domain::schema::CompiledSchema;
use mirage::engine::fixtures::FixtureStore;
use mirage::engine::Engine;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Mirage fake API server on {}:{}", host, port);

    // Compile endpoint schemas; unknown generator tags and relationship
    // targets abort startup here rather than surfacing mid-request.
    let schema = CompiledSchema::compile(&settings).map_err(|errors| {
        let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::anyhow!(
            "Endpoint schema compilation failed:\n{}",
            error_messages.join("\n")
        )
    })?;
    info!("Compiled {} endpoint schemas", schema.len());

    // Load preset fixtures
    let fixtures = FixtureStore::load(&settings.fixtures_file);
    if !fixtures.is_empty() {
        info!(
            "Loaded preset fixtures for {} endpoints from {}",
            fixtures.endpoint_count(),
            settings.fixtures_file.display()
        );
    }

    let health_handler = Arc::new(HealthHandler::new(schema.len()));
    let engine = Arc::new(Engine::new(schema, fixtures));

    // Create application using the library function
    let app = mirage::create_app(engine, &settings.server.base_path, health_handler);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
