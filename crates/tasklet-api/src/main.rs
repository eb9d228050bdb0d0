use tasklet_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes). Fails before
    // binding the listener if the storage backend is unreachable.
    let (_state, router) = tasklet_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    tasklet_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
