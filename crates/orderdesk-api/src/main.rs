mod api_doc;
mod auth;
mod error;
mod handlers;
mod setup;
mod state;

use orderdesk_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    setup::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, routes)
    let (router, _state) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
