//! Chaos Player - composition root binary.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/player`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chaos_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Chaos Player");

    let config = chaos_player::ClientConfig::from_env();
    chaos_player::infrastructure::platform::run(config).await?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting Chaos Player");

    match chaos_player::infrastructure::platform::launch(chaos_player::ClientConfig::default()) {
        // The client lives as long as the page; leak it to keep the handlers attached.
        Ok(client) => std::mem::forget(client),
        Err(e) => tracing::error!("Failed to start client: {:?}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
