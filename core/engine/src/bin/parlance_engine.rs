use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use parlance_core::service::{load_runtime_config, router, AppState};
use parlance_core::upstream::{
    DeepLHttpClient, RecognizeHttpClient, SpeechProvider, TranslationProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("parlance_config.toml"));

    println!("Loading config from: {}", config_path.display());

    // 2. Load the runtime config
    let config = load_runtime_config(&config_path)?;

    println!("Config loaded:");
    println!("  Speech endpoint: {}", config.speech.endpoint);
    println!("  Translate API: {}", config.translate.api_url);
    println!(
        "  Translate configured: {}",
        config.translate.api_key.is_some()
    );
    println!("  Service port: {}", config.service.port);

    // 3. Build the vendor clients
    let speech: Arc<dyn SpeechProvider> = Arc::new(RecognizeHttpClient::new(
        config.speech.endpoint.clone(),
        config.speech.api_key.clone(),
    ));
    let translate: Option<Arc<dyn TranslationProvider>> =
        config.translate.api_key.as_ref().map(|api_key| {
            Arc::new(DeepLHttpClient::new(
                config.translate.api_url.clone(),
                api_key.clone(),
            )) as Arc<dyn TranslationProvider>
        });
    if translate.is_none() {
        eprintln!("[WARN] No translate API key configured - /api/translate will answer 503");
    }

    // 4. Serve the adapter routes
    let app = router(AppState { speech, translate });

    let addr = format!("0.0.0.0:{}", config.service.port);
    println!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
