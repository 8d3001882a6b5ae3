//! Actix LocalAPIKey Demo Application
//!
//! Protects an API scope with the `localapikey` strategy.

mod handlers;

use std::io;

use actix_web::{web, App, HttpServer};
use env_logger::Env;

use actix_localapikey_core::http::error::ConfigurationError;
use actix_localapikey_core::http::security::local_api_key::{
    LocalApiKeyConfig, LocalApiKeyStrategy, STRATEGY_NAME,
};
use actix_localapikey_core::http::security::StrategyTransform;

/// Environment variable holding the strategy configuration as JSON,
/// e.g. `{"apikeyField": "user[apikey]", "passReqToCallback": true}`.
const CONFIG_ENV: &str = "LOCALAPIKEY_CONFIG";

fn load_config() -> io::Result<LocalApiKeyConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(json) => LocalApiKeyConfig::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
        Err(_) => Ok(LocalApiKeyConfig::default()),
    }
}

fn strategy(
    config: LocalApiKeyConfig,
) -> Result<LocalApiKeyStrategy<clients::Client>, ConfigurationError> {
    let verify = if config.should_pass_req_to_callback() {
        clients::verify_with_request()
    } else {
        clients::verify()
    };
    LocalApiKeyStrategy::builder().config(config).verify(verify).build()
}

fn print_startup_info(config: &LocalApiKeyConfig) {
    let field = config.get_apikey_field();
    println!("=== Actix LocalAPIKey Demo ===");
    println!();
    println!("Server: http://127.0.0.1:8080");
    println!();
    println!("Strategy:");
    println!("  field:             {}", field);
    println!("  passReqToCallback: {}", config.should_pass_req_to_callback());
    println!();
    println!("Known keys: {}", clients::keys().join(", "));
    println!("Outage key: {} (verify error)", clients::OUTAGE_KEY);
    println!();
    println!("Routes:");
    println!("  GET  /health      - Public");
    println!("  GET  /api/whoami  - API key in query");
    println!("  POST /api/echo    - API key in JSON or form body");
    println!();
    println!("Examples:");
    println!("  curl 'http://127.0.0.1:8080/api/whoami?{}=sk_live_reporting'", field);
    println!("  curl http://127.0.0.1:8080/api/whoami                        # 400");
    println!("  curl 'http://127.0.0.1:8080/api/whoami?{}=nope'              # 401", field);
    println!(
        "  curl -H 'Content-Type: application/json' -d '{{\"apikey\":\"sk_live_billing\"}}' http://127.0.0.1:8080/api/echo"
    );
    println!();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = load_config()?;
    print_startup_info(&config);
    let strategy = strategy(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    log::info!("Starting server with strategy '{}'", STRATEGY_NAME);

    HttpServer::new(move || {
        App::new()
            // Public routes
            .service(handlers::public::health)
            // API routes (key required)
            .service(
                web::scope("/api")
                    .wrap(StrategyTransform::new(strategy.clone()))
                    .service(handlers::api::whoami)
                    .service(handlers::api::echo),
            )
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
