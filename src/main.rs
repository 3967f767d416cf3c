use std::process;
use std::sync::Arc;

use points_eval::config::Settings;
use points_eval::{eval, server};

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = Settings::default();
    let evaluator = match eval::bootstrap(&settings) {
        Ok(evaluator) => Arc::new(evaluator),
        Err(e) => {
            log::error!("startup failed: {}", e);
            process::exit(1);
        }
    };

    log::info!("listening on {}", settings.bind_addr);
    let app = server::app(evaluator);
    if let Err(e) = axum::Server::bind(&settings.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("server error: {}", e);
        process::exit(1);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("shutting down");
    }
}
