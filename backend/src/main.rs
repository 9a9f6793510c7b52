//! Backend entry-point: configuration, adapter wiring, and the HTTP server.

use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::inbound::http::health::HealthState;
use backend::server::settings::ServerSettings;
use backend::server::{build_state, configure_api};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let state = build_state(&settings)
        .map_err(|e| std::io::Error::other(format!("failed to wire adapters: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the probe state stays shared.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new().wrap(Trace).configure({
            let state = state.clone();
            let health = server_health_state.clone();
            move |cfg| configure_api(cfg, state.clone(), health.clone())
        });

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(settings.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}
