//! Backend entry-point: configuration, wiring, and the HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use catalog_backend::ApiDoc;
use catalog_backend::Trace;
use catalog_backend::domain::ports::{CategoryRepository, ComponentRepository, UserRepository};
use catalog_backend::inbound::http::api_scope;
use catalog_backend::inbound::http::health::{HealthState, live, ready};
use catalog_backend::outbound::persistence::{
    InMemoryCategoryRepository, InMemoryComponentRepository, InMemoryUserRepository,
};
use catalog_backend::server::build_state;
use catalog_backend::server::config::AppConfig;

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

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let users = Arc::new(InMemoryUserRepository::new());
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let components = Arc::new(InMemoryComponentRepository::new());

    #[cfg(feature = "example-data")]
    {
        use catalog_backend::domain::password::PasswordHasher;
        use catalog_backend::outbound::persistence::seed::seed_example_data;

        seed_example_data(
            users.as_ref(),
            categories.as_ref(),
            components.as_ref(),
            &PasswordHasher::new(config.bcrypt_cost()),
        )
        .await
        .map_err(std::io::Error::other)?;
    }

    let state = build_state(
        &config,
        Arc::clone(&users) as Arc<dyn UserRepository>,
        Arc::clone(&categories) as Arc<dyn CategoryRepository>,
        Arc::clone(&components) as Arc<dyn ComponentRepository>,
    );
    let state = web::Data::new(state);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(live)
            .service(ready);
        #[cfg(debug_assertions)]
        {
            app = app.service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }
        app
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "catalogue backend listening");
    health_state.mark_ready();
    server.run().await
}
