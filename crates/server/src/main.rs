use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use server::{
    api_routes, app_with, config::Config, state::AppState, utils::shutdown::shutdown_signal,
};
use tower::ServiceBuilder;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env().expect("Invalid configuration");

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to the database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        info!("Migrations applied");
    }

    let mut api = api_routes();

    if let Some(issuer_url) = &config.oidc_issuer_url {
        let oauth2_resource_server = <OAuth2ResourceServer>::builder()
            .issuer_url(issuer_url.as_str())
            .build()
            .await
            .expect("Failed to build OAuth2ResourceServer");

        api = api.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));
        info!("JWT validation enabled for issuer {issuer_url}");
    }

    let app = app_with(AppState::new(db), api);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
