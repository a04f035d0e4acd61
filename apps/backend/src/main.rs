use actix_web::{web, App, HttpServer};
use gameshelf_backend::config::db::{DbKind, RuntimeEnv};
use gameshelf_backend::infra::state::build_state;
use gameshelf_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use gameshelf_backend::routes;
use gameshelf_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // The environment is provided by the runtime (compose env_file, or
    // `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("BACKEND_PORT") {
        Ok(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                error!(value = %raw, "BACKEND_PORT must be a valid port number");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    let jwt_secret = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            error!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt_secret.as_bytes());

    let db_kind = match std::env::var("GAMESHELF_DB_KIND") {
        Ok(raw) => match raw.parse::<DbKind>() {
            Ok(kind) => kind,
            Err(e) => {
                error!(error = %e, "invalid GAMESHELF_DB_KIND");
                std::process::exit(1);
            }
        },
        Err(_) => DbKind::Postgres,
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, ?db_kind, "starting GameShelf backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
