mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚚 Gestión de Flota - API");
    info!("=========================");

    let config = EnvironmentConfig::desde_env();

    // Inicializar base de datos
    let pool = match database::connection::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::connection::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    let addr: SocketAddr = config.server_url().parse()?;

    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS permisivo en producción: configure CORS_ORIGINS");
    }

    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest(
            "/api/vehiculo",
            routes::vehiculo_routes::create_vehiculo_router(app_state.clone()),
        )
        .nest(
            "/api/usuario",
            routes::usuario_routes::create_usuario_router(app_state.clone()),
        )
        .layer(cors_middleware(&app_state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehiculo - Listar vehículos (filtros + paginación)");
    info!("   POST /api/vehiculo - Crear vehículo");
    info!("   GET  /api/vehiculo/:id - Obtener vehículo");
    info!("   PUT  /api/vehiculo/:id - Actualizar vehículo");
    info!("   DELETE /api/vehiculo/:id - Eliminar vehículo");
    info!("📋 Historial:");
    info!("   GET  /api/vehiculo/:id/historial - Historial completo");
    info!("   GET|POST|DELETE /api/vehiculo/:id/historial/:campo - Listar / agregar / vaciar");
    info!("   DELETE /api/vehiculo/:id/historial/:campo/ultimo - Borrar última entrada");
    info!("   DELETE /api/vehiculo/:id/historial/:campo/:entrada_id - Borrar una entrada");
    info!("👥 Usuarios (admin):");
    info!("   GET  /api/usuario - Listar usuarios");
    info!("   DELETE /api/usuario/:id - Eliminar usuario");
    info!("   PUT  /api/usuario/:id/admin - Promover/degradar usuario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint simple de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-management",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
