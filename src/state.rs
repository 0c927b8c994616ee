//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::acceso_service::PoliticaAcceso;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub politica: PoliticaAcceso,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let politica = PoliticaAcceso::nueva(config.usuarios_protegidos.clone());
        Self {
            pool,
            config,
            politica,
        }
    }
}
