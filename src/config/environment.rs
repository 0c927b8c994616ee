//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use uuid::Uuid;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// Cuentas que no pueden eliminarse ni degradarse, por configuración.
    pub usuarios_protegidos: Vec<Uuid>,
}

impl EnvironmentConfig {
    pub fn desde_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            usuarios_protegidos: env::var("PROTECTED_USER_IDS")
                .map(|v| {
                    v.split(',')
                        .filter_map(|s| {
                            let s = s.trim();
                            if s.is_empty() {
                                return None;
                            }
                            match Uuid::parse_str(s) {
                                Ok(id) => Some(id),
                                Err(_) => {
                                    tracing::warn!("PROTECTED_USER_IDS: id inválido '{}'", s);
                                    None
                                }
                            }
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
