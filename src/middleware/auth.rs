//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y construcción del principal que consumen los controllers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::unidad::Unidad;
use crate::models::usuario::Usuario;
use crate::repositories::usuario_repository;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub admin: bool,
    pub unidad: String,
    pub exp: usize,
    pub iat: usize,
}

/// Principal autenticado que se inyecta en las requests. Los controllers
/// confían en este valor tal cual llega.
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub id: Uuid,
    pub admin: bool,
    pub unidad: Unidad,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let claims = token_data.claims;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // El rol y la unidad se releen de la base por si cambiaron después de
    // emitido el token
    let usuario = usuario_repository::buscar_por_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let autenticado = UsuarioAutenticado {
        id: usuario.id,
        admin: usuario.admin,
        unidad: Unidad::nueva(usuario.unidad),
    };

    request.extensions_mut().insert(autenticado);

    Ok(next.run(request).await)
}

/// Función para generar JWT token
pub fn generar_token(usuario: &Usuario, config: &EnvironmentConfig) -> Result<String, AppError> {
    let ahora = chrono::Utc::now();
    let expira = ahora + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: usuario.id.to_string(),
        admin: usuario.admin,
        unidad: usuario.unidad.clone(),
        exp: expira.timestamp() as usize,
        iat: ahora.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}
