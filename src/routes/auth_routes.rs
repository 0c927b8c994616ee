use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::usuario_dto::{LoginRequest, LoginResponse, UsuarioResponse};
use crate::middleware::auth::{auth_middleware, generar_token, UsuarioAutenticado};
use crate::repositories::usuario_repository;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(datos): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    datos.validate().map_err(AppError::Validation)?;

    let usuario = usuario_repository::buscar_por_email(&state.pool, &datos.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

    let valido = bcrypt::verify(&datos.password, &usuario.password_hash)
        .map_err(|e| AppError::Internal(format!("Error verificando credenciales: {}", e)))?;
    if !valido {
        return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
    }

    let token = generar_token(&usuario, &state.config)?;

    Ok(Json(LoginResponse {
        token,
        usuario: usuario.into(),
    }))
}

async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = usuario_repository::buscar_por_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    Ok(Json(usuario.into()))
}
