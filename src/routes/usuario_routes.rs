use axum::{
    extract::{Extension, Path, State},
    middleware,
    routing::{delete, get, put},
    Json, Router,
};
use http::StatusCode;
use uuid::Uuid;

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::usuario_dto::{CambiarAdminRequest, UsuarioResponse};
use crate::middleware::auth::{auth_middleware, UsuarioAutenticado};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_usuario_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(listar_usuarios))
        .route("/:id", delete(eliminar_usuario))
        .route("/:id/admin", put(cambiar_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn listar_usuarios(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
) -> AppResult<Json<Vec<UsuarioResponse>>> {
    let controller = UsuarioController::new(state.pool.clone(), state.politica.clone());
    let usuarios = controller.listar(&principal).await?;
    Ok(Json(usuarios))
}

async fn eliminar_usuario(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let controller = UsuarioController::new(state.pool.clone(), state.politica.clone());
    controller.eliminar(id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cambiar_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
    Json(request): Json<CambiarAdminRequest>,
) -> AppResult<Json<UsuarioResponse>> {
    let controller = UsuarioController::new(state.pool.clone(), state.politica.clone());
    let usuario = controller
        .cambiar_admin(id, request.admin, &principal)
        .await?;
    Ok(Json(usuario))
}
