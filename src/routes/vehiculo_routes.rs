use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::vehiculo_controller::VehiculoController;
use crate::dto::usuario_dto::ApiResponse;
use crate::dto::vehiculo_dto::{
    AppendHistorialRequest, CreateVehiculoRequest, UpdateVehiculoRequest, VehiculoFilters,
};
use crate::middleware::auth::{auth_middleware, UsuarioAutenticado};
use crate::models::historial::{EntradaHistorial, HistorialVehiculo};
use crate::models::vehiculo::{Vehiculo, VehiculoConImagenes};
use crate::services::notificacion_service;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::pagination::Paginado;

pub fn create_vehiculo_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(listar_vehiculos).post(crear_vehiculo))
        .route(
            "/:id",
            get(obtener_vehiculo)
                .put(actualizar_vehiculo)
                .delete(eliminar_vehiculo),
        )
        .route("/:id/historial", get(historial_completo))
        .route(
            "/:id/historial/:campo",
            get(listar_historial)
                .post(agregar_historial)
                .delete(vaciar_historial),
        )
        .route("/:id/historial/:campo/ultimo", delete(eliminar_ultima_entrada))
        .route("/:id/historial/:campo/:entrada_id", delete(eliminar_entrada))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn listar_vehiculos(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Query(filtros): Query<VehiculoFilters>,
) -> AppResult<Json<Paginado<VehiculoConImagenes>>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let pagina = controller.listar(filtros, &principal).await?;
    Ok(Json(pagina))
}

async fn obtener_vehiculo(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<VehiculoConImagenes>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let vehiculo = controller.obtener(id, &principal).await?;
    Ok(Json(vehiculo))
}

async fn crear_vehiculo(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Json(request): Json<CreateVehiculoRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<VehiculoConImagenes>>)> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let vehiculo = controller.crear(request, &principal).await?;

    // fan-out fuera de la transacción; nunca afecta la respuesta
    notificacion_service::notificar_admins(
        state.pool.clone(),
        "Vehículo creado".to_string(),
        format!("Se dio de alta el vehículo {}", vehiculo.vehiculo.dominio),
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            vehiculo,
            "Vehículo creado exitosamente".to_string(),
        )),
    ))
}

async fn actualizar_vehiculo(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehiculoRequest>,
) -> AppResult<Json<ApiResponse<Vehiculo>>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let vehiculo = controller.actualizar(id, request, &principal).await?;

    notificacion_service::notificar_admins(
        state.pool.clone(),
        "Vehículo actualizado".to_string(),
        format!("Se modificó el vehículo {}", vehiculo.dominio),
    );

    Ok(Json(ApiResponse::success_with_message(
        vehiculo,
        "Vehículo actualizado exitosamente".to_string(),
    )))
}

async fn eliminar_vehiculo(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    controller.eliminar(id, &principal).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn historial_completo(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<HistorialVehiculo>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let historial = controller.historial(id, &principal).await?;
    Ok(Json(historial))
}

async fn listar_historial(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path((id, campo)): Path<(Uuid, String)>,
) -> AppResult<Json<Vec<EntradaHistorial>>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let entradas = controller.listar_historial(id, &campo, &principal).await?;
    Ok(Json(entradas))
}

async fn agregar_historial(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path((id, campo)): Path<(Uuid, String)>,
    Json(request): Json<AppendHistorialRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EntradaHistorial>>)> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let entrada = controller
        .agregar_historial(id, &campo, &request.valor, &principal)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entrada))))
}

async fn eliminar_ultima_entrada(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path((id, campo)): Path<(Uuid, String)>,
) -> AppResult<Json<EntradaHistorial>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let entrada = controller
        .eliminar_ultima_entrada(id, &campo, &principal)
        .await?;
    Ok(Json(entrada))
}

async fn eliminar_entrada(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path((id, campo, entrada_id)): Path<(Uuid, String, i64)>,
) -> AppResult<Json<EntradaHistorial>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let entrada = controller
        .eliminar_entrada(id, &campo, entrada_id, &principal)
        .await?;
    Ok(Json(entrada))
}

async fn vaciar_historial(
    State(state): State<AppState>,
    Extension(principal): Extension<UsuarioAutenticado>,
    Path((id, campo)): Path<(Uuid, String)>,
) -> AppResult<Json<serde_json::Value>> {
    let controller = VehiculoController::new(state.pool.clone(), state.politica.clone());
    let eliminadas = controller.eliminar_coleccion(id, &campo, &principal).await?;
    Ok(Json(json!({
        "success": true,
        "eliminadas": eliminadas
    })))
}
