//! Repositorio de usuarios

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::usuario::Usuario;
use crate::utils::errors::{mapear_error_bd, AppResult};

pub async fn buscar_por_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Usuario>> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(mapear_error_bd)
}

pub async fn buscar_por_email(pool: &PgPool, email: &str) -> AppResult<Option<Usuario>> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(mapear_error_bd)
}

pub async fn listar(pool: &PgPool) -> AppResult<Vec<Usuario>> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY nombre ASC")
        .fetch_all(pool)
        .await
        .map_err(mapear_error_bd)
}

pub async fn eliminar(pool: &PgPool, id: Uuid) -> AppResult<u64> {
    let resultado = sqlx::query("DELETE FROM usuarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(mapear_error_bd)?;

    Ok(resultado.rows_affected())
}

pub async fn actualizar_admin(pool: &PgPool, id: Uuid, admin: bool) -> AppResult<Option<Usuario>> {
    sqlx::query_as::<_, Usuario>("UPDATE usuarios SET admin = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(admin)
        .fetch_optional(pool)
        .await
        .map_err(mapear_error_bd)
}
