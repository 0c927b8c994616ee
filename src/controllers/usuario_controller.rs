//! Controller de Usuarios
//!
//! Administración de cuentas, reservada a administradores. Las cuentas
//! protegidas por configuración no pueden eliminarse ni degradarse.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::usuario_dto::UsuarioResponse;
use crate::middleware::auth::UsuarioAutenticado;
use crate::repositories::usuario_repository;
use crate::services::acceso_service::PoliticaAcceso;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct UsuarioController {
    pool: PgPool,
    politica: PoliticaAcceso,
}

impl UsuarioController {
    pub fn new(pool: PgPool, politica: PoliticaAcceso) -> Self {
        Self { pool, politica }
    }

    pub async fn listar(&self, principal: &UsuarioAutenticado) -> AppResult<Vec<UsuarioResponse>> {
        if !principal.admin {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }

        let usuarios = usuario_repository::listar(&self.pool).await?;
        Ok(usuarios.into_iter().map(UsuarioResponse::from).collect())
    }

    pub async fn eliminar(&self, id: Uuid, principal: &UsuarioAutenticado) -> AppResult<()> {
        if !self.politica.puede_administrar_usuario(principal, id) {
            return Err(AppError::Forbidden(
                "No puede eliminar esta cuenta".to_string(),
            ));
        }

        let eliminados = usuario_repository::eliminar(&self.pool, id).await?;
        if eliminados == 0 {
            return Err(not_found_error("Usuario", &id.to_string()));
        }
        Ok(())
    }

    pub async fn cambiar_admin(
        &self,
        id: Uuid,
        admin: bool,
        principal: &UsuarioAutenticado,
    ) -> AppResult<UsuarioResponse> {
        if !principal.admin {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }
        // la protección impide degradar, no promover
        if !admin && self.politica.es_protegido(id) {
            return Err(AppError::Forbidden(
                "Una cuenta protegida no puede degradarse".to_string(),
            ));
        }

        let usuario = usuario_repository::actualizar_admin(&self.pool, id, admin)
            .await?
            .ok_or_else(|| not_found_error("Usuario", &id.to_string()))?;

        Ok(usuario.into())
    }
}
