use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::unidad::{Unidad, UnidadFlags};
use crate::models::usuario::Usuario;

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Response de login con el token bearer
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

// Response de usuario (sin password). Las banderas de unidad se derivan de
// la etiqueta canónica para los consumidores legados.
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub admin: bool,
    pub unidad: String,
    #[serde(flatten)]
    pub flags: UnidadFlags,
    pub created_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        let flags = Unidad::nueva(usuario.unidad.clone()).flags();
        Self {
            id: usuario.id,
            nombre: usuario.nombre,
            email: usuario.email,
            admin: usuario.admin,
            unidad: usuario.unidad,
            flags,
            created_at: usuario.created_at,
        }
    }
}

// Request para promover o degradar un usuario
#[derive(Debug, Deserialize)]
pub struct CambiarAdminRequest {
    pub admin: bool,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
