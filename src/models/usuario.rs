//! Modelo de Usuario
//!
//! Mapea a la tabla usuarios. La contraseña viaja siempre como hash bcrypt;
//! el rol es un booleano `admin` y la pertenencia organizacional es la
//! etiqueta `unidad`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
    pub unidad: String,
    pub created_at: DateTime<Utc>,
}
