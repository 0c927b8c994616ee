//! Modelo de Vehículo
//!
//! Este módulo contiene el struct Vehiculo que mapea a la tabla vehiculos.
//! El campo `title` es la etiqueta de unidad organizacional del vehículo y
//! gobierna quién puede verlo o modificarlo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::unidad::Unidad;

/// Vehículo principal - mapea a la tabla vehiculos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: Uuid,
    pub dominio: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub tipo: Option<String>,
    pub chasis: Option<String>,
    pub motor: Option<String>,
    pub cedula: Option<String>,
    pub title: String,
    /// Nombre visible del chofer; texto plano, no una referencia a usuarios.
    pub chofer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehiculo {
    pub fn unidad(&self) -> Unidad {
        Unidad::nueva(self.title.clone())
    }
}

/// Proyección plana para la API: el vehículo con sus URLs de imágenes en
/// lugar de las filas crudas del join.
#[derive(Debug, Serialize)]
pub struct VehiculoConImagenes {
    #[serde(flatten)]
    pub vehiculo: Vehiculo,
    pub imagenes: Vec<String>,
}
