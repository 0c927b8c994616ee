//! Historial del vehículo
//!
//! Cada vehículo es dueño de siete colecciones hijas de tipo append-only:
//! kilometraje, service, reparaciones, destinos, rodados, notas e imágenes.
//! Las entradas nunca se actualizan in-place: se agregan y se borran.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Colecciones de historial soportadas. El despacho por nombre de campo se
/// resuelve contra este conjunto cerrado; un nombre desconocido se rechaza
/// en el borde con error de validación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoHistorial {
    Kilometraje,
    Service,
    Reparacion,
    Destino,
    Rodado,
    Nota,
    Imagen,
}

impl TipoHistorial {
    /// Resuelve el nombre de campo que usa la API.
    pub fn desde_campo(campo: &str) -> Option<Self> {
        match campo {
            "kilometros" => Some(Self::Kilometraje),
            "service" => Some(Self::Service),
            "reparaciones" => Some(Self::Reparacion),
            "destino" => Some(Self::Destino),
            "rodado" => Some(Self::Rodado),
            "descripcion" | "description" => Some(Self::Nota),
            "imagenes" => Some(Self::Imagen),
            _ => None,
        }
    }

    pub fn campo(self) -> &'static str {
        match self {
            Self::Kilometraje => "kilometros",
            Self::Service => "service",
            Self::Reparacion => "reparaciones",
            Self::Destino => "destino",
            Self::Rodado => "rodado",
            Self::Nota => "descripcion",
            Self::Imagen => "imagenes",
        }
    }

    pub fn tabla(self) -> &'static str {
        match self {
            Self::Kilometraje => "historial_kilometraje",
            Self::Service => "historial_service",
            Self::Reparacion => "historial_reparaciones",
            Self::Destino => "historial_destinos",
            Self::Rodado => "historial_rodados",
            Self::Nota => "notas",
            Self::Imagen => "imagenes",
        }
    }

    pub fn columna_valor(self) -> &'static str {
        match self {
            Self::Kilometraje => "kilometraje",
            Self::Imagen => "url",
            _ => "descripcion",
        }
    }

    pub fn columna_fecha(self) -> Option<&'static str> {
        match self {
            Self::Kilometraje => Some("fecha_km"),
            Self::Service => Some("fecha_service"),
            Self::Reparacion => Some("fecha_reparacion"),
            Self::Destino => Some("fecha_destino"),
            Self::Rodado => Some("fecha_rodado"),
            Self::Nota | Self::Imagen => None,
        }
    }

    /// Columna que define cuál es "la última entrada" de la colección.
    pub fn columna_orden(self) -> &'static str {
        self.columna_fecha().unwrap_or("id")
    }
}

/// Valor a insertar en una colección de historial.
#[derive(Debug, Clone, PartialEq)]
pub enum ValorHistorial {
    Kilometros(i64),
    Texto(String),
}

/// Fila de cualquiera de las colecciones, normalizada para la API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntradaHistorial {
    pub id: i64,
    pub vehiculo_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometraje: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<DateTime<Utc>>,
}

/// El historial completo del vehículo, cargado como una sola lectura del
/// agregado.
#[derive(Debug, Serialize)]
pub struct HistorialVehiculo {
    pub kilometraje: Vec<EntradaHistorial>,
    pub service: Vec<EntradaHistorial>,
    pub reparaciones: Vec<EntradaHistorial>,
    pub destinos: Vec<EntradaHistorial>,
    pub rodados: Vec<EntradaHistorial>,
    pub notas: Vec<EntradaHistorial>,
    pub imagenes: Vec<EntradaHistorial>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desde_campo_conocidos() {
        assert_eq!(TipoHistorial::desde_campo("kilometros"), Some(TipoHistorial::Kilometraje));
        assert_eq!(TipoHistorial::desde_campo("reparaciones"), Some(TipoHistorial::Reparacion));
        assert_eq!(TipoHistorial::desde_campo("description"), Some(TipoHistorial::Nota));
        assert_eq!(TipoHistorial::desde_campo("imagenes"), Some(TipoHistorial::Imagen));
    }

    #[test]
    fn test_desde_campo_desconocido() {
        assert_eq!(TipoHistorial::desde_campo("combustible"), None);
        assert_eq!(TipoHistorial::desde_campo(""), None);
    }

    #[test]
    fn test_campo_y_desde_campo_son_inversos() {
        let todos = [
            TipoHistorial::Kilometraje,
            TipoHistorial::Service,
            TipoHistorial::Reparacion,
            TipoHistorial::Destino,
            TipoHistorial::Rodado,
            TipoHistorial::Nota,
            TipoHistorial::Imagen,
        ];
        for tipo in todos {
            assert_eq!(TipoHistorial::desde_campo(tipo.campo()), Some(tipo));
        }
    }

    #[test]
    fn test_orden_de_notas_es_por_id() {
        assert_eq!(TipoHistorial::Nota.columna_orden(), "id");
        assert_eq!(TipoHistorial::Imagen.columna_orden(), "id");
        assert_eq!(TipoHistorial::Service.columna_orden(), "fecha_service");
    }
}
