use serde::Deserialize;
use validator::Validate;

use crate::models::historial::{TipoHistorial, ValorHistorial};
use crate::utils::errors::AppResult;
use crate::utils::validation::{parsear_kilometros, texto_presente};

// Request para crear un vehículo. Los campos de historial son opcionales y
// generan una entrada cada uno en la misma transacción del alta.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateVehiculoRequest {
    #[validate(custom = "crate::utils::validation::validar_dominio")]
    pub dominio: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub tipo: Option<String>,
    pub chasis: Option<String>,
    pub motor: Option<String>,
    pub cedula: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub chofer: Option<String>,
    pub kilometros: Option<String>,
    pub service: Option<String>,
    pub rodado: Option<String>,
    pub reparaciones: Option<String>,
    pub descripcion: Option<String>,
    pub destino: Option<String>,
    pub imagenes: Option<Vec<String>>,
}

impl CreateVehiculoRequest {
    /// Entradas de historial presentes en el alta (sin las imágenes, que se
    /// insertan en lote aparte).
    pub fn entradas_historial(&self) -> AppResult<Vec<(TipoHistorial, ValorHistorial)>> {
        entradas_de_campos(
            &self.kilometros,
            &self.service,
            &self.rodado,
            &self.reparaciones,
            &self.descripcion,
            &self.destino,
        )
    }

    /// URLs de imágenes no vacías enviadas en el alta.
    pub fn urls_imagenes(&self) -> Vec<String> {
        urls_no_vacias(&self.imagenes)
    }
}

// Request para actualizar un vehículo. Todo es opcional: cadena vacía o
// campo ausente significa "no enviado", nunca "borrar este campo".
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehiculoRequest {
    pub dominio: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub tipo: Option<String>,
    pub chasis: Option<String>,
    pub motor: Option<String>,
    pub cedula: Option<String>,
    pub title: Option<String>,
    pub chofer: Option<String>,
    pub kilometros: Option<String>,
    pub service: Option<String>,
    pub rodado: Option<String>,
    pub reparaciones: Option<String>,
    pub descripcion: Option<String>,
    pub destino: Option<String>,
    pub imagenes: Option<Vec<String>>,
}

/// Campos escalares del vehículo: se aplican con una sola actualización
/// in-place sobre la fila padre.
#[derive(Debug, Default, PartialEq)]
pub struct CamposEscalares {
    pub dominio: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub tipo: Option<String>,
    pub chasis: Option<String>,
    pub motor: Option<String>,
    pub cedula: Option<String>,
    pub title: Option<String>,
    pub chofer: Option<String>,
}

impl CamposEscalares {
    pub fn esta_vacio(&self) -> bool {
        *self == Self::default()
    }
}

impl UpdateVehiculoRequest {
    /// Clasifica cada campo presente del payload: o es un escalar del padre
    /// (update in-place) o es un campo de historial (una entrada nueva,
    /// nunca se modifica una entrada existente).
    pub fn clasificar(&self) -> AppResult<(CamposEscalares, Vec<(TipoHistorial, ValorHistorial)>)> {
        let escalares = CamposEscalares {
            dominio: texto_presente(&self.dominio),
            marca: texto_presente(&self.marca),
            modelo: texto_presente(&self.modelo),
            anio: self.anio,
            tipo: texto_presente(&self.tipo),
            chasis: texto_presente(&self.chasis),
            motor: texto_presente(&self.motor),
            cedula: texto_presente(&self.cedula),
            title: texto_presente(&self.title),
            chofer: texto_presente(&self.chofer),
        };

        let entradas = entradas_de_campos(
            &self.kilometros,
            &self.service,
            &self.rodado,
            &self.reparaciones,
            &self.descripcion,
            &self.destino,
        )?;

        Ok((escalares, entradas))
    }

    pub fn urls_imagenes(&self) -> Vec<String> {
        urls_no_vacias(&self.imagenes)
    }
}

fn entradas_de_campos(
    kilometros: &Option<String>,
    service: &Option<String>,
    rodado: &Option<String>,
    reparaciones: &Option<String>,
    descripcion: &Option<String>,
    destino: &Option<String>,
) -> AppResult<Vec<(TipoHistorial, ValorHistorial)>> {
    let mut entradas = Vec::new();

    if let Some(km) = texto_presente(kilometros) {
        entradas.push((
            TipoHistorial::Kilometraje,
            ValorHistorial::Kilometros(parsear_kilometros(&km)?),
        ));
    }

    let textuales = [
        (TipoHistorial::Service, service),
        (TipoHistorial::Rodado, rodado),
        (TipoHistorial::Reparacion, reparaciones),
        (TipoHistorial::Nota, descripcion),
        (TipoHistorial::Destino, destino),
    ];
    for (tipo, valor) in textuales {
        if let Some(texto) = texto_presente(valor) {
            entradas.push((tipo, ValorHistorial::Texto(texto)));
        }
    }

    Ok(entradas)
}

fn urls_no_vacias(imagenes: &Option<Vec<String>>) -> Vec<String> {
    imagenes
        .iter()
        .flatten()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

// Filtros de búsqueda para el listado de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehiculoFilters {
    pub dominio: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub tipo: Option<String>,
    pub anio: Option<i32>,
    /// Filtro explícito de unidad; si está presente gana sobre la unidad
    /// propia del usuario.
    pub title: Option<String>,
    /// Búsqueda parcial sobre el historial de destinos.
    pub destino: Option<String>,
    pub pagina: Option<i64>,
    pub limite: Option<i64>,
}

// Request para agregar una entrada de historial suelta
#[derive(Debug, Deserialize)]
pub struct AppendHistorialRequest {
    pub valor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clasificar_escalar_e_historial() {
        let request = UpdateVehiculoRequest {
            modelo: Some("Hilux".to_string()),
            kilometros: Some("500".to_string()),
            ..Default::default()
        };

        let (escalares, entradas) = request.clasificar().unwrap();
        assert_eq!(escalares.modelo, Some("Hilux".to_string()));
        assert_eq!(escalares.dominio, None);
        assert_eq!(
            entradas,
            vec![(TipoHistorial::Kilometraje, ValorHistorial::Kilometros(500))]
        );
    }

    #[test]
    fn test_cadena_vacia_equivale_a_no_enviado() {
        let request = UpdateVehiculoRequest {
            marca: Some(String::new()),
            service: Some("   ".to_string()),
            ..Default::default()
        };

        let (escalares, entradas) = request.clasificar().unwrap();
        assert!(escalares.esta_vacio());
        assert!(entradas.is_empty());
    }

    #[test]
    fn test_kilometros_invalido_es_error_de_validacion() {
        let request = UpdateVehiculoRequest {
            kilometros: Some("mucho".to_string()),
            ..Default::default()
        };
        assert!(request.clasificar().is_err());

        let request = UpdateVehiculoRequest {
            kilometros: Some("-200".to_string()),
            ..Default::default()
        };
        assert!(request.clasificar().is_err());
    }

    #[test]
    fn test_varios_campos_de_historial() {
        let request = UpdateVehiculoRequest {
            destino: Some("Mendoza".to_string()),
            reparaciones: Some("Cambio de embrague".to_string()),
            descripcion: Some("Observación general".to_string()),
            ..Default::default()
        };

        let (escalares, entradas) = request.clasificar().unwrap();
        assert!(escalares.esta_vacio());
        assert_eq!(entradas.len(), 3);
        assert!(entradas
            .iter()
            .any(|(tipo, _)| *tipo == TipoHistorial::Destino));
        assert!(entradas.iter().any(|(tipo, _)| *tipo == TipoHistorial::Nota));
    }

    #[test]
    fn test_urls_imagenes_filtra_vacias() {
        let request = CreateVehiculoRequest {
            imagenes: Some(vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "  ".to_string(),
            ]),
            ..Default::default()
        };
        assert_eq!(request.urls_imagenes(), vec!["https://cdn.example.com/a.jpg"]);
    }
}
