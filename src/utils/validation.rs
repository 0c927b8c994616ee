//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use validator::ValidationError;

use crate::utils::errors::{validation_error, AppResult};

/// Parseo estricto del kilometraje: acepta solamente un entero no negativo.
///
/// El valor llega como texto desde los formularios; un valor no numérico o
/// negativo se rechaza en lugar de almacenarse como nulo.
pub fn parsear_kilometros(valor: &str) -> AppResult<i64> {
    valor
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|km| *km >= 0)
        .ok_or_else(|| validation_error("kilometros", "debe ser un entero no negativo"))
}

/// Normaliza un campo de texto opcional: cadena vacía o solo espacios
/// equivale a "campo no enviado".
pub fn texto_presente(valor: &Option<String>) -> Option<String> {
    valor
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Validar formato de dominio (patente) del vehículo
pub fn validar_dominio(value: &str) -> Result<(), ValidationError> {
    let limpio = value.replace([' ', '-', '_'], "");
    if limpio.len() < 5 || limpio.len() > 10 {
        let mut error = ValidationError::new("dominio");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsear_kilometros_valido() {
        assert_eq!(parsear_kilometros("500").unwrap(), 500);
        assert_eq!(parsear_kilometros(" 0 ").unwrap(), 0);
    }

    #[test]
    fn test_parsear_kilometros_rechaza_no_numerico() {
        assert!(parsear_kilometros("abc").is_err());
        assert!(parsear_kilometros("12.5").is_err());
        assert!(parsear_kilometros("").is_err());
    }

    #[test]
    fn test_parsear_kilometros_rechaza_negativo() {
        assert!(parsear_kilometros("-1").is_err());
    }

    #[test]
    fn test_texto_presente() {
        assert_eq!(texto_presente(&Some("hola".to_string())), Some("hola".to_string()));
        assert_eq!(texto_presente(&Some("  recorte  ".to_string())), Some("recorte".to_string()));
        assert_eq!(texto_presente(&Some("   ".to_string())), None);
        assert_eq!(texto_presente(&Some(String::new())), None);
        assert_eq!(texto_presente(&None), None);
    }

    #[test]
    fn test_validar_dominio() {
        assert!(validar_dominio("AB-123-CD").is_ok());
        assert!(validar_dominio("AB123").is_ok());
        assert!(validar_dominio("A").is_err());
        assert!(validar_dominio("ABCDEFGHIJK").is_err());
    }
}
