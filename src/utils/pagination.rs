//! Paginación de listados
//!
//! Este módulo traduce `{pagina, limite}` a offset/limit de SQL y arma el
//! sobre de paginación que consume el frontend existente.

use serde::Serialize;

/// Parámetros de paginación, 1-indexados.
#[derive(Debug, Clone, Copy)]
pub struct Paginacion {
    pub pagina: i64,
    pub limite: i64,
}

impl Paginacion {
    /// Normaliza los parámetros recibidos por query string.
    ///
    /// Un límite muy grande es un límite común y corriente: el modo "traer
    /// todo" del frontend usa página 1 con límite enorme.
    pub fn nueva(pagina: Option<i64>, limite: Option<i64>) -> Self {
        Self {
            pagina: pagina.unwrap_or(1).max(1),
            limite: limite.unwrap_or(10).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.pagina - 1) * self.limite
    }
}

/// Sobre de paginación con los metadatos que espera el frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginado<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl<T> Paginado<T> {
    /// Arma el sobre a partir de los docs de la página y el conteo total.
    ///
    /// Una página fuera de rango produce `docs` vacío, nunca un error.
    pub fn envolver(docs: Vec<T>, total_docs: i64, paginacion: Paginacion) -> Self {
        let Paginacion { pagina, limite } = paginacion;
        let total_pages = if total_docs == 0 {
            0
        } else {
            (total_docs + limite - 1) / limite
        };
        let has_prev_page = pagina > 1;
        let has_next_page = pagina < total_pages;

        Self {
            docs,
            total_docs,
            limit: limite,
            page: pagina,
            total_pages,
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| pagina - 1),
            next_page: has_next_page.then(|| pagina + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Paginacion::nueva(Some(1), Some(10)).offset(), 0);
        assert_eq!(Paginacion::nueva(Some(4), Some(10)).offset(), 30);
        assert_eq!(Paginacion::nueva(None, None).offset(), 0);
    }

    #[test]
    fn test_parametros_invalidos_se_normalizan() {
        let pag = Paginacion::nueva(Some(0), Some(-5));
        assert_eq!(pag.pagina, 1);
        assert_eq!(pag.limite, 1);
    }

    #[test]
    fn test_primera_pagina_de_tres() {
        let sobre = Paginado::envolver(vec![0; 10], 25, Paginacion::nueva(Some(1), Some(10)));
        assert_eq!(sobre.total_pages, 3);
        assert!(!sobre.has_prev_page);
        assert!(sobre.has_next_page);
        assert_eq!(sobre.prev_page, None);
        assert_eq!(sobre.next_page, Some(2));
    }

    #[test]
    fn test_ultima_pagina() {
        let sobre = Paginado::envolver(vec![0; 5], 25, Paginacion::nueva(Some(3), Some(10)));
        assert!(sobre.has_prev_page);
        assert!(!sobre.has_next_page);
        assert_eq!(sobre.prev_page, Some(2));
        assert_eq!(sobre.next_page, None);
        assert_eq!(sobre.docs.len(), 5);
    }

    #[test]
    fn test_pagina_fuera_de_rango() {
        let sobre = Paginado::envolver(Vec::<i32>::new(), 25, Paginacion::nueva(Some(4), Some(10)));
        assert!(sobre.docs.is_empty());
        assert!(sobre.has_prev_page);
        assert!(!sobre.has_next_page);
    }

    #[test]
    fn test_limite_enorme_es_una_sola_pagina() {
        let sobre = Paginado::envolver(vec![0; 25], 25, Paginacion::nueva(Some(1), Some(1_000_000)));
        assert_eq!(sobre.total_pages, 1);
        assert!(!sobre.has_next_page);
    }

    #[test]
    fn test_sin_resultados() {
        let sobre = Paginado::envolver(Vec::<i32>::new(), 0, Paginacion::nueva(Some(1), Some(10)));
        assert_eq!(sobre.total_pages, 0);
        assert!(!sobre.has_prev_page);
        assert!(!sobre.has_next_page);
    }
}
