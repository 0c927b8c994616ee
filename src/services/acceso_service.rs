//! Política de acceso por unidad organizacional
//!
//! Decide qué registros puede ver o modificar un principal en función de su
//! unidad y su rol. Son funciones puras: toda la información llega como
//! argumento y no hay I/O.

use std::collections::HashSet;
use uuid::Uuid;

use crate::middleware::auth::UsuarioAutenticado;
use crate::models::unidad::Unidad;

/// Política de acceso. Las cuentas protegidas vienen de configuración, no
/// de código: no pueden eliminarse ni degradarse, tampoco por un admin.
#[derive(Debug, Clone, Default)]
pub struct PoliticaAcceso {
    protegidos: HashSet<Uuid>,
}

impl PoliticaAcceso {
    pub fn nueva(protegidos: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            protegidos: protegidos.into_iter().collect(),
        }
    }

    /// Un admin ve cualquier vehículo; un usuario común solo los de su
    /// unidad (igualdad exacta de etiqueta).
    pub fn puede_ver(&self, principal: &UsuarioAutenticado, unidad: &Unidad) -> bool {
        principal.admin || principal.unidad == *unidad
    }

    /// Misma regla que la lectura; separado porque el contrato de escritura
    /// puede endurecerse sin tocar los listados.
    pub fn puede_escribir(&self, principal: &UsuarioAutenticado, unidad: &Unidad) -> bool {
        self.puede_ver(principal, unidad)
    }

    /// Alcance de unidad para los listados. Orden de resolución:
    /// filtro explícito > unidad propia (no admin) > sin restricción (admin).
    pub fn alcance_listado(
        &self,
        principal: &UsuarioAutenticado,
        filtro: Option<&str>,
    ) -> Option<String> {
        if let Some(explicito) = filtro.map(str::trim).filter(|f| !f.is_empty()) {
            return Some(explicito.to_string());
        }
        if principal.admin {
            None
        } else {
            Some(principal.unidad.as_str().to_string())
        }
    }

    pub fn es_protegido(&self, id: Uuid) -> bool {
        self.protegidos.contains(&id)
    }

    /// Solo un admin administra usuarios, y las cuentas protegidas quedan
    /// fuera de las operaciones destructivas.
    pub fn puede_administrar_usuario(&self, principal: &UsuarioAutenticado, objetivo: Uuid) -> bool {
        principal.admin && !self.es_protegido(objetivo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(admin: bool, unidad: &str) -> UsuarioAutenticado {
        UsuarioAutenticado {
            id: Uuid::new_v4(),
            admin,
            unidad: Unidad::nueva(unidad),
        }
    }

    #[test]
    fn test_admin_ve_y_escribe_todo() {
        let politica = PoliticaAcceso::default();
        let admin = principal(true, "DG");
        assert!(politica.puede_ver(&admin, &Unidad::nueva("UP 4")));
        assert!(politica.puede_escribir(&admin, &Unidad::nueva("UP 4")));
    }

    #[test]
    fn test_usuario_comun_limitado_a_su_unidad() {
        let politica = PoliticaAcceso::default();
        let usuario = principal(false, "UP 2");
        assert!(politica.puede_ver(&usuario, &Unidad::nueva("UP 2")));
        assert!(!politica.puede_ver(&usuario, &Unidad::nueva("UP 3")));
        assert!(!politica.puede_escribir(&usuario, &Unidad::nueva("UP 3")));
    }

    #[test]
    fn test_alcance_sin_filtro() {
        let politica = PoliticaAcceso::default();
        let usuario = principal(false, "UP 2");
        assert_eq!(politica.alcance_listado(&usuario, None), Some("UP 2".to_string()));

        let admin = principal(true, "DG");
        assert_eq!(politica.alcance_listado(&admin, None), None);
    }

    #[test]
    fn test_filtro_explicito_gana_sobre_la_unidad_propia() {
        let politica = PoliticaAcceso::default();
        let usuario = principal(false, "UP 2");
        assert_eq!(
            politica.alcance_listado(&usuario, Some("UP 7")),
            Some("UP 7".to_string())
        );
    }

    #[test]
    fn test_filtro_vacio_no_cuenta_como_explicito() {
        let politica = PoliticaAcceso::default();
        let usuario = principal(false, "UP 2");
        assert_eq!(
            politica.alcance_listado(&usuario, Some("   ")),
            Some("UP 2".to_string())
        );
    }

    #[test]
    fn test_cuenta_protegida_no_se_administra() {
        let raiz = Uuid::new_v4();
        let politica = PoliticaAcceso::nueva([raiz]);
        let admin = principal(true, "DG");

        assert!(politica.es_protegido(raiz));
        assert!(!politica.puede_administrar_usuario(&admin, raiz));
        assert!(politica.puede_administrar_usuario(&admin, Uuid::new_v4()));
    }

    #[test]
    fn test_no_admin_no_administra_usuarios() {
        let politica = PoliticaAcceso::default();
        let usuario = principal(false, "UP 1");
        assert!(!politica.puede_administrar_usuario(&usuario, Uuid::new_v4()));
    }
}
