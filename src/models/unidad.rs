//! Unidad organizacional
//!
//! La unidad es el identificador canónico que comparten usuarios y vehículos
//! (el campo `title` del vehículo es su etiqueta de unidad). Las banderas
//! booleanas legadas (`up1`..`up9`, `dg`, `inst`) se derivan de la etiqueta,
//! nunca se almacenan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Etiqueta de unidad organizacional. La comparación es por igualdad exacta
/// de la etiqueta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unidad(String);

impl Unidad {
    pub fn nueva(etiqueta: impl Into<String>) -> Self {
        Self(etiqueta.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Banderas legadas que todavía consume el frontend.
    pub fn flags(&self) -> UnidadFlags {
        UnidadFlags::de(self)
    }
}

impl fmt::Display for Unidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Unidad {
    fn from(etiqueta: String) -> Self {
        Self(etiqueta)
    }
}

/// Banderas booleanas por unidad reconocida.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnidadFlags {
    pub up1: bool,
    pub up2: bool,
    pub up3: bool,
    pub up4: bool,
    pub up5: bool,
    pub up6: bool,
    pub up7: bool,
    pub up8: bool,
    pub up9: bool,
    pub dg: bool,
    pub inst: bool,
}

impl UnidadFlags {
    fn de(unidad: &Unidad) -> Self {
        let clave: String = unidad
            .as_str()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        let mut flags = Self::default();
        match clave.as_str() {
            "up1" => flags.up1 = true,
            "up2" => flags.up2 = true,
            "up3" => flags.up3 = true,
            "up4" => flags.up4 = true,
            "up5" => flags.up5 = true,
            "up6" => flags.up6 = true,
            "up7" => flags.up7 = true,
            "up8" => flags.up8 = true,
            "up9" => flags.up9 = true,
            "dg" => flags.dg = true,
            "inst" => flags.inst = true,
            _ => {}
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_derivadas_de_la_etiqueta() {
        assert!(Unidad::nueva("UP 3").flags().up3);
        assert!(Unidad::nueva("up3").flags().up3);
        assert!(Unidad::nueva("DG").flags().dg);
        assert!(Unidad::nueva("Inst").flags().inst);
    }

    #[test]
    fn test_etiqueta_desconocida_sin_banderas() {
        assert_eq!(Unidad::nueva("Taller Central").flags(), UnidadFlags::default());
    }

    #[test]
    fn test_igualdad_exacta() {
        assert_eq!(Unidad::nueva("UP 1"), Unidad::nueva("UP 1"));
        assert_ne!(Unidad::nueva("UP 1"), Unidad::nueva("up 1"));
        assert_ne!(Unidad::nueva("UP 1"), Unidad::nueva("UP1"));
    }
}
