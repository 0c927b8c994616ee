//! Configuración del proyecto

pub mod environment;
