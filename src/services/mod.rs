//! Services module
//!
//! Este módulo contiene la política de acceso y los servicios laterales
//! que no pertenecen al flujo transaccional principal.

pub mod acceso_service;
pub mod notificacion_service;
