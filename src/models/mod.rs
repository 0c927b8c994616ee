//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL y los tipos de dominio que comparten todas las capas.

pub mod historial;
pub mod unidad;
pub mod usuario;
pub mod vehiculo;
