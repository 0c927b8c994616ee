//! Middleware del sistema
//!
//! Autenticación por token bearer y configuración de CORS.

pub mod auth;
pub mod cors;
