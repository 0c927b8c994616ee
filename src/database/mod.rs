//! Módulo de base de datos

pub mod connection;
