//! MotoMarket - API del marketplace de dos ruedas
//!
//! Expuesto como librería para que el binario y los tests de integración
//! compartan el mismo router y estado.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
