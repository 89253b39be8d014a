// src/services/mod.rs

pub mod simulados;

pub use simulados::SimuladoService;
