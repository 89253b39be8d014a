// src/repository/mod.rs

pub mod simulados;

pub use simulados::SimuladoRepository;
