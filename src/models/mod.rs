// src/models/mod.rs

pub mod flashcard;
pub mod progresso;
pub mod questao;
pub mod simulado;
pub mod user;
