// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod flashcards;
pub mod progresso;
pub mod simulados;
