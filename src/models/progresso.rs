// src/models/progresso.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'progresso_usuario' table in the database.
/// One row per (user, simulado); created on the first attempt, updated on
/// later attempts, soft-deleted only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProgressoUsuario {
    pub id: i64,
    pub user_id: i64,
    pub simulado_id: i64,

    /// Map of question id (as string key) to the chosen alternative.
    pub respostas: sqlx::types::Json<std::collections::HashMap<String, String>>,

    /// Percentage score, 0-100.
    pub pontuacao: i32,
    pub total_questoes: i32,
    pub tempo_gasto_segundos: i32,
    pub concluido: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Progress row joined with simulado metadata for listing.
#[derive(Debug, Serialize, FromRow)]
pub struct ProgressoResponse {
    pub simulado_id: i64,
    pub titulo: String,
    pub slug: String,
    pub pontuacao: i32,
    pub total_questoes: i32,
    pub tempo_gasto_segundos: i32,
    pub concluido: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting simulado answers.
#[derive(Debug, Deserialize)]
pub struct SubmeterSimuladoRequest {
    /// Key: question id. Value: chosen alternative key.
    pub respostas: std::collections::HashMap<i64, String>,
    pub tempo_gasto_segundos: Option<i32>,
    /// Defaults to true: a submission finishes the attempt unless the client
    /// says it is a partial save.
    pub concluido: Option<bool>,
}

/// Result of scoring a submission.
#[derive(Debug, Serialize)]
pub struct ResultadoSubmissao {
    pub simulado_id: i64,
    pub pontuacao: i32,
    pub acertos: i32,
    pub total_questoes: i32,
    pub concluido: bool,
}
