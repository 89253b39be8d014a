// src/models/questao.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// One answer alternative of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternativa {
    /// Option key, e.g. "a", "b", "c".
    pub letra: String,
    pub texto: String,
}

/// Represents the 'questoes_simulado' table in the database.
///
/// Any mutation of a row bumps `questions_revision` on the owning simulado.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestaoSimulado {
    pub id: i64,
    pub simulado_id: i64,

    /// Ordinal position inside the simulado.
    pub posicao: i32,

    pub enunciado: String,
    pub alternativas: Json<Vec<Alternativa>>,

    /// Key of the correct alternative.
    pub resposta_correta: String,

    pub explicacao: Option<String>,
    pub materia: Option<String>,
    pub topico: Option<String>,
    pub dificuldade: Option<String>,
    pub ativo: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for sending a question to exam takers.
/// Excludes `resposta_correta` and `explicacao`: answers are only revealed
/// through submission scoring.
#[derive(Debug, Serialize)]
pub struct QuestaoPublica {
    pub id: i64,
    pub simulado_id: i64,
    pub posicao: i32,
    pub enunciado: String,
    pub alternativas: Json<Vec<Alternativa>>,
    pub materia: Option<String>,
    pub topico: Option<String>,
    pub dificuldade: Option<String>,
}

impl From<QuestaoSimulado> for QuestaoPublica {
    fn from(q: QuestaoSimulado) -> Self {
        Self {
            id: q.id,
            simulado_id: q.simulado_id,
            posicao: q.posicao,
            enunciado: q.enunciado,
            alternativas: q.alternativas,
            materia: q.materia,
            topico: q.topico,
            dificuldade: q.dificuldade,
        }
    }
}

fn validate_alternativas(alternativas: &[Alternativa]) -> Result<(), validator::ValidationError> {
    if alternativas.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_alternatives"));
    }
    for alt in alternativas {
        if alt.letra.is_empty() || alt.texto.is_empty() || alt.texto.len() > 1000 {
            return Err(validator::ValidationError::new("invalid_alternative"));
        }
    }
    Ok(())
}

/// DTO for creating a question. Admin only.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestaoRequest {
    #[validate(range(min = 1))]
    pub posicao: i32,
    #[validate(length(min = 1, max = 4000))]
    pub enunciado: String,
    #[validate(custom(function = validate_alternativas))]
    pub alternativas: Vec<Alternativa>,
    #[validate(length(min = 1, max = 10))]
    pub resposta_correta: String,
    #[validate(length(max = 4000))]
    pub explicacao: Option<String>,
    #[validate(length(max = 100))]
    pub materia: Option<String>,
    #[validate(length(max = 100))]
    pub topico: Option<String>,
    #[validate(length(max = 20))]
    pub dificuldade: Option<String>,
}

/// DTO for updating a question. All fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestaoRequest {
    #[validate(range(min = 1))]
    pub posicao: Option<i32>,
    #[validate(length(min = 1, max = 4000))]
    pub enunciado: Option<String>,
    #[validate(custom(function = validate_alternativas))]
    pub alternativas: Option<Vec<Alternativa>>,
    #[validate(length(min = 1, max = 10))]
    pub resposta_correta: Option<String>,
    #[validate(length(max = 4000))]
    pub explicacao: Option<String>,
    #[validate(length(max = 100))]
    pub materia: Option<String>,
    #[validate(length(max = 100))]
    pub topico: Option<String>,
    #[validate(length(max = 20))]
    pub dificuldade: Option<String>,
    pub ativo: Option<bool>,
}
