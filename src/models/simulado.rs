// src/models/simulado.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::error::AppError;

pub const DIFICULDADES: [&str; 3] = ["facil", "medio", "dificil"];
pub const STATUS_PROGRESSO: [&str; 3] = ["nao_iniciado", "em_andamento", "finalizado"];

/// Represents the 'simulados' table in the database.
///
/// `meta_revision` and `questions_revision` are monotonic counters bumped on
/// metadata and question mutations respectively; the HTTP layer derives weak
/// ETags from them. `deleted_at` never appears here: soft-deleted rows are
/// filtered out by every query.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Simulado {
    pub id: i64,
    pub titulo: String,

    /// URL-safe unique identifier, immutable once created.
    pub slug: String,

    pub descricao: Option<String>,
    pub concurso_id: Option<i64>,
    pub categoria: Option<String>,
    pub num_questoes: i32,
    pub tempo_limite_minutos: Option<i32>,
    pub dificuldade: Option<String>,

    /// Subject-area tags, stored as a JSON array.
    pub materias: Json<Vec<String>>,

    pub publico: bool,
    pub ativo: bool,
    pub meta_revision: i64,
    pub questions_revision: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Listing projection of a simulado (no revision counters).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SimuladoResumo {
    pub id: i64,
    pub titulo: String,
    pub slug: String,
    pub descricao: Option<String>,
    pub concurso_id: Option<i64>,
    pub categoria: Option<String>,
    pub num_questoes: i32,
    pub tempo_limite_minutos: Option<i32>,
    pub dificuldade: Option<String>,
    pub materias: Json<Vec<String>>,
    pub publico: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Paginated response envelope: `{ items, total, page, limit }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Closed, validated filter set accepted by the repository.
///
/// Dynamic filter maps are rejected at the HTTP boundary; only these fields
/// exist, and enumerated fields are checked against their allowed values.
#[derive(Debug, Clone, Default)]
pub struct SimuladoFiltro {
    pub concurso_id: Option<i64>,
    pub dificuldade: Option<String>,
    pub publico: Option<bool>,
    pub search: Option<String>,
    /// Per-user completion status; requires an authenticated session and
    /// disables global caching of the listing.
    pub status: Option<String>,
    pub ids: Option<Vec<i64>>,
    pub excluir_ids: Option<Vec<i64>>,
}

/// Raw query string for `GET /api/simulados`. Unknown parameters are a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListarSimuladosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub concurso_id: Option<i64>,
    pub dificuldade: Option<String>,
    pub publico: Option<bool>,
    pub search: Option<String>,
    pub status: Option<String>,
    /// Comma-separated id list to include.
    pub ids: Option<String>,
    /// Comma-separated id list to exclude.
    pub excluir_ids: Option<String>,
}

fn parse_id_list(raw: &str, campo: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid id '{}' in '{}'", s, campo)))
        })
        .collect()
}

impl ListarSimuladosQuery {
    /// Validates the raw query into a closed filter plus page/limit.
    pub fn into_filtro(self) -> Result<(SimuladoFiltro, i64, i64), AppError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::BadRequest("'page' must be >= 1".to_string()));
        }
        let limit = self.limit.unwrap_or(20);
        if !(1..=100).contains(&limit) {
            return Err(AppError::BadRequest(
                "'limit' must be between 1 and 100".to_string(),
            ));
        }

        if let Some(d) = self.dificuldade.as_deref() {
            if !DIFICULDADES.contains(&d) {
                return Err(AppError::BadRequest(format!(
                    "Invalid 'dificuldade': '{}'",
                    d
                )));
            }
        }
        if let Some(s) = self.status.as_deref() {
            if !STATUS_PROGRESSO.contains(&s) {
                return Err(AppError::BadRequest(format!("Invalid 'status': '{}'", s)));
            }
        }

        let ids = self
            .ids
            .as_deref()
            .map(|raw| parse_id_list(raw, "ids"))
            .transpose()?;
        let excluir_ids = self
            .excluir_ids
            .as_deref()
            .map(|raw| parse_id_list(raw, "excluir_ids"))
            .transpose()?;

        Ok((
            SimuladoFiltro {
                concurso_id: self.concurso_id,
                dificuldade: self.dificuldade,
                publico: self.publico,
                search: self.search,
                status: self.status,
                ids,
                excluir_ids,
            },
            page,
            limit,
        ))
    }
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let ok = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_slug"))
    }
}

fn validate_dificuldade(d: &str) -> Result<(), validator::ValidationError> {
    if DIFICULDADES.contains(&d) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_dificuldade"))
    }
}

/// DTO for creating a simulado. Admin only.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSimuladoRequest {
    #[validate(length(min = 1, max = 200))]
    pub titulo: String,
    #[validate(length(min = 1, max = 100), custom(function = validate_slug))]
    pub slug: String,
    #[validate(length(max = 2000))]
    pub descricao: Option<String>,
    pub concurso_id: Option<i64>,
    #[validate(length(max = 100))]
    pub categoria: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub tempo_limite_minutos: Option<i32>,
    #[validate(custom(function = validate_dificuldade))]
    pub dificuldade: Option<String>,
    #[serde(default)]
    pub materias: Vec<String>,
    #[serde(default = "default_true")]
    pub publico: bool,
}

fn default_true() -> bool {
    true
}

/// DTO for updating a simulado. All fields optional; the slug is immutable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSimuladoRequest {
    #[validate(length(min = 1, max = 200))]
    pub titulo: Option<String>,
    #[validate(length(max = 2000))]
    pub descricao: Option<String>,
    pub concurso_id: Option<i64>,
    #[validate(length(max = 100))]
    pub categoria: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub tempo_limite_minutos: Option<i32>,
    #[validate(custom(function = validate_dificuldade))]
    pub dificuldade: Option<String>,
    pub materias: Option<Vec<String>>,
    pub publico: Option<bool>,
    pub ativo: Option<bool>,
}
