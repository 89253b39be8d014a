// src/handlers/progresso.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{error::AppError, models::progresso::ProgressoResponse, utils::jwt::Claims};

/// Lists the current user's progress across simulados, most recent first.
pub async fn meu_progresso(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let lista = sqlx::query_as::<_, ProgressoResponse>(
        "SELECT p.simulado_id, s.titulo, s.slug, p.pontuacao, p.total_questoes, \
                p.tempo_gasto_segundos, p.concluido, p.updated_at \
         FROM progresso_usuario p \
         JOIN simulados s ON s.id = p.simulado_id \
         WHERE p.user_id = $1 AND p.deleted_at IS NULL AND s.deleted_at IS NULL \
         ORDER BY p.updated_at DESC",
    )
    .bind(claims.user_id())
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list progresso: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(lista))
}
