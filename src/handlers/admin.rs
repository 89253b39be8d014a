// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        questao::{CreateQuestaoRequest, UpdateQuestaoRequest},
        simulado::{CreateSimuladoRequest, UpdateSimuladoRequest},
        user::User,
    },
    state::AppState,
    utils::html::clean_html,
};

/// Lists all users in the system.
/// Admin only.
pub async fn list_users(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at \
         FROM users ORDER BY id DESC",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(users))
}

/// Creates a simulado. Admin only.
/// The slug is immutable afterwards; duplicates are a 409.
pub async fn criar_simulado(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateSimuladoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    payload.descricao = payload.descricao.map(|d| clean_html(&d));

    let simulado = state.simulados.criar_simulado(&payload).await?;

    Ok((StatusCode::CREATED, Json(simulado)))
}

/// Updates a simulado's metadata, bumping its meta revision. Admin only.
pub async fn atualizar_simulado(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateSimuladoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    payload.descricao = payload.descricao.map(|d| clean_html(&d));

    let simulado = state.simulados.atualizar_simulado(id, &payload).await?;

    Ok(Json(simulado))
}

/// Soft-deletes a simulado. Admin only.
pub async fn excluir_simulado(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.simulados.excluir_simulado(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn sanitize_questao(
    enunciado: Option<&mut String>,
    explicacao: Option<&mut String>,
) {
    if let Some(enunciado) = enunciado {
        *enunciado = clean_html(enunciado);
    }
    if let Some(explicacao) = explicacao {
        *explicacao = clean_html(explicacao);
    }
}

/// Adds a question to a simulado, bumping its questions revision. Admin only.
pub async fn criar_questao(
    State(state): State<AppState>,
    Path(simulado_id): Path<i64>,
    Json(mut payload): Json<CreateQuestaoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    sanitize_questao(Some(&mut payload.enunciado), payload.explicacao.as_mut());

    let questao = state.simulados.criar_questao(simulado_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(questao)))
}

/// Updates a question, bumping the owner's questions revision. Admin only.
pub async fn atualizar_questao(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateQuestaoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    sanitize_questao(payload.enunciado.as_mut(), payload.explicacao.as_mut());

    let questao = state.simulados.atualizar_questao(id, &payload).await?;

    Ok(Json(questao))
}

/// Soft-deletes a question, bumping the owner's questions revision. Admin only.
pub async fn excluir_questao(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.simulados.excluir_questao(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
