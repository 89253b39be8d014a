// src/handlers/flashcards.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::flashcard::{CreateFlashcardRequest, Flashcard, UpdateFlashcardRequest},
    utils::jwt::Claims,
};

const FLASHCARD_COLS: &str = "id, user_id, materia, frente, verso, created_at, updated_at";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListarFlashcardsQuery {
    pub materia: Option<String>,
}

/// Lists the current user's flashcards, optionally filtered by subject.
pub async fn listar_flashcards(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListarFlashcardsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sql = format!(
        "SELECT {} FROM flashcards \
         WHERE user_id = $1 AND deleted_at IS NULL \
           AND ($2::TEXT IS NULL OR materia = $2) \
         ORDER BY updated_at DESC",
        FLASHCARD_COLS
    );
    let cards = sqlx::query_as::<_, Flashcard>(&sql)
        .bind(claims.user_id())
        .bind(&params.materia)
        .fetch_all(&pool)
        .await?;

    Ok(Json(cards))
}

/// Creates a flashcard owned by the current user.
pub async fn criar_flashcard(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateFlashcardRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let sql = format!(
        "INSERT INTO flashcards (user_id, materia, frente, verso) \
         VALUES ($1, $2, $3, $4) RETURNING {}",
        FLASHCARD_COLS
    );
    let card = sqlx::query_as::<_, Flashcard>(&sql)
        .bind(claims.user_id())
        .bind(&payload.materia)
        .bind(&payload.frente)
        .bind(&payload.verso)
        .fetch_one(&pool)
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// Updates a flashcard. Only the owner may touch it; anyone else sees a 404.
pub async fn atualizar_flashcard(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFlashcardRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let sql = format!(
        "UPDATE flashcards SET \
         materia = COALESCE($3, materia), \
         frente = COALESCE($4, frente), \
         verso = COALESCE($5, verso), \
         updated_at = NOW() \
         WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL \
         RETURNING {}",
        FLASHCARD_COLS
    );
    let card = sqlx::query_as::<_, Flashcard>(&sql)
        .bind(id)
        .bind(claims.user_id())
        .bind(&payload.materia)
        .bind(&payload.frente)
        .bind(&payload.verso)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Flashcard not found".to_string()))?;

    Ok(Json(card))
}

/// Soft-deletes a flashcard owned by the current user.
pub async fn excluir_flashcard(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query(
        "UPDATE flashcards SET deleted_at = NOW(), updated_at = NOW() \
         WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(claims.user_id())
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Flashcard not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
