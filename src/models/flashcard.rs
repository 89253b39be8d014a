// src/models/flashcard.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'flashcards' table in the database. Owned by a user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub user_id: i64,
    pub materia: Option<String>,
    pub frente: String,
    pub verso: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a flashcard.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFlashcardRequest {
    #[validate(length(max = 100))]
    pub materia: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub frente: String,
    #[validate(length(min = 1, max = 2000))]
    pub verso: String,
}

/// DTO for updating a flashcard. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFlashcardRequest {
    #[validate(length(max = 100))]
    pub materia: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub frente: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub verso: Option<String>,
}
