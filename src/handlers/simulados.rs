// src/handlers/simulados.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::SecondsFormat;
use serde::Serialize;
use sqlx::types::Json as SqlJson;

use crate::{
    error::AppError,
    etag::{detail_etag, list_etag, questoes_etag},
    models::{
        progresso::{ResultadoSubmissao, SubmeterSimuladoRequest},
        questao::QuestaoPublica,
        simulado::ListarSimuladosQuery,
    },
    state::AppState,
    utils::jwt::{Claims, optional_claims},
};

/// HTTP-date rendering for the Last-Modified header.
fn http_date(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// RFC3339 with milliseconds, the `lastUpdated` component of list ETags.
fn rfc3339_millis(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn set_cache_headers(headers: &mut HeaderMap, etag: &str, last_modified: Option<&str>) {
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
    if let Some(lm) = last_modified {
        if let Ok(value) = HeaderValue::from_str(lm) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=60"),
    );
}

/// Conditional-request state machine: `If-None-Match` equal to the current
/// validator short-circuits into an empty 304; anything else is a full 200
/// with caching headers set.
fn conditional_json<T: Serialize>(
    req_headers: &HeaderMap,
    etag: &str,
    last_modified: Option<String>,
    body: &T,
) -> Response {
    let if_none_match = req_headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok());

    if if_none_match == Some(etag) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        set_cache_headers(resp.headers_mut(), etag, last_modified.as_deref());
        return resp;
    }

    let mut resp = Json(body).into_response();
    set_cache_headers(resp.headers_mut(), etag, last_modified.as_deref());
    resp
}

/// Lists simulados with filters and pagination.
/// Honors `If-None-Match` against the filter-derived list validator.
pub async fn listar_simulados(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListarSimuladosQuery>,
) -> Result<Response, AppError> {
    let (filtro, page, limit) = query.into_filtro()?;

    let claims = optional_claims(&headers, &state.config.jwt_secret);
    if filtro.status.is_some() && claims.is_none() {
        return Err(AppError::AuthError(
            "The 'status' filter requires an authenticated session".to_string(),
        ));
    }

    let pagina = state
        .simulados
        .listar(&filtro, page, limit, claims.as_ref().map(|c| c.user_id()))
        .await?;

    let last_updated = pagina.items.iter().map(|s| s.updated_at).max();
    let etag = list_etag(
        filtro
            .concurso_id
            .map(|c| c.to_string())
            .as_deref(),
        page,
        limit,
        filtro.dificuldade.as_deref(),
        filtro.search.as_deref(),
        filtro.status.as_deref(),
        last_updated.as_ref().map(rfc3339_millis).as_deref(),
    );

    Ok(conditional_json(
        &headers,
        &etag,
        last_updated.as_ref().map(http_date),
        &pagina,
    ))
}

/// Retrieves a simulado by slug, or 404.
/// Honors `If-None-Match` against `W/"m:X|q:Y"`.
pub async fn obter_simulado(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let simulado = state.simulados.detalhe_por_slug(&slug).await?;

    let etag = detail_etag(
        Some(simulado.meta_revision),
        Some(simulado.questions_revision),
    );

    Ok(conditional_json(
        &headers,
        &etag,
        Some(http_date(&simulado.updated_at)),
        &simulado,
    ))
}

/// Lists a simulado's questions ordered by position, answers withheld.
/// Honors `If-None-Match` against `W/"q:Y"`.
pub async fn listar_questoes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let (simulado, questoes) = state.simulados.questoes_por_slug(&slug).await?;

    let etag = questoes_etag(Some(simulado.questions_revision));
    let publicas: Vec<QuestaoPublica> = questoes.into_iter().map(Into::into).collect();

    Ok(conditional_json(
        &headers,
        &etag,
        Some(http_date(&simulado.updated_at)),
        &publicas,
    ))
}

/// Submits a user's answers for a simulado and records progress.
///
/// * Compares answers with the stored keys and computes a percentage score.
/// * Upserts the (user, simulado) progress row; concurrent submissions are
///   last-write-wins on that unique key.
pub async fn submeter_simulado(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(slug): Path<String>,
    Json(req): Json<SubmeterSimuladoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.respostas.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }

    let (simulado, questoes) = state.simulados.questoes_por_slug(&slug).await?;
    if questoes.is_empty() {
        return Err(AppError::BadRequest(
            "Simulado has no active questions".to_string(),
        ));
    }

    let gabarito: HashMap<i64, &str> = questoes
        .iter()
        .map(|q| (q.id, q.resposta_correta.as_str()))
        .collect();

    let mut acertos: i32 = 0;
    for (questao_id, resposta) in &req.respostas {
        if let Some(correta) = gabarito.get(questao_id) {
            if resposta == correta {
                acertos += 1;
            }
        }
    }

    let total = questoes.len() as i32;
    let pontuacao = acertos * 100 / total;
    let concluido = req.concluido.unwrap_or(true);
    let user_id = claims.user_id();

    let respostas: HashMap<String, String> = req
        .respostas
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    sqlx::query(
        "INSERT INTO progresso_usuario \
         (user_id, simulado_id, respostas, pontuacao, total_questoes, \
          tempo_gasto_segundos, concluido) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (user_id, simulado_id) DO UPDATE SET \
         respostas = EXCLUDED.respostas, \
         pontuacao = EXCLUDED.pontuacao, \
         total_questoes = EXCLUDED.total_questoes, \
         tempo_gasto_segundos = EXCLUDED.tempo_gasto_segundos, \
         concluido = EXCLUDED.concluido, \
         updated_at = NOW(), \
         deleted_at = NULL",
    )
    .bind(user_id)
    .bind(simulado.id)
    .bind(SqlJson(respostas))
    .bind(pontuacao)
    .bind(total)
    .bind(req.tempo_gasto_segundos.unwrap_or(0))
    .bind(concluido)
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert progresso: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(ResultadoSubmissao {
        simulado_id: simulado.id,
        pontuacao,
        acertos,
        total_questoes: total,
        concluido,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn matching_if_none_match_returns_304_without_body() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_static("W/\"m:3|q:7\""),
        );

        let resp = conditional_json(&headers, "W/\"m:3|q:7\"", None, &serde_json::json!({"x": 1}));
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(
            resp.headers().get(header::ETAG).unwrap(),
            "W/\"m:3|q:7\""
        );
        // 304 carries no payload
        assert!(resp.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn stale_validator_returns_full_response() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_static("W/\"m:2|q:7\""),
        );

        let resp = conditional_json(&headers, "W/\"m:3|q:7\"", None, &serde_json::json!({"x": 1}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ETAG).unwrap(),
            "W/\"m:3|q:7\""
        );
        assert_eq!(
            resp.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=60"
        );
    }

    #[test]
    fn timestamp_renderings() {
        let dt = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(rfc3339_millis(&dt), "2024-01-01T00:00:00.000Z");
        assert_eq!(http_date(&dt), "Mon, 01 Jan 2024 00:00:00 GMT");
    }
}
