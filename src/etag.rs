// src/etag.rs

//! Weak ETag composition for the simulados read path.
//!
//! Validators are derived from the revision counters stored on each simulado
//! (`meta_revision` bumped on metadata changes, `questions_revision` bumped on
//! any question mutation), so a tag changes exactly when the underlying data
//! does. These are cache validators, not security tokens: byte-stability for
//! identical inputs is the only requirement.

/// Weak validator for a filtered simulado listing.
///
/// Fields are joined by ':' in a fixed order; absent fields contribute an
/// empty segment so that presence/absence also changes the tag.
pub fn list_etag(
    concurso_id: Option<&str>,
    page: i64,
    limit: i64,
    dificuldade: Option<&str>,
    search: Option<&str>,
    status: Option<&str>,
    last_updated: Option<&str>,
) -> String {
    format!(
        "W/\"list:{}:{}:{}:{}:{}:{}:{}\"",
        concurso_id.unwrap_or(""),
        page,
        limit,
        dificuldade.unwrap_or(""),
        search.unwrap_or(""),
        status.unwrap_or(""),
        last_updated.unwrap_or(""),
    )
}

/// Weak validator for a simulado detail: `W/"m:{meta}|q:{questions}"`.
/// Missing counters default to 0.
pub fn detail_etag(meta_revision: Option<i64>, questions_revision: Option<i64>) -> String {
    format!(
        "W/\"m:{}|q:{}\"",
        meta_revision.unwrap_or(0),
        questions_revision.unwrap_or(0)
    )
}

/// Weak validator for a simulado's question list: `W/"q:{questions}"`.
pub fn questoes_etag(questions_revision: Option<i64>) -> String {
    format!("W/\"q:{}\"", questions_revision.unwrap_or(0))
}
