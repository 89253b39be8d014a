// src/routes.rs

use axum::{
    Router, http::Method,
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, flashcards, progresso, simulados},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, simulados, progresso, flashcards, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, simulado service).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::IF_NONE_MATCH,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::get_me))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Public read path with conditional-request support; submission requires
    // a session.
    let simulado_routes = Router::new()
        .route("/", get(simulados::listar_simulados))
        .route("/{slug}", get(simulados::obter_simulado))
        .route("/{slug}/questoes", get(simulados::listar_questoes))
        .merge(
            Router::new()
                .route("/{slug}/submeter", post(simulados::submeter_simulado))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let progresso_routes = Router::new()
        .route("/", get(progresso::meu_progresso))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let flashcard_routes = Router::new()
        .route(
            "/",
            get(flashcards::listar_flashcards).post(flashcards::criar_flashcard),
        )
        .route(
            "/{id}",
            put(flashcards::atualizar_flashcard).delete(flashcards::excluir_flashcard),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/simulados", post(admin::criar_simulado))
        .route(
            "/simulados/{id}",
            put(admin::atualizar_simulado).delete(admin::excluir_simulado),
        )
        .route("/simulados/{id}/questoes", post(admin::criar_questao))
        .route(
            "/questoes/{id}",
            put(admin::atualizar_questao).delete(admin::excluir_questao),
        )
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/simulados", simulado_routes)
        .nest("/api/progresso", progresso_routes)
        .nest("/api/flashcards", flashcard_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
