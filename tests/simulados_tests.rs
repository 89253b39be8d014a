// tests/simulados_tests.rs

use concursos_api::{config::Config, routes, state::AppState, utils::hash::hash_password};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

async fn spawn_app() -> Option<(String, PgPool)> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        admin_username: None,
        admin_password: None,
    };

    let state = AppState::new(pool.clone(), config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Some((address, pool))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

/// Seeds an admin account straight into the database and logs it in.
async fn admin_token(client: &reqwest::Client, address: &str, pool: &PgPool) -> String {
    let username = unique("admin").replace('-', "_");
    let hashed = hash_password("password123").expect("Failed to hash password");

    sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, 'admin')")
        .bind(&username)
        .bind(&hashed)
        .execute(pool)
        .await
        .expect("Failed to seed admin user");

    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Admin login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    login["token"].as_str().expect("Token not found").to_string()
}

async fn register_user(client: &reqwest::Client, address: &str) -> String {
    let username = unique("user").replace('-', "_");
    let resp = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(resp.status().as_u16(), 201);

    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    login["token"].as_str().expect("Token not found").to_string()
}

/// Creates a simulado through the admin API and returns (id, slug).
async fn criar_simulado(
    client: &reqwest::Client,
    address: &str,
    bearer: &str,
    titulo: &str,
) -> (i64, String) {
    let slug = unique("simulado");
    let body: serde_json::Value = client
        .post(format!("{}/api/admin/simulados", address))
        .header("Authorization", bearer)
        .json(&serde_json::json!({
            "titulo": titulo,
            "slug": slug,
            "descricao": "Prova objetiva de nivel superior",
            "concurso_id": 1,
            "categoria": "policia",
            "tempo_limite_minutos": 120,
            "dificuldade": "medio",
            "materias": ["portugues", "direito-administrativo"]
        }))
        .send()
        .await
        .expect("Failed to create simulado")
        .json()
        .await
        .expect("Failed to parse simulado json");

    (body["id"].as_i64().expect("simulado id"), slug)
}

async fn criar_questao(
    client: &reqwest::Client,
    address: &str,
    bearer: &str,
    simulado_id: i64,
    posicao: i32,
    resposta_correta: &str,
) -> i64 {
    let resp = client
        .post(format!("{}/api/admin/simulados/{}/questoes", address, simulado_id))
        .header("Authorization", bearer)
        .json(&serde_json::json!({
            "posicao": posicao,
            "enunciado": format!("Enunciado da questao {}", posicao),
            "alternativas": [
                { "letra": "a", "texto": "Alternativa A" },
                { "letra": "b", "texto": "Alternativa B" },
                { "letra": "c", "texto": "Alternativa C" }
            ],
            "resposta_correta": resposta_correta,
            "explicacao": "Ver edital.",
            "materia": "portugues",
            "dificuldade": "medio"
        }))
        .send()
        .await
        .expect("Failed to create questao");
    assert_eq!(resp.status().as_u16(), 201);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse questao json");
    body["id"].as_i64().expect("questao id")
}

#[tokio::test]
async fn detail_etag_tracks_revisions() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let (id, slug) = criar_simulado(&client, &address, &bearer, "Simulado PF 2024").await;
    criar_questao(&client, &address, &bearer, id, 1, "a").await;
    criar_questao(&client, &address, &bearer, id, 2, "b").await;

    // Fresh record: meta never touched, two question mutations
    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let etag = response
        .headers()
        .get("etag")
        .expect("ETag missing")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(etag, "W/\"m:0|q:2\"");
    assert!(response.headers().get("last-modified").is_some());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["num_questoes"], 2);

    // Revalidation with the current ETag short-circuits to 304
    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 304);
    assert_eq!(
        response.headers().get("etag").unwrap().to_str().unwrap(),
        etag
    );
    assert_eq!(response.text().await.unwrap(), "");

    // A metadata update bumps meta_revision, so the old validator is stale
    let response = client
        .put(format!("{}/api/admin/simulados/{}", address, id))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({ "titulo": "Simulado PF 2024 (retificado)" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("etag").unwrap().to_str().unwrap(),
        "W/\"m:1|q:2\""
    );
}

#[tokio::test]
async fn questions_etag_and_answer_withholding() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let (id, slug) = criar_simulado(&client, &address, &bearer, "Simulado TRT").await;
    criar_questao(&client, &address, &bearer, id, 1, "a").await;
    let segunda = criar_questao(&client, &address, &bearer, id, 2, "c").await;

    let response = client
        .get(format!("{}/api/simulados/{}/questoes", address, slug))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let etag = response
        .headers()
        .get("etag")
        .expect("ETag missing")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(etag, "W/\"q:2\"");

    let questoes: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(questoes.len(), 2);
    // Delivery order follows posicao
    assert_eq!(questoes[0]["posicao"], 1);
    assert_eq!(questoes[1]["posicao"], 2);
    for questao in &questoes {
        assert!(questao.get("resposta_correta").is_none());
        assert!(questao.get("explicacao").is_none());
        assert_eq!(questao["alternativas"].as_array().unwrap().len(), 3);
    }

    let response = client
        .get(format!("{}/api/simulados/{}/questoes", address, slug))
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 304);

    // Removing a question bumps questions_revision and shrinks the count
    let response = client
        .delete(format!("{}/api/admin/questoes/{}", address, segunda))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/api/simulados/{}/questoes", address, slug))
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("etag").unwrap().to_str().unwrap(),
        "W/\"q:3\""
    );
    let questoes: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(questoes.len(), 1);
}

#[tokio::test]
async fn deactivating_a_question_keeps_counters_consistent() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let (id, slug) = criar_simulado(&client, &address, &bearer, "Simulado MPU").await;
    criar_questao(&client, &address, &bearer, id, 1, "a").await;
    let segunda = criar_questao(&client, &address, &bearer, id, 2, "b").await;

    // Deactivation must shrink the active-question count, not just bump the
    // revision: detail and /questoes would otherwise disagree.
    let response = client
        .put(format!("{}/api/admin/questoes/{}", address, segunda))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({ "ativo": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("etag").unwrap().to_str().unwrap(),
        "W/\"m:0|q:3\""
    );
    let detalhe: serde_json::Value = response.json().await.unwrap();
    assert_eq!(detalhe["num_questoes"], 1);

    let questoes: Vec<serde_json::Value> = client
        .get(format!("{}/api/simulados/{}/questoes", address, slug))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questoes.len(), 1);

    // Reactivation restores the count
    let response = client
        .put(format!("{}/api/admin/questoes/{}", address, segunda))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({ "ativo": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let detalhe: serde_json::Value = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detalhe["num_questoes"], 2);

    // Deleting the now-inactive question must not decrement twice
    let response = client
        .put(format!("{}/api/admin/questoes/{}", address, segunda))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({ "ativo": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .delete(format!("{}/api/admin/questoes/{}", address, segunda))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let detalhe: serde_json::Value = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detalhe["num_questoes"], 1);
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let Some((address, _pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/simulados/{}", address, unique("missing")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn deleted_simulado_disappears_from_reads() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let (id, slug) = criar_simulado(&client, &address, &bearer, "Simulado extinto").await;

    // Warm the cache first
    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .delete(format!("{}/api/admin/simulados/{}", address, id))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/api/simulados/{}", address, slug))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn listing_paginates_and_revalidates() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    // A marker in the titles scopes the search to this test run only
    let marker = unique("zz");
    for n in 1..=3 {
        criar_simulado(&client, &address, &bearer, &format!("{} prova {}", marker, n)).await;
    }

    let response = client
        .get(format!(
            "{}/api/simulados?search={}&page=1&limit=2",
            address, marker
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let etag = response
        .headers()
        .get("etag")
        .expect("ETag missing")
        .to_str()
        .unwrap()
        .to_string();
    assert!(etag.starts_with("W/\"list:"));

    let pagina: serde_json::Value = response.json().await.unwrap();
    assert_eq!(pagina["total"], 3);
    assert_eq!(pagina["page"], 1);
    assert_eq!(pagina["limit"], 2);
    assert_eq!(pagina["items"].as_array().unwrap().len(), 2);
    // List projection withholds the heavy subject payload's siblings but keeps
    // the fields the catalog needs
    assert!(pagina["items"][0].get("slug").is_some());
    assert!(pagina["items"][0].get("num_questoes").is_some());

    let response = client
        .get(format!(
            "{}/api/simulados?search={}&page=2&limit=2",
            address, marker
        ))
        .send()
        .await
        .unwrap();
    let pagina: serde_json::Value = response.json().await.unwrap();
    assert_eq!(pagina["items"].as_array().unwrap().len(), 1);

    // Same filters, same validator
    let response = client
        .get(format!(
            "{}/api/simulados?search={}&page=1&limit=2",
            address, marker
        ))
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 304);
}

#[tokio::test]
async fn listing_honors_id_inclusion_and_exclusion() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let marker = unique("idf");
    let mut ids = Vec::new();
    for n in 1..=3 {
        let (id, _) =
            criar_simulado(&client, &address, &bearer, &format!("{} prova {}", marker, n)).await;
        ids.push(id);
    }

    let pagina: serde_json::Value = client
        .get(format!(
            "{}/api/simulados?ids={},{}",
            address, ids[0], ids[1]
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pagina["total"], 2);
    let retornados: Vec<i64> = pagina["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert!(retornados.contains(&ids[0]));
    assert!(retornados.contains(&ids[1]));

    let pagina: serde_json::Value = client
        .get(format!(
            "{}/api/simulados?search={}&excluir_ids={}",
            address, marker, ids[0]
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pagina["total"], 2);
    for item in pagina["items"].as_array().unwrap() {
        assert_ne!(item["id"].as_i64().unwrap(), ids[0]);
    }

    // Malformed entries in the lists are a validation error
    let response = client
        .get(format!("{}/api/simulados?ids=1,abc", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn listing_rejects_bad_parameters() {
    let Some((address, _pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    for query in [
        "page=0",
        "limit=0",
        "limit=101",
        "dificuldade=impossivel",
        "status=quase_la",
    ] {
        let response = client
            .get(format!("{}/api/simulados?{}", address, query))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400, "query: {}", query);
    }
}

#[tokio::test]
async fn status_filter_requires_session() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let marker = unique("st");
    let (id, slug) = criar_simulado(&client, &address, &bearer, &format!("{} prova", marker)).await;
    criar_questao(&client, &address, &bearer, id, 1, "a").await;

    // Anonymous callers cannot ask for per-user status
    let response = client
        .get(format!(
            "{}/api/simulados?search={}&status=finalizado",
            address, marker
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let user_bearer = format!("Bearer {}", register_user(&client, &address).await);

    // Nothing finished yet
    let pagina: serde_json::Value = client
        .get(format!(
            "{}/api/simulados?search={}&status=finalizado",
            address, marker
        ))
        .header("Authorization", &user_bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pagina["total"], 0);

    let pagina: serde_json::Value = client
        .get(format!(
            "{}/api/simulados?search={}&status=nao_iniciado",
            address, marker
        ))
        .header("Authorization", &user_bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pagina["total"], 1);

    // Finish the simulado, then the status buckets flip
    let response = client
        .post(format!("{}/api/simulados/{}/submeter", address, slug))
        .header("Authorization", &user_bearer)
        .json(&serde_json::json!({
            "respostas": { "1": "a" },
            "tempo_gasto_segundos": 60
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let pagina: serde_json::Value = client
        .get(format!(
            "{}/api/simulados?search={}&status=finalizado",
            address, marker
        ))
        .header("Authorization", &user_bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pagina["total"], 1);
}

#[tokio::test]
async fn submission_scores_and_tracks_progress() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    let (id, slug) = criar_simulado(&client, &address, &bearer, "Simulado INSS").await;
    let q1 = criar_questao(&client, &address, &bearer, id, 1, "a").await;
    let q2 = criar_questao(&client, &address, &bearer, id, 2, "b").await;

    let user_bearer = format!("Bearer {}", register_user(&client, &address).await);

    // Submitting requires a session
    let response = client
        .post(format!("{}/api/simulados/{}/submeter", address, slug))
        .json(&serde_json::json!({ "respostas": { q1.to_string(): "a" }, "tempo_gasto_segundos": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Empty answer sheets are rejected
    let response = client
        .post(format!("{}/api/simulados/{}/submeter", address, slug))
        .header("Authorization", &user_bearer)
        .json(&serde_json::json!({ "respostas": {}, "tempo_gasto_segundos": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // One right, one wrong
    let resultado: serde_json::Value = client
        .post(format!("{}/api/simulados/{}/submeter", address, slug))
        .header("Authorization", &user_bearer)
        .json(&serde_json::json!({
            "respostas": { q1.to_string(): "a", q2.to_string(): "c" },
            "tempo_gasto_segundos": 300
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resultado["acertos"], 1);
    assert_eq!(resultado["total_questoes"], 2);
    assert_eq!(resultado["pontuacao"], 50);
    assert_eq!(resultado["concluido"], true);

    // Resubmitting replaces the previous attempt
    let resultado: serde_json::Value = client
        .post(format!("{}/api/simulados/{}/submeter", address, slug))
        .header("Authorization", &user_bearer)
        .json(&serde_json::json!({
            "respostas": { q1.to_string(): "a", q2.to_string(): "b" },
            "tempo_gasto_segundos": 280
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resultado["pontuacao"], 100);

    let progresso: Vec<serde_json::Value> = client
        .get(format!("{}/api/progresso", address))
        .header("Authorization", &user_bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entrada = progresso
        .iter()
        .find(|p| p["slug"].as_str() == Some(slug.as_str()))
        .expect("Progress entry missing");
    assert_eq!(entrada["pontuacao"], 100);
    assert_eq!(entrada["concluido"], true);
}

#[tokio::test]
async fn admin_routes_reject_non_admins() {
    let Some((address, _pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let user_bearer = format!("Bearer {}", register_user(&client, &address).await);

    let response = client
        .post(format!("{}/api/admin/simulados", address))
        .header("Authorization", &user_bearer)
        .json(&serde_json::json!({
            "titulo": "Nao deveria existir",
            "slug": unique("forbidden")
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
    // Rejections carry the standard JSON error envelope
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = client
        .get(format!("{}/api/admin/users", address))
        .header("Authorization", &user_bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // Without any credentials the same routes are a 401, also enveloped
    let response = client
        .get(format!("{}/api/admin/users", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn admin_rejects_invalid_payloads() {
    let Some((address, pool)) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", admin_token(&client, &address, &pool).await);

    // Bad slug shape
    let response = client
        .post(format!("{}/api/admin/simulados", address))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({
            "titulo": "Prova",
            "slug": "Nao Eh Slug!"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Duplicate slug
    let (_, slug) = criar_simulado(&client, &address, &bearer, "Original").await;
    let response = client
        .post(format!("{}/api/admin/simulados", address))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({
            "titulo": "Copia",
            "slug": slug
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    // A question needs at least two alternatives
    let (id, _) = criar_simulado(&client, &address, &bearer, "Com questao ruim").await;
    let response = client
        .post(format!("{}/api/admin/simulados/{}/questoes", address, id))
        .header("Authorization", &bearer)
        .json(&serde_json::json!({
            "posicao": 1,
            "enunciado": "Enunciado valido",
            "alternativas": [{ "letra": "a", "texto": "Sozinha" }],
            "resposta_correta": "a"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
