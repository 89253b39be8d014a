// src/repository/simulados.rs

//! Data access for simulados and their questions.
//!
//! Every select names its columns explicitly (never `*`) so the response
//! contract stays stable under schema evolution, and every read excludes
//! soft-deleted rows. Errors are surfaced raw as `sqlx::Error`; classification
//! happens in the service layer.

use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use crate::models::{
    questao::{CreateQuestaoRequest, QuestaoSimulado, UpdateQuestaoRequest},
    simulado::{CreateSimuladoRequest, Simulado, SimuladoFiltro, SimuladoResumo, UpdateSimuladoRequest},
};

const SIMULADO_COLS: &str = "id, titulo, slug, descricao, concurso_id, categoria, num_questoes, \
     tempo_limite_minutos, dificuldade, materias, publico, ativo, meta_revision, \
     questions_revision, created_at, updated_at";

const RESUMO_COLS: &str = "id, titulo, slug, descricao, concurso_id, categoria, num_questoes, \
     tempo_limite_minutos, dificuldade, materias, publico, updated_at";

const QUESTAO_COLS: &str = "id, simulado_id, posicao, enunciado, alternativas, resposta_correta, \
     explicacao, materia, topico, dificuldade, ativo, created_at, updated_at";

/// Offset of the first row for a 1-based page (`page=2, limit=10` -> 10).
fn deslocamento(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Appends the WHERE tail shared by the listing and count queries.
fn aplicar_filtros(
    qb: &mut QueryBuilder<'_, Postgres>,
    filtro: &SimuladoFiltro,
    user_id: Option<i64>,
) {
    qb.push(" WHERE deleted_at IS NULL AND ativo = TRUE");

    if let Some(concurso_id) = filtro.concurso_id {
        qb.push(" AND concurso_id = ").push_bind(concurso_id);
    }
    if let Some(dificuldade) = &filtro.dificuldade {
        qb.push(" AND dificuldade = ").push_bind(dificuldade.clone());
    }
    if let Some(publico) = filtro.publico {
        qb.push(" AND publico = ").push_bind(publico);
    }
    if let Some(search) = &filtro.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (titulo ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR descricao ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(ids) = &filtro.ids {
        qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(excluir_ids) = &filtro.excluir_ids {
        qb.push(" AND id <> ALL(")
            .push_bind(excluir_ids.clone())
            .push(")");
    }

    // Per-user completion status, resolved against progresso_usuario.
    if let (Some(status), Some(user_id)) = (filtro.status.as_deref(), user_id) {
        match status {
            "finalizado" => {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM progresso_usuario p \
                     WHERE p.simulado_id = simulados.id AND p.user_id = ",
                )
                .push_bind(user_id)
                .push(" AND p.concluido AND p.deleted_at IS NULL)");
            }
            "em_andamento" => {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM progresso_usuario p \
                     WHERE p.simulado_id = simulados.id AND p.user_id = ",
                )
                .push_bind(user_id)
                .push(" AND NOT p.concluido AND p.deleted_at IS NULL)");
            }
            "nao_iniciado" => {
                qb.push(
                    " AND NOT EXISTS (SELECT 1 FROM progresso_usuario p \
                     WHERE p.simulado_id = simulados.id AND p.user_id = ",
                )
                .push_bind(user_id)
                .push(" AND p.deleted_at IS NULL)");
            }
            _ => {}
        }
    }
}

#[derive(Clone)]
pub struct SimuladoRepository {
    pool: PgPool,
}

impl SimuladoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated listing with total count.
    pub async fn listar(
        &self,
        filtro: &SimuladoFiltro,
        page: i64,
        limit: i64,
        user_id: Option<i64>,
    ) -> Result<(Vec<SimuladoResumo>, i64), sqlx::Error> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM simulados");
        aplicar_filtros(&mut count_qb, filtro, user_id);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM simulados",
            RESUMO_COLS
        ));
        aplicar_filtros(&mut qb, filtro, user_id);
        qb.push(" ORDER BY updated_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(deslocamento(page, limit));

        let items = qb
            .build_query_as::<SimuladoResumo>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    /// Single record by slug. Absence is `None`, not an error.
    pub async fn buscar_por_slug(&self, slug: &str) -> Result<Option<Simulado>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM simulados WHERE slug = $1 AND deleted_at IS NULL",
            SIMULADO_COLS
        );
        sqlx::query_as::<_, Simulado>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Simulado>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM simulados WHERE id = $1 AND deleted_at IS NULL",
            SIMULADO_COLS
        );
        sqlx::query_as::<_, Simulado>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Active questions of a simulado, ordered by position.
    pub async fn listar_questoes(
        &self,
        simulado_id: i64,
    ) -> Result<Vec<QuestaoSimulado>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM questoes_simulado \
             WHERE simulado_id = $1 AND deleted_at IS NULL AND ativo = TRUE \
             ORDER BY posicao ASC, id ASC",
            QUESTAO_COLS
        );
        sqlx::query_as::<_, QuestaoSimulado>(&sql)
            .bind(simulado_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn criar_simulado(
        &self,
        req: &CreateSimuladoRequest,
    ) -> Result<Simulado, sqlx::Error> {
        let sql = format!(
            "INSERT INTO simulados \
             (titulo, slug, descricao, concurso_id, categoria, tempo_limite_minutos, \
              dificuldade, materias, publico) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            SIMULADO_COLS
        );
        sqlx::query_as::<_, Simulado>(&sql)
            .bind(&req.titulo)
            .bind(&req.slug)
            .bind(&req.descricao)
            .bind(req.concurso_id)
            .bind(&req.categoria)
            .bind(req.tempo_limite_minutos)
            .bind(&req.dificuldade)
            .bind(Json(req.materias.clone()))
            .bind(req.publico)
            .fetch_one(&self.pool)
            .await
    }

    /// Partial update; bumps `meta_revision`. The slug is never touched.
    pub async fn atualizar_simulado(
        &self,
        id: i64,
        req: &UpdateSimuladoRequest,
    ) -> Result<Option<Simulado>, sqlx::Error> {
        let sql = format!(
            "UPDATE simulados SET \
             titulo = COALESCE($2, titulo), \
             descricao = COALESCE($3, descricao), \
             concurso_id = COALESCE($4, concurso_id), \
             categoria = COALESCE($5, categoria), \
             tempo_limite_minutos = COALESCE($6, tempo_limite_minutos), \
             dificuldade = COALESCE($7, dificuldade), \
             materias = COALESCE($8, materias), \
             publico = COALESCE($9, publico), \
             ativo = COALESCE($10, ativo), \
             meta_revision = meta_revision + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {}",
            SIMULADO_COLS
        );
        sqlx::query_as::<_, Simulado>(&sql)
            .bind(id)
            .bind(&req.titulo)
            .bind(&req.descricao)
            .bind(req.concurso_id)
            .bind(&req.categoria)
            .bind(req.tempo_limite_minutos)
            .bind(&req.dificuldade)
            .bind(req.materias.clone().map(Json))
            .bind(req.publico)
            .bind(req.ativo)
            .fetch_optional(&self.pool)
            .await
    }

    /// Soft delete. Yields the slug of the removed record, or `None` when the
    /// id does not exist (or is already deleted).
    pub async fn excluir_simulado(&self, id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE simulados SET deleted_at = NOW(), meta_revision = meta_revision + 1, \
             updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING slug",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a question and bumps the owning simulado's question counters
    /// in one transaction. `None` when the simulado does not exist.
    pub async fn criar_questao(
        &self,
        simulado_id: i64,
        req: &CreateQuestaoRequest,
    ) -> Result<Option<QuestaoSimulado>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE simulados SET questions_revision = questions_revision + 1, \
             num_questoes = num_questoes + 1, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(simulado_id)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!(
            "INSERT INTO questoes_simulado \
             (simulado_id, posicao, enunciado, alternativas, resposta_correta, \
              explicacao, materia, topico, dificuldade) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            QUESTAO_COLS
        );
        let questao = sqlx::query_as::<_, QuestaoSimulado>(&sql)
            .bind(simulado_id)
            .bind(req.posicao)
            .bind(&req.enunciado)
            .bind(Json(req.alternativas.clone()))
            .bind(&req.resposta_correta)
            .bind(&req.explicacao)
            .bind(&req.materia)
            .bind(&req.topico)
            .bind(&req.dificuldade)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(questao))
    }

    /// Partial update of a question; bumps the owner's `questions_revision`.
    /// Flipping `ativo` also adjusts the owner's `num_questoes`, which counts
    /// active questions only.
    pub async fn atualizar_questao(
        &self,
        id: i64,
        req: &UpdateQuestaoRequest,
    ) -> Result<Option<QuestaoSimulado>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let ativo_anterior: Option<bool> = sqlx::query_scalar(
            "SELECT ativo FROM questoes_simulado \
             WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let ativo_anterior = match ativo_anterior {
            Some(a) => a,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let sql = format!(
            "UPDATE questoes_simulado SET \
             posicao = COALESCE($2, posicao), \
             enunciado = COALESCE($3, enunciado), \
             alternativas = COALESCE($4, alternativas), \
             resposta_correta = COALESCE($5, resposta_correta), \
             explicacao = COALESCE($6, explicacao), \
             materia = COALESCE($7, materia), \
             topico = COALESCE($8, topico), \
             dificuldade = COALESCE($9, dificuldade), \
             ativo = COALESCE($10, ativo), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {}",
            QUESTAO_COLS
        );
        let questao = sqlx::query_as::<_, QuestaoSimulado>(&sql)
            .bind(id)
            .bind(req.posicao)
            .bind(&req.enunciado)
            .bind(req.alternativas.clone().map(Json))
            .bind(&req.resposta_correta)
            .bind(&req.explicacao)
            .bind(&req.materia)
            .bind(&req.topico)
            .bind(&req.dificuldade)
            .bind(req.ativo)
            .fetch_optional(&mut *tx)
            .await?;

        let questao = match questao {
            Some(q) => q,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let delta: i32 = match (ativo_anterior, questao.ativo) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        };

        sqlx::query(
            "UPDATE simulados SET questions_revision = questions_revision + 1, \
             num_questoes = GREATEST(num_questoes + $2, 0), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(questao.simulado_id)
        .bind(delta)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(questao))
    }

    /// Soft-deletes a question and maintains the owner's counters.
    /// Yields the owning simulado id, or `None` for an unknown question.
    /// `num_questoes` counts active questions, so deleting a row that was
    /// already inactive leaves it untouched.
    pub async fn excluir_questao(&self, id: i64) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let removida: Option<(i64, bool)> = sqlx::query_as(
            "UPDATE questoes_simulado SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING simulado_id, ativo",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let (simulado_id, era_ativa) = match removida {
            Some(row) => row,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let delta: i32 = if era_ativa { -1 } else { 0 };
        sqlx::query(
            "UPDATE simulados SET questions_revision = questions_revision + 1, \
             num_questoes = GREATEST(num_questoes + $2, 0), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(simulado_id)
        .bind(delta)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(simulado_id))
    }
}
