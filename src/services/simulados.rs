// src/services/simulados.rs

//! Business rules for the simulados read path.
//!
//! Sits between the HTTP handlers and the repository: composes cache keys,
//! memoizes repository results and classifies "missing slug" as NotFound.
//! The cache is injected so it stays swappable; everything here treats it as
//! best-effort (a corrupt or missing entry falls through to the repository).

use std::sync::Arc;

use crate::{
    cache::Cache,
    error::AppError,
    models::{
        questao::{CreateQuestaoRequest, QuestaoSimulado, UpdateQuestaoRequest},
        simulado::{
            CreateSimuladoRequest, Pagina, Simulado, SimuladoFiltro, SimuladoResumo,
            UpdateSimuladoRequest,
        },
    },
    repository::SimuladoRepository,
};

/// Cache key for a listing. Mirrors the filter fields one-to-one so distinct
/// filter sets never collide.
fn chave_lista(filtro: &SimuladoFiltro, page: i64, limit: i64) -> String {
    let ids = |v: &Option<Vec<i64>>| {
        v.as_ref()
            .map(|ids| {
                ids.iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default()
    };
    format!(
        "simulados:list:{}:{}:{}:{}:{}:{}:{}:{}",
        filtro
            .concurso_id
            .map(|c| c.to_string())
            .unwrap_or_default(),
        page,
        limit,
        filtro.dificuldade.as_deref().unwrap_or(""),
        filtro.search.as_deref().unwrap_or(""),
        filtro
            .publico
            .map(|p| p.to_string())
            .unwrap_or_default(),
        ids(&filtro.ids),
        ids(&filtro.excluir_ids),
    )
}

fn chave_detalhe(slug: &str) -> String {
    format!("simulados:slug:{}", slug)
}

fn chave_questoes(simulado_id: i64) -> String {
    format!("simulados:{}:questoes", simulado_id)
}

pub struct SimuladoService {
    repo: SimuladoRepository,
    cache: Arc<dyn Cache>,
}

impl SimuladoService {
    pub fn new(repo: SimuladoRepository, cache: Arc<dyn Cache>) -> Self {
        Self { repo, cache }
    }

    /// Paginated listing, cache-first.
    ///
    /// A `status` filter resolves against the caller's own progress, so those
    /// listings are never written to (or served from) the shared cache.
    pub async fn listar(
        &self,
        filtro: &SimuladoFiltro,
        page: i64,
        limit: i64,
        user_id: Option<i64>,
    ) -> Result<Pagina<SimuladoResumo>, AppError> {
        if filtro.status.is_some() {
            let (items, total) = self.repo.listar(filtro, page, limit, user_id).await?;
            return Ok(Pagina {
                items,
                total,
                page,
                limit,
            });
        }

        let chave = chave_lista(filtro, page, limit);
        if let Some(raw) = self.cache.get(&chave).await {
            if let Ok(pagina) = serde_json::from_str::<Pagina<SimuladoResumo>>(&raw) {
                return Ok(pagina);
            }
            tracing::warn!("Discarding undecodable cache entry for key {}", chave);
        }

        let (items, total) = self.repo.listar(filtro, page, limit, None).await?;
        let pagina = Pagina {
            items,
            total,
            page,
            limit,
        };

        if let Ok(raw) = serde_json::to_string(&pagina) {
            self.cache.set(&chave, raw).await;
        }

        Ok(pagina)
    }

    /// Detail by slug; an unknown slug is a NotFound failure here, not in the
    /// repository.
    pub async fn detalhe_por_slug(&self, slug: &str) -> Result<Simulado, AppError> {
        let chave = chave_detalhe(slug);
        if let Some(raw) = self.cache.get(&chave).await {
            if let Ok(simulado) = serde_json::from_str::<Simulado>(&raw) {
                return Ok(simulado);
            }
        }

        let simulado = self
            .repo
            .buscar_por_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Simulado '{}' not found", slug)))?;

        if let Ok(raw) = serde_json::to_string(&simulado) {
            self.cache.set(&chave, raw).await;
        }

        Ok(simulado)
    }

    /// Ordered question list of the simulado behind `slug`, cache-first.
    /// Returns the owning simulado too so callers can derive the validator
    /// from its revision counters.
    pub async fn questoes_por_slug(
        &self,
        slug: &str,
    ) -> Result<(Simulado, Vec<QuestaoSimulado>), AppError> {
        let simulado = self.detalhe_por_slug(slug).await?;

        let chave = chave_questoes(simulado.id);
        if let Some(raw) = self.cache.get(&chave).await {
            if let Ok(questoes) = serde_json::from_str::<Vec<QuestaoSimulado>>(&raw) {
                return Ok((simulado, questoes));
            }
        }

        let questoes = self.repo.listar_questoes(simulado.id).await?;
        if let Ok(raw) = serde_json::to_string(&questoes) {
            self.cache.set(&chave, raw).await;
        }

        Ok((simulado, questoes))
    }

    /// Write-through refresh of the detail entry. Keeps conditional GETs
    /// honest: the cached record always carries the current revisions.
    async fn gravar_detalhe(&self, simulado: &Simulado) {
        if let Ok(raw) = serde_json::to_string(simulado) {
            self.cache.set(&chave_detalhe(&simulado.slug), raw).await;
        }
    }

    /// After any question mutation both the question list and the owning
    /// record (questions_revision, num_questoes) changed; refresh both.
    async fn refrescar_apos_mutacao_questao(&self, simulado_id: i64) -> Result<(), AppError> {
        if let Some(simulado) = self.repo.buscar_por_id(simulado_id).await? {
            self.gravar_detalhe(&simulado).await;
            let questoes = self.repo.listar_questoes(simulado_id).await?;
            if let Ok(raw) = serde_json::to_string(&questoes) {
                self.cache.set(&chave_questoes(simulado_id), raw).await;
            }
        }
        Ok(())
    }

    pub async fn criar_simulado(
        &self,
        req: &CreateSimuladoRequest,
    ) -> Result<Simulado, AppError> {
        let simulado = self.repo.criar_simulado(req).await.map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("Slug '{}' already exists", req.slug))
            } else {
                AppError::from(e)
            }
        })?;

        self.gravar_detalhe(&simulado).await;
        Ok(simulado)
    }

    pub async fn atualizar_simulado(
        &self,
        id: i64,
        req: &UpdateSimuladoRequest,
    ) -> Result<Simulado, AppError> {
        let simulado = self
            .repo
            .atualizar_simulado(id, req)
            .await?
            .ok_or(AppError::NotFound("Simulado not found".to_string()))?;

        self.gravar_detalhe(&simulado).await;
        Ok(simulado)
    }

    pub async fn excluir_simulado(&self, id: i64) -> Result<(), AppError> {
        let slug = self
            .repo
            .excluir_simulado(id)
            .await?
            .ok_or(AppError::NotFound("Simulado not found".to_string()))?;

        // Tombstone: an undecodable entry forces the next read back to the
        // repository, which no longer sees the row.
        self.cache.set(&chave_detalhe(&slug), "null".to_string()).await;
        Ok(())
    }

    pub async fn criar_questao(
        &self,
        simulado_id: i64,
        req: &CreateQuestaoRequest,
    ) -> Result<QuestaoSimulado, AppError> {
        let questao = self
            .repo
            .criar_questao(simulado_id, req)
            .await?
            .ok_or(AppError::NotFound("Simulado not found".to_string()))?;

        self.refrescar_apos_mutacao_questao(simulado_id).await?;
        Ok(questao)
    }

    pub async fn atualizar_questao(
        &self,
        id: i64,
        req: &UpdateQuestaoRequest,
    ) -> Result<QuestaoSimulado, AppError> {
        let questao = self
            .repo
            .atualizar_questao(id, req)
            .await?
            .ok_or(AppError::NotFound("Questao not found".to_string()))?;

        self.refrescar_apos_mutacao_questao(questao.simulado_id).await?;
        Ok(questao)
    }

    pub async fn excluir_questao(&self, id: i64) -> Result<(), AppError> {
        let simulado_id = self
            .repo
            .excluir_questao(id)
            .await?
            .ok_or(AppError::NotFound("Questao not found".to_string()))?;

        self.refrescar_apos_mutacao_questao(simulado_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtro_base() -> SimuladoFiltro {
        SimuladoFiltro {
            concurso_id: Some(1),
            dificuldade: Some("medio".to_string()),
            search: Some("pf".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn list_keys_are_stable_and_distinct() {
        assert_eq!(chave_lista(&filtro_base(), 1, 20), chave_lista(&filtro_base(), 1, 20));
        assert_ne!(chave_lista(&filtro_base(), 1, 20), chave_lista(&filtro_base(), 2, 20));

        let mut outro = filtro_base();
        outro.search = Some("prf".to_string());
        assert_ne!(chave_lista(&filtro_base(), 1, 20), chave_lista(&outro, 1, 20));
    }

    #[test]
    fn entity_keys_embed_identity() {
        assert_eq!(chave_detalhe("prova-pf"), "simulados:slug:prova-pf");
        assert_eq!(chave_questoes(7), "simulados:7:questoes");
    }
}
