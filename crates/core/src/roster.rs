//! Roster management: seeding, admin creation and worker lookup.

use serde_json::json;

use crate::action_log::{self, action_types};
use crate::entities::Worker;
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::DbId;

/// Longest accepted worker name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Trim and check a worker name.
pub fn normalize_name(raw: &str) -> CoreResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("worker name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "worker name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Add a worker to the roster. Names are unique ignoring case.
pub async fn create_worker(store: &dyn DutyStore, raw_name: &str) -> CoreResult<Worker> {
    let name = normalize_name(raw_name)?;
    if store.find_worker_by_name(&name).await?.is_some() {
        return Err(CoreError::Conflict(format!("worker '{name}' already exists")));
    }
    let worker = store.create_worker(&name).await?;
    tracing::info!(worker_id = worker.id, name = %worker.name, "Worker created");
    action_log::record(
        store,
        action_types::WORKER_CREATED,
        json!({ "worker_id": worker.id, "worker_name": worker.name }),
    )
    .await;
    Ok(worker)
}

/// Ensure every name in `names` exists. Returns the workers that were
/// created by this call; existing names are skipped.
pub async fn seed_roster(store: &dyn DutyStore, names: &[String]) -> CoreResult<Vec<Worker>> {
    let mut created = Vec::new();
    for raw in names {
        let name = match normalize_name(raw) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(name = %raw, error = %e, "Skipping invalid seed worker name");
                continue;
            }
        };
        if store.find_worker_by_name(&name).await?.is_some() {
            tracing::debug!(%name, "Seed worker already exists");
            continue;
        }
        match store.create_worker(&name).await {
            Ok(worker) => {
                tracing::info!(%name, "Seeded worker");
                created.push(worker);
            }
            // Created concurrently by another instance.
            Err(CoreError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}

/// Roster sorted by name, ignoring case.
pub async fn list_by_name(store: &dyn DutyStore) -> CoreResult<Vec<Worker>> {
    let mut workers = store.list_workers().await?;
    workers.sort_by_cached_key(|w| w.name.to_lowercase());
    Ok(workers)
}

/// Look a worker up by id, or by name when no id is given.
pub async fn resolve_worker(
    store: &dyn DutyStore,
    worker_id: Option<DbId>,
    worker_name: Option<&str>,
) -> CoreResult<Worker> {
    match (worker_id, worker_name.map(str::trim).filter(|n| !n.is_empty())) {
        (Some(id), _) => store
            .get_worker(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Worker", id)),
        (None, Some(name)) => store
            .find_worker_by_name(name)
            .await?
            .ok_or_else(|| CoreError::not_found("Worker", name)),
        (None, None) => Err(CoreError::Validation(
            "worker_id or worker_name is required".into(),
        )),
    }
}
