use crate::config::SessionConfig;
use audit_pack_model::SessionId;
use audit_pack_store::ChecklistStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Default)]
pub struct SessionMetrics {
    pub sessions_created: AtomicU64,
    pub sessions_evicted: AtomicU64,
    pub active_sessions: AtomicU64,
    pub uploads_completed: AtomicU64,
    pub uploads_not_found: AtomicU64,
}

struct SessionEntry {
    checklist: Arc<Mutex<ChecklistStore>>,
    last_access: Instant,
}

/// Owns every live session's checklist. Each session gets its own store
/// seeded with the standard pack; no state is shared across sessions.
/// Entries idle past `idle_ttl` are evicted by the background task, and the
/// least-recently-used entry is evicted when the cap is reached.
pub struct SessionRegistry {
    cfg: SessionConfig,
    entries: Mutex<HashMap<SessionId, SessionEntry>>,
    pub metrics: Arc<SessionMetrics>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(cfg: SessionConfig) -> Arc<Self> {
        Arc::new(Self {
            cfg,
            entries: Mutex::new(HashMap::new()),
            metrics: Arc::new(SessionMetrics::default()),
        })
    }

    /// Get-or-create the checklist owned by `id`, bumping its last access.
    pub async fn checklist_for(&self, id: &SessionId) -> Arc<Mutex<ChecklistStore>> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(id) {
            entry.last_access = Instant::now();
            return Arc::clone(&entry.checklist);
        }

        if entries.len() >= self.cfg.max_sessions {
            let victim = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(id, _)| id.clone());
            if let Some(victim) = victim {
                entries.remove(&victim);
                self.metrics.sessions_evicted.fetch_add(1, Ordering::Relaxed);
                info!(session = %victim, "session evicted at capacity");
            }
        }

        let checklist = Arc::new(Mutex::new(ChecklistStore::with_standard_pack()));
        entries.insert(
            id.clone(),
            SessionEntry {
                checklist: Arc::clone(&checklist),
                last_access: Instant::now(),
            },
        );
        self.metrics.sessions_created.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .active_sessions
            .store(entries.len() as u64, Ordering::Relaxed);
        info!(session = %id, "session created");
        checklist
    }

    pub async fn session_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn session_ids(&self) -> Vec<String> {
        let entries = self.entries.lock().await;
        let mut out: Vec<String> = entries.keys().map(ToString::to_string).collect();
        out.sort();
        out
    }

    pub fn spawn_background_tasks(self: &Arc<Self>) {
        let me = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(me.cfg.eviction_check_interval);
            loop {
                interval.tick().await;
                me.evict_idle().await;
            }
        });
    }

    pub(crate) async fn evict_idle(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let victims: Vec<SessionId> = entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_access) > self.cfg.idle_ttl)
            .map(|(id, _)| id.clone())
            .collect();
        for id in victims {
            entries.remove(&id);
            self.metrics.sessions_evicted.fetch_add(1, Ordering::Relaxed);
            info!(session = %id, "idle session evicted");
        }
        self.metrics
            .active_sessions
            .store(entries.len() as u64, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_pack_model::{Department, DocumentName};
    use std::time::Duration;

    fn registry(cfg: SessionConfig) -> Arc<SessionRegistry> {
        SessionRegistry::new(cfg)
    }

    #[tokio::test]
    async fn sessions_do_not_share_checklists() {
        let registry = registry(SessionConfig::default());
        let first = SessionId::parse("session-a").expect("session id");
        let second = SessionId::parse("session-b").expect("session id");

        let checklist_a = registry.checklist_for(&first).await;
        checklist_a
            .lock()
            .await
            .mark_completed(
                &Department::parse("HR").expect("department"),
                &DocumentName::parse("Training Records").expect("document"),
                1_000,
            )
            .expect("mark completed");

        let checklist_b = registry.checklist_for(&second).await;
        assert_eq!(checklist_b.lock().await.summary().completed_count, 0);
        assert_eq!(checklist_a.lock().await.summary().completed_count, 1);
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn same_session_id_returns_same_checklist() {
        let registry = registry(SessionConfig::default());
        let id = SessionId::parse("session-a").expect("session id");
        let first = registry.checklist_for(&id).await;
        first
            .lock()
            .await
            .mark_completed(
                &Department::parse("IT").expect("department"),
                &DocumentName::parse("System Access Logs").expect("document"),
                2_000,
            )
            .expect("mark completed");
        let second = registry.checklist_for(&id).await;
        assert_eq!(second.lock().await.summary().completed_count, 1);
        assert_eq!(
            registry.metrics.sessions_created.load(Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn capacity_evicts_least_recently_used() {
        let registry = registry(SessionConfig {
            max_sessions: 1,
            ..SessionConfig::default()
        });
        let first = SessionId::parse("session-a").expect("session id");
        let second = SessionId::parse("session-b").expect("session id");
        registry.checklist_for(&first).await;
        registry.checklist_for(&second).await;
        assert_eq!(registry.session_count().await, 1);
        assert_eq!(registry.session_ids().await, vec!["session-b".to_string()]);
        assert_eq!(
            registry.metrics.sessions_evicted.load(Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let registry = registry(SessionConfig {
            idle_ttl: Duration::from_millis(1),
            eviction_check_interval: Duration::from_millis(1),
            ..SessionConfig::default()
        });
        let id = SessionId::parse("session-a").expect("session id");
        registry.checklist_for(&id).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        registry.evict_idle().await;
        assert_eq!(registry.session_count().await, 0);
        assert_eq!(
            registry.metrics.sessions_evicted.load(Ordering::Relaxed),
            1
        );
        assert_eq!(registry.metrics.active_sessions.load(Ordering::Relaxed), 0);
    }
}
