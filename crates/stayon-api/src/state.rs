//! Application state wiring the controller to its concrete infrastructure.
//!
//! `CaseController` is generic over the transcript repository; `AppState`
//! pins it to the filesystem store. Logged-in sessions are kept in memory,
//! keyed by session id, each behind its own async mutex.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use stayon_core::controller::CaseController;
use stayon_core::controller::dispatch::fixed_offset;
use stayon_core::llm::box_provider::BoxLlmProvider;
use stayon_core::llm::gateway::{GenerationSettings, LlmGateway};
use stayon_core::session::store::HistoryStore;
use stayon_infra::config::resolve_api_key;
use stayon_infra::filesystem::resolve_history_dir;
use stayon_infra::llm::create_provider;
use stayon_infra::transcript::FsTranscriptStore;
use stayon_types::config::GlobalConfig;
use stayon_types::session::{Session, outbound_history_key_for, session_id_of_history_key};

pub type ConcreteController = CaseController<FsTranscriptStore>;

/// How often the idle sweeper runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// One logged-in agent.
pub struct SessionSlot {
    pub session: Arc<Mutex<Session>>,
    pub last_seen: Instant,
}

/// Shared application state for the REST API.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GlobalConfig>,
    pub controller: Arc<ConcreteController>,
    pub sessions: Arc<DashMap<String, SessionSlot>>,
}

impl AppState {
    /// Build the provider, gateway and transcript store from config.
    pub async fn init(config: GlobalConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.llm).with_context(|| {
            format!(
                "no API key found: set the {} environment variable",
                config.llm.api_key_env
            )
        })?;
        let provider = create_provider(&config.llm, api_key)?;

        let history_dir = resolve_history_dir(&config, &data_dir);
        tokio::fs::create_dir_all(&history_dir)
            .await
            .with_context(|| format!("failed to create {}", history_dir.display()))?;

        tracing::info!(
            provider = provider.name(),
            model = %config.llm.model,
            history_dir = %history_dir.display(),
            "StayOn initialized"
        );

        let controller =
            Self::build_controller(&config, provider, FsTranscriptStore::new(history_dir));
        Ok(Self::with_controller(config, controller))
    }

    pub fn build_controller(
        config: &GlobalConfig,
        provider: BoxLlmProvider,
        store: FsTranscriptStore,
    ) -> ConcreteController {
        let gateway = LlmGateway::new(
            provider,
            HistoryStore::new(),
            GenerationSettings::from(&config.llm),
        );
        CaseController::new(
            Arc::new(gateway),
            Arc::new(store),
            fixed_offset(config.utc_offset_hours),
        )
    }

    pub fn with_controller(config: GlobalConfig, controller: ConcreteController) -> Self {
        Self {
            config: Arc::new(config),
            controller: Arc::new(controller),
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Register a freshly logged-in session.
    pub fn insert_session(&self, session_id: String, session: Session) -> Arc<Mutex<Session>> {
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(
            session_id,
            SessionSlot {
                session: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        handle
    }

    /// Look up a session and mark it as used. The guard is dropped before
    /// returning so callers can `.await` freely.
    pub fn touch_session(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        let mut slot = self.sessions.get_mut(session_id)?;
        slot.last_seen = Instant::now();
        Some(slot.session.clone())
    }

    pub fn remove_session(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.config.session_ttl_minutes.saturating_mul(60))
    }

    /// Drop sessions idle for longer than the TTL together with their
    /// history. History of a live session is kept however long it sits
    /// unread; other history entries expire on the same TTL.
    pub fn sweep_idle(&self) -> (usize, usize) {
        self.sweep_idle_at(Instant::now())
    }

    fn sweep_idle_at(&self, now: Instant) -> (usize, usize) {
        let ttl = self.session_ttl();
        let mut expired = Vec::new();
        self.sessions.retain(|session_id, slot| {
            let keep = now.saturating_duration_since(slot.last_seen) < ttl;
            if !keep {
                expired.push(session_id.clone());
            }
            keep
        });

        let history = self.controller.gateway().history();
        let mut histories = 0;
        for session_id in &expired {
            histories += usize::from(history.remove(session_id));
            histories += usize::from(history.remove(&outbound_history_key_for(session_id)));
        }
        histories += history.evict_idle_at(now, ttl, |key| {
            self.sessions.contains_key(session_id_of_history_key(key))
        });
        (expired.len(), histories)
    }
}

/// Periodically evict idle sessions and their history.
pub fn spawn_idle_sweeper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let (sessions, histories) = state.sweep_idle();
            if sessions > 0 || histories > 0 {
                tracing::info!(sessions, histories, "Evicted idle sessions");
            }
        }
    })
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::path::Path;

    use stayon_core::controller::Event;
    use stayon_core::llm::provider::LlmProvider;
    use stayon_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

    use super::*;
    use crate::http::extractors::session::SessionHandle;

    /// Replies with queued texts in order, then fails.
    pub struct ScriptedProvider {
        replies: std::sync::Mutex<VecDeque<String>>,
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let next = self.replies.lock().unwrap().pop_front();
            match next {
                Some(content) => Ok(CompletionResponse {
                    id: "resp_test".to_string(),
                    content,
                    model: request.model.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                }),
                None => Err(LlmError::Provider {
                    message: "no scripted reply left".to_string(),
                }),
            }
        }
    }

    pub fn test_state(history_dir: &Path, replies: &[&str]) -> AppState {
        let config = GlobalConfig {
            history_dir: Some(history_dir.to_path_buf()),
            ..GlobalConfig::default()
        };
        let provider = BoxLlmProvider::new(ScriptedProvider {
            replies: std::sync::Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        });
        let controller = AppState::build_controller(
            &config,
            provider,
            FsTranscriptStore::new(history_dir),
        );
        AppState::with_controller(config, controller)
    }

    /// Log in as `kim` / `1234` and register the session.
    pub async fn logged_in(state: &AppState) -> SessionHandle {
        let mut session = Session::new();
        state
            .controller
            .dispatch(
                &mut session,
                Event::Login {
                    name: "kim".to_string(),
                    code: "1234".to_string(),
                },
            )
            .await
            .unwrap();
        let session_id = session.session_id.clone();
        let handle = state.insert_session(session_id.clone(), session);
        SessionHandle {
            session_id,
            session: handle,
        }
    }
}
