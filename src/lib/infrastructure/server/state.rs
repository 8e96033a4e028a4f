use crate::agent::Agent;
use crate::application::session::{Session, SessionOptions};
use crate::model::ModelProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub(crate) type SharedSession<P> = Arc<Mutex<Session<P>>>;

struct SessionSlot<P: ModelProvider> {
    session: SharedSession<P>,
    last_used: u64,
}

struct SessionTable<P: ModelProvider> {
    slots: HashMap<String, SessionSlot<P>>,
    clock: u64,
}

impl<P: ModelProvider> SessionTable<P> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Agent shared by every request plus at most `max_sessions` live sessions.
///
/// Opening a session beyond the cap drops the one used least recently.
pub(crate) struct ServerState<P: ModelProvider> {
    agent: Arc<Agent<P>>,
    session_options: SessionOptions,
    max_sessions: usize,
    sessions: Mutex<SessionTable<P>>,
}

impl<P: ModelProvider> ServerState<P> {
    pub(crate) fn new(
        agent: Arc<Agent<P>>,
        session_options: SessionOptions,
        max_sessions: usize,
    ) -> Self {
        Self {
            agent,
            session_options,
            max_sessions: max_sessions.max(1),
            sessions: Mutex::new(SessionTable {
                slots: HashMap::new(),
                clock: 0,
            }),
        }
    }

    pub(crate) fn agent(&self) -> Arc<Agent<P>> {
        Arc::clone(&self.agent)
    }

    pub(crate) async fn find(&self, id: &str) -> Option<SharedSession<P>> {
        let mut table = self.sessions.lock().await;
        let now = table.tick();
        let slot = table.slots.get_mut(id)?;
        slot.last_used = now;
        Some(slot.session.clone())
    }

    pub(crate) async fn create(&self) -> SharedSession<P> {
        let session = Session::new(self.agent(), self.session_options);
        let id = session.id().to_string();
        let shared = Arc::new(Mutex::new(session));

        let mut table = self.sessions.lock().await;
        while table.slots.len() >= self.max_sessions {
            let Some(oldest) = table
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            table.slots.remove(&oldest);
            info!(session_id = oldest.as_str(), "Dropped least recently used REST session");
        }
        let now = table.tick();
        table.slots.insert(
            id.clone(),
            SessionSlot {
                session: shared.clone(),
                last_used: now,
            },
        );
        debug!(session_id = id.as_str(), open = table.slots.len(), "Opened REST session");
        shared
    }

    /// Forget a session. Returns whether it existed.
    pub(crate) async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.lock().await.slots.remove(id).is_some();
        if removed {
            debug!(session_id = id, "Closed REST session");
        }
        removed
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.lock().await.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentOptions;
    use crate::model::{ModelError, ModelRequest, ModelResponse};
    use crate::tooling::ToolRegistry;
    use async_trait::async_trait;

    struct Silent;

    #[async_trait]
    impl ModelProvider for Silent {
        async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
            Ok(ModelResponse::new("Final Answer: ok".to_string()))
        }
    }

    fn state(max_sessions: usize) -> ServerState<Silent> {
        let agent = Agent::new(
            Arc::new(Silent),
            Arc::new(ToolRegistry::builder().build()),
            AgentOptions::new("silent", "none"),
        );
        ServerState::new(Arc::new(agent), SessionOptions::default(), max_sessions)
    }

    async fn id_of(session: &SharedSession<Silent>) -> String {
        session.lock().await.id().to_string()
    }

    #[tokio::test]
    async fn session_count_never_exceeds_the_cap() {
        let state = state(2);
        for _ in 0..5 {
            state.create().await;
        }
        assert_eq!(state.len().await, 2);
    }

    #[tokio::test]
    async fn least_recently_used_session_is_dropped() {
        let state = state(2);
        let first = id_of(&state.create().await).await;
        let second = id_of(&state.create().await).await;

        assert!(state.find(&first).await.is_some());
        let third = id_of(&state.create().await).await;

        assert!(state.find(&first).await.is_some());
        assert!(state.find(&second).await.is_none());
        assert!(state.find(&third).await.is_some());
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let state = state(4);
        let id = id_of(&state.create().await).await;

        assert!(state.remove(&id).await);
        assert!(state.find(&id).await.is_none());
        assert!(!state.remove(&id).await);
        assert_eq!(state.len().await, 0);
    }
}
