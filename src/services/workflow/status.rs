//! Agent Status Reporting
//!
//! Observer seam for per-agent lifecycle events plus an in-memory activity
//! log that keeps one entry per agent, updated in place.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{AgentLogEntry, AgentRole, AgentStatus};

/// Receives `on_status(agent, status, output?)` at each transition.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, agent: AgentRole, status: AgentStatus, output: Option<&str>);
}

impl<F> StatusObserver for F
where
    F: Fn(AgentRole, AgentStatus, Option<&str>) + Send + Sync,
{
    fn on_status(&self, agent: AgentRole, status: AgentStatus, output: Option<&str>) {
        self(agent, status, output)
    }
}

/// Observer that discards every event
pub struct NoopObserver;

impl StatusObserver for NoopObserver {
    fn on_status(&self, _agent: AgentRole, _status: AgentStatus, _output: Option<&str>) {}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Forwards events to an observer, dropping transitions that would move an
/// agent backwards. Events for one agent reach the observer in order.
pub struct StatusReporter {
    observer: Arc<dyn StatusObserver>,
    states: Mutex<HashMap<AgentRole, AgentStatus>>,
}

impl StatusReporter {
    pub fn new(observer: Arc<dyn StatusObserver>) -> Self {
        Self {
            observer,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Publish a transition. Returns false when it was rejected.
    pub fn report(&self, agent: AgentRole, status: AgentStatus, output: Option<&str>) -> bool {
        let mut states = lock(&self.states);
        let allowed = match states.get(&agent) {
            Some(current) => current.can_transition_to(status),
            None => true,
        };
        if !allowed {
            tracing::warn!(agent = %agent, status = %status, "[StatusReporter] ignoring backward transition");
            return false;
        }
        states.insert(agent, status);
        // held across the callback so per-agent order is preserved
        self.observer.on_status(agent, status, output);
        true
    }

    pub fn status_of(&self, agent: AgentRole) -> Option<AgentStatus> {
        lock(&self.states).get(&agent).copied()
    }
}

/// Activity log with one entry per agent, upserted by identity.
#[derive(Debug, Default)]
pub struct AgentActivityLog {
    entries: Mutex<Vec<AgentLogEntry>>,
}

impl AgentActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the agent's entry
    pub fn upsert(&self, agent: AgentRole, status: AgentStatus, output: Option<&str>) {
        let mut entries = lock(&self.entries);
        let output = output.map(str::to_string);
        match entries.iter_mut().find(|e| e.agent == agent) {
            Some(entry) => entry.update(status, output),
            None => entries.push(AgentLogEntry::new(agent, status, output)),
        }
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> Vec<AgentLogEntry> {
        lock(&self.entries).clone()
    }

    pub fn get(&self, agent: AgentRole) -> Option<AgentLogEntry> {
        lock(&self.entries).iter().find(|e| e.agent == agent).cloned()
    }

    /// Working agents first, then most recently updated first
    pub fn sorted_view(&self) -> Vec<AgentLogEntry> {
        let mut view = self.entries();
        view.sort_by(|a, b| {
            let a_working = a.status == AgentStatus::Working;
            let b_working = b.status == AgentStatus::Working;
            b_working.cmp(&a_working).then_with(|| {
                let ta = chrono::DateTime::parse_from_rfc3339(&a.timestamp).ok();
                let tb = chrono::DateTime::parse_from_rfc3339(&b.timestamp).ok();
                tb.cmp(&ta)
            })
        });
        view
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

impl StatusObserver for AgentActivityLog {
    fn on_status(&self, agent: AgentRole, status: AgentStatus, output: Option<&str>) {
        self.upsert(agent, status, output);
    }
}
