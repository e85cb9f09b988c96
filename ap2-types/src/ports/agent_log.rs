//! Agent audit log port.

use crate::domain::AgentActionLog;
use crate::error::RepoError;

/// Append-only audit log of agent actions.
#[async_trait::async_trait]
pub trait AgentLogRepository: Send + Sync + 'static {
    /// Appends an entry and returns the number of entries now stored.
    async fn append_log(&self, entry: AgentActionLog) -> Result<usize, RepoError>;

    /// Returns every entry in insertion order.
    async fn list_logs(&self) -> Result<Vec<AgentActionLog>, RepoError>;
}
