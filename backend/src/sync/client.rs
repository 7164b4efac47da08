//! Remote sync adapter
//!
//! Pushes confirmed local mutations to the external session backend over
//! its small REST surface. The adapter is deliberately dumb: one request
//! per mutation, a 5-second timeout, no retries, no backoff. A failed push
//! surfaces exactly once; compensation is the orchestrator's job.
//!
//! `SyncBackend` is the seam: the orchestrator only ever sees the trait, so
//! tests script failures through `MockSyncBackend` without a server.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::session::{SessionId, Team};
use crate::sync::wire::{
    Game1ApprovalUpdate, Game1InputUpdate, Game2InputUpdate, InvestorBidsUpdate,
};

/// Default backend base URL when `DEAL_BACKEND_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors surfaced by a sync push
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backend was unreachable or the request failed in transit
    #[error("sync transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend rejected update: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// The four logical push operations plus session creation
///
/// Every operation is addressed by session identifier and team number and
/// returns success or a single, unretried failure.
pub trait SyncBackend {
    /// Register the session before any mutation is accepted
    fn create_session(&self, session: &SessionId) -> Result<(), SyncError>;

    /// Team-1 Game-1 field update
    fn push_game1_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1InputUpdate,
    ) -> Result<(), SyncError>;

    /// Team-2 Game-1 approval update
    fn push_game1_approval(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1ApprovalUpdate,
    ) -> Result<(), SyncError>;

    /// Team-1 Game-2 pricing/supply update
    fn push_game2_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game2InputUpdate,
    ) -> Result<(), SyncError>;

    /// Team-2 Game-2 bid update
    fn push_game2_bids(
        &self,
        session: &SessionId,
        team: Team,
        update: &InvestorBidsUpdate,
    ) -> Result<(), SyncError>;
}

impl<B: SyncBackend + ?Sized> SyncBackend for std::sync::Arc<B> {
    fn create_session(&self, session: &SessionId) -> Result<(), SyncError> {
        (**self).create_session(session)
    }

    fn push_game1_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1InputUpdate,
    ) -> Result<(), SyncError> {
        (**self).push_game1_input(session, team, update)
    }

    fn push_game1_approval(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1ApprovalUpdate,
    ) -> Result<(), SyncError> {
        (**self).push_game1_approval(session, team, update)
    }

    fn push_game2_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game2InputUpdate,
    ) -> Result<(), SyncError> {
        (**self).push_game2_input(session, team, update)
    }

    fn push_game2_bids(
        &self,
        session: &SessionId,
        team: Team,
        update: &InvestorBidsUpdate,
    ) -> Result<(), SyncError> {
        (**self).push_game2_bids(session, team, update)
    }
}

/// Blocking HTTP client for the backend's REST surface
pub struct HttpSyncClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpSyncClient {
    /// Create a client for the given base URL (trailing slash tolerated)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Create a client from `DEAL_BACKEND_URL`, defaulting to localhost
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DEAL_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<T: Serialize>(&self, path: &str, payload: Option<&T>) -> Result<(), SyncError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "pushing update to session backend");

        let mut request = self.http.post(&url).timeout(REQUEST_TIMEOUT);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            warn!(%url, status, "session backend rejected update");
            return Err(SyncError::Rejected { status, body });
        }

        Ok(())
    }
}

impl SyncBackend for HttpSyncClient {
    fn create_session(&self, session: &SessionId) -> Result<(), SyncError> {
        self.post::<()>(&format!("/simulation/?session_id={session}"), None)
    }

    fn push_game1_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1InputUpdate,
    ) -> Result<(), SyncError> {
        self.post(
            &format!("/simulation/game1/{session}/{}", team.wire_number()),
            Some(update),
        )
    }

    fn push_game1_approval(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1ApprovalUpdate,
    ) -> Result<(), SyncError> {
        self.post(
            &format!("/simulation/game1/approve/{session}/{}", team.wire_number()),
            Some(update),
        )
    }

    fn push_game2_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game2InputUpdate,
    ) -> Result<(), SyncError> {
        self.post(
            &format!("/simulation/game2/{session}/{}", team.wire_number()),
            Some(update),
        )
    }

    fn push_game2_bids(
        &self,
        session: &SessionId,
        team: Team,
        update: &InvestorBidsUpdate,
    ) -> Result<(), SyncError> {
        self.post(
            &format!("/simulation/game2/bids/{session}/{}", team.wire_number()),
            Some(update),
        )
    }
}

/// One recorded push, for test inspection
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPush {
    SessionCreate(SessionId),
    Game1Input(Team, Game1InputUpdate),
    Game1Approval(Team, Game1ApprovalUpdate),
    Game2Input(Team, Game2InputUpdate),
    Game2Bids(Team, InvestorBidsUpdate),
}

/// In-process sync backend for tests and offline runs
///
/// Records every push and can be scripted to fail the next N calls with a
/// rejected status.
///
/// NOTE: Available in all builds to support integration testing and the
/// CLI's offline mode, but should not back a real session.
#[derive(Debug, Default)]
pub struct MockSyncBackend {
    pushes: Mutex<Vec<RecordedPush>>,
    failures_remaining: Mutex<u32>,
}

impl MockSyncBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next `count` pushes to fail with HTTP 500
    pub fn fail_next(&self, count: u32) {
        *self.failures_remaining.lock().unwrap() = count;
    }

    /// Everything pushed so far, in order
    pub fn pushes(&self) -> Vec<RecordedPush> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }

    fn record(&self, push: RecordedPush) -> Result<(), SyncError> {
        let mut failures = self.failures_remaining.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(SyncError::Rejected {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        self.pushes.lock().unwrap().push(push);
        Ok(())
    }
}

impl SyncBackend for MockSyncBackend {
    fn create_session(&self, session: &SessionId) -> Result<(), SyncError> {
        self.record(RecordedPush::SessionCreate(session.clone()))
    }

    fn push_game1_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1InputUpdate,
    ) -> Result<(), SyncError> {
        let _ = session;
        self.record(RecordedPush::Game1Input(team, update.clone()))
    }

    fn push_game1_approval(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game1ApprovalUpdate,
    ) -> Result<(), SyncError> {
        let _ = session;
        self.record(RecordedPush::Game1Approval(team, update.clone()))
    }

    fn push_game2_input(
        &self,
        session: &SessionId,
        team: Team,
        update: &Game2InputUpdate,
    ) -> Result<(), SyncError> {
        let _ = session;
        self.record(RecordedPush::Game2Input(team, update.clone()))
    }

    fn push_game2_bids(
        &self,
        session: &SessionId,
        team: Team,
        update: &InvestorBidsUpdate,
    ) -> Result<(), SyncError> {
        let _ = session;
        self.record(RecordedPush::Game2Bids(team, update.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpSyncClient::new("http://example.test/");
        assert_eq!(client.base_url(), "http://example.test");
    }

    #[test]
    fn test_mock_scripted_failures_then_recovery() {
        let mock = MockSyncBackend::new();
        mock.fail_next(1);

        let session = SessionId::from("s1");
        let err = mock.create_session(&session).unwrap_err();
        assert!(matches!(err, SyncError::Rejected { status: 500, .. }));

        mock.create_session(&session).unwrap();
        assert_eq!(mock.push_count(), 1);
    }
}
