//! Session/authorization lifecycle.
//!
//! [`SessionState`] is the single owner of the authenticated /
//! anonymous / validating state of the whole application. The machine is a
//! plain struct so the transition rules can be tested without signals or a
//! browser; components wrap it in an `RwSignal` and the async drivers below
//! reach it through the [`SessionHandle`] seam.
//!
//! CONCURRENCY
//! ===========
//! Completions may arrive out of issue order. Every driver obtains a ticket
//! from `begin()` (which bumps the epoch) and every write after an await is
//! keyed to that ticket: a settle with a stale ticket is discarded, so a
//! late `login` rejection cannot overwrite a newer `check_auth`, and a stale
//! login cannot resurrect a session after `logout`. There is no request
//! cancellation; superseded results are detected and dropped here.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::{RwSignal, Update};

use crate::net::api::AuthApi;
use crate::net::token::TokenStore;
use crate::net::types::Principal;

/// Error shown when a stored credential no longer validates, distinct from a
/// fresh-login failure.
pub const SESSION_EXPIRED: &str = "Session expired, please sign in again.";

/// Authentication phase. `error` is an attribute on the state, not a phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Validating,
    Authenticated,
}

/// The session state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<Principal>,
    pub error: Option<String>,
    epoch: u64,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    pub fn is_validating(&self) -> bool {
        self.phase == SessionPhase::Validating
    }

    /// Start a lifecycle operation: enter `Validating`, drop any previous
    /// error, and return the ticket that keys this invocation's writes.
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.phase = SessionPhase::Validating;
        self.error = None;
        self.epoch
    }

    /// Whether `ticket` still identifies the most recent operation.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.epoch == ticket
    }

    /// Settle a `login`/`check_auth` outcome. Returns `false` (and changes
    /// nothing) when the ticket has been superseded.
    pub fn settle(&mut self, ticket: u64, outcome: Result<Principal, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match outcome {
            Ok(user) => {
                self.phase = SessionPhase::Authenticated;
                self.user = Some(user);
                self.error = None;
            }
            Err(message) => {
                self.phase = SessionPhase::Anonymous;
                self.user = None;
                self.error = Some(message);
            }
        }
        true
    }

    /// Settle a completed `logout`. Returns `false` when superseded.
    pub fn settle_signed_out(&mut self, ticket: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = SessionPhase::Anonymous;
        self.user = None;
        self.error = None;
        true
    }

    /// React to a credential rejection observed by the transport: drop to
    /// anonymous and supersede any in-flight operation.
    pub fn revoke(&mut self) {
        self.epoch += 1;
        self.phase = SessionPhase::Anonymous;
        self.user = None;
        self.error = Some(SESSION_EXPIRED.to_owned());
    }

    /// Drop the error attribute without changing the phase.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Write access to the shared session state. The UI backs this with a
/// signal; tests use a plain `RefCell`.
pub trait SessionHandle {
    fn apply(&self, f: &mut dyn FnMut(&mut SessionState));
}

impl SessionHandle for RwSignal<SessionState> {
    fn apply(&self, f: &mut dyn FnMut(&mut SessionState)) {
        let _ = self.try_update(|state| f(state));
    }
}

fn begin(session: &impl SessionHandle) -> u64 {
    let mut ticket = 0;
    session.apply(&mut |state| ticket = state.begin());
    ticket
}

fn is_current(session: &impl SessionHandle, ticket: u64) -> bool {
    let mut current = false;
    session.apply(&mut |state| current = state.is_current(ticket));
    current
}

fn settle(session: &impl SessionHandle, ticket: u64, outcome: &Result<Principal, String>) {
    session.apply(&mut |state| {
        state.settle(ticket, outcome.clone());
    });
}

/// Sign in: exchange credentials for a token, persist it, then fetch the
/// principal profile. The session is all-or-nothing — a profile failure
/// after a successful grant clears the freshly stored token.
pub async fn login<A: AuthApi>(
    api: &A,
    tokens: &dyn TokenStore,
    session: &impl SessionHandle,
    username: &str,
    password: &str,
) {
    let ticket = begin(session);
    let grant = match api.login_grant(username, password).await {
        Ok(grant) => grant,
        Err(err) => {
            settle(session, ticket, &Err(err.to_string()));
            return;
        }
    };

    // A newer operation owns the credential slot once this one is stale.
    if !is_current(session, ticket) {
        return;
    }
    tokens.save(&grant.access_token);

    match api.fetch_profile().await {
        Ok(user) => settle(session, ticket, &Ok(user)),
        Err(err) => {
            if is_current(session, ticket) {
                tokens.clear();
            }
            settle(session, ticket, &Err(err.to_string()));
        }
    }
}

/// Sign out. The logout endpoint is best-effort; local invalidation happens
/// regardless of its outcome.
pub async fn logout<A: AuthApi>(api: &A, tokens: &dyn TokenStore, session: &impl SessionHandle) {
    let ticket = begin(session);
    if let Err(err) = api.end_session().await {
        leptos::logging::warn!("logout request failed: {err}");
    }
    if is_current(session, ticket) {
        tokens.clear();
    }
    session.apply(&mut |state| {
        state.settle_signed_out(ticket);
    });
}

/// Resolve an unknown session at application start or after a remount using
/// whatever credential is currently stored.
pub async fn check_auth<A: AuthApi>(
    api: &A,
    tokens: &dyn TokenStore,
    session: &impl SessionHandle,
) {
    let ticket = begin(session);
    if tokens.read().is_none() {
        settle(session, ticket, &Err(SESSION_EXPIRED.to_owned()));
        return;
    }
    match api.fetch_profile().await {
        Ok(user) => settle(session, ticket, &Ok(user)),
        Err(err) => {
            leptos::logging::warn!("session validation failed: {err}");
            if is_current(session, ticket) {
                tokens.clear();
            }
            settle(session, ticket, &Err(SESSION_EXPIRED.to_owned()));
        }
    }
}
