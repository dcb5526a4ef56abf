use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::{Pin, pin};
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use super::*;
use crate::net::client::ApiError;
use crate::net::token::MemoryTokenStore;
use crate::net::types::{AdminRole, LoginGrant};

// =============================================================
// Test fixtures
// =============================================================

impl SessionHandle for Rc<RefCell<SessionState>> {
    fn apply(&self, f: &mut dyn FnMut(&mut SessionState)) {
        f(&mut self.borrow_mut());
    }
}

fn principal() -> Principal {
    Principal {
        id: 1,
        username: "admin".to_owned(),
        role: AdminRole::Superadmin,
        is_active: true,
    }
}

fn grant() -> LoginGrant {
    LoginGrant {
        access_token: "tok-login".to_owned(),
        token_type: "bearer".to_owned(),
    }
}

struct MockAuthApi {
    grant: Result<LoginGrant, ApiError>,
    profile: Result<Principal, ApiError>,
    logout: Result<(), ApiError>,
    profile_calls: Cell<usize>,
}

impl MockAuthApi {
    fn new() -> Self {
        Self {
            grant: Ok(grant()),
            profile: Ok(principal()),
            logout: Ok(()),
            profile_calls: Cell::new(0),
        }
    }
}

impl AuthApi for MockAuthApi {
    async fn login_grant(&self, _username: &str, _password: &str) -> Result<LoginGrant, ApiError> {
        self.grant.clone()
    }

    async fn fetch_profile(&self) -> Result<Principal, ApiError> {
        self.profile_calls.set(self.profile_calls.get() + 1);
        self.profile.clone()
    }

    async fn end_session(&self) -> Result<(), ApiError> {
        self.logout.clone()
    }
}

/// Mock whose profile fetch stays pending until the gate is released,
/// allowing interleaved operations to be driven by hand.
struct GatedProfileApi {
    inner: MockAuthApi,
    gate: Rc<Cell<bool>>,
}

struct GateFuture(Rc<Cell<bool>>);

impl Future for GateFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() { Poll::Ready(()) } else { Poll::Pending }
    }
}

impl AuthApi for GatedProfileApi {
    async fn login_grant(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError> {
        self.inner.login_grant(username, password).await
    }

    async fn fetch_profile(&self) -> Result<Principal, ApiError> {
        GateFuture(self.gate.clone()).await;
        self.inner.fetch_profile().await
    }

    async fn end_session(&self) -> Result<(), ApiError> {
        self.inner.end_session().await
    }
}

fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
    }
}

fn poll_once<F: Future<Output = ()>>(fut: Pin<&mut F>) -> Poll<()> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}

fn state() -> Rc<RefCell<SessionState>> {
    Rc::new(RefCell::new(SessionState::default()))
}

// =============================================================
// SessionState machine
// =============================================================

#[test]
fn default_state_is_anonymous() {
    let state = SessionState::default();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.user.is_none());
    assert!(state.error.is_none());
}

#[test]
fn begin_enters_validating_and_drops_previous_error() {
    let mut state = SessionState::default();
    state.error = Some("old failure".to_owned());
    state.begin();
    assert_eq!(state.phase, SessionPhase::Validating);
    assert!(state.error.is_none());
}

#[test]
fn settle_ok_authenticates_with_user_present() {
    let mut state = SessionState::default();
    let ticket = state.begin();
    assert!(state.settle(ticket, Ok(principal())));
    assert!(state.is_authenticated());
    assert!(state.user.is_some());
    assert!(state.error.is_none());
}

#[test]
fn settle_err_returns_to_anonymous_with_message() {
    let mut state = SessionState::default();
    let ticket = state.begin();
    assert!(state.settle(ticket, Err("bad credentials".to_owned())));
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.user.is_none());
    assert_eq!(state.error.as_deref(), Some("bad credentials"));
}

#[test]
fn stale_settle_is_discarded() {
    let mut state = SessionState::default();
    let stale = state.begin();
    let current = state.begin();
    assert!(!state.settle(stale, Ok(principal())));
    assert_eq!(state.phase, SessionPhase::Validating);
    assert!(state.settle(current, Err("newer outcome".to_owned())));
    assert_eq!(state.error.as_deref(), Some("newer outcome"));
}

#[test]
fn stale_login_cannot_resurrect_a_signed_out_session() {
    let mut state = SessionState::default();
    let login_ticket = state.begin();
    let logout_ticket = state.begin();
    assert!(state.settle_signed_out(logout_ticket));
    // The login issued earlier resolves later; its write must be dropped.
    assert!(!state.settle(login_ticket, Ok(principal())));
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.user.is_none());
}

#[test]
fn revoke_supersedes_in_flight_operations() {
    let mut state = SessionState::default();
    let ticket = state.begin();
    state.revoke();
    assert!(!state.settle(ticket, Ok(principal())));
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some(SESSION_EXPIRED));
}

#[test]
fn revoke_twice_is_idempotent() {
    let mut state = SessionState::default();
    state.revoke();
    state.revoke();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some(SESSION_EXPIRED));
}

#[test]
fn clear_error_keeps_the_phase() {
    let mut state = SessionState::default();
    let ticket = state.begin();
    state.settle(ticket, Err("bad credentials".to_owned()));
    state.clear_error();
    assert!(state.error.is_none());
    assert_eq!(state.phase, SessionPhase::Anonymous);
}

// =============================================================
// login driver
// =============================================================

#[test]
fn login_success_saves_token_and_authenticates() {
    let api = MockAuthApi::new();
    let tokens = MemoryTokenStore::default();
    let session = state();

    block_on(login(&api, &tokens, &session, "admin", "hunter2"));

    assert_eq!(tokens.read().as_deref(), Some("tok-login"));
    let state = session.borrow();
    assert!(state.is_authenticated());
    assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("admin"));
}

#[test]
fn rejected_login_leaves_store_empty_and_surfaces_server_message() {
    let mut api = MockAuthApi::new();
    api.grant = Err(ApiError::Api("Invalid username or password".to_owned()));
    let tokens = MemoryTokenStore::default();
    let session = state();

    block_on(login(&api, &tokens, &session, "admin", "wrong"));

    assert!(tokens.read().is_none());
    let state = session.borrow();
    assert!(!state.is_authenticated());
    assert_eq!(state.error.as_deref(), Some("Invalid username or password"));
}

#[test]
fn profile_failure_after_grant_clears_the_fresh_token() {
    // The session is all-or-nothing: no orphaned credential may remain.
    let mut api = MockAuthApi::new();
    api.profile = Err(ApiError::Api("profile unavailable".to_owned()));
    let tokens = MemoryTokenStore::default();
    let session = state();

    block_on(login(&api, &tokens, &session, "admin", "hunter2"));

    assert!(tokens.read().is_none());
    let state = session.borrow();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some("profile unavailable"));
}

#[test]
fn logout_during_in_flight_login_wins() {
    let api = GatedProfileApi {
        inner: MockAuthApi::new(),
        gate: Rc::new(Cell::new(false)),
    };
    let tokens = MemoryTokenStore::default();
    let session = state();

    // Login advances past the token grant and parks on the profile fetch.
    let mut login_fut = pin!(login(&api, &tokens, &session, "admin", "hunter2"));
    assert!(poll_once(login_fut.as_mut()).is_pending());
    assert_eq!(tokens.read().as_deref(), Some("tok-login"));

    // A logout issued meanwhile completes first.
    block_on(logout(&api.inner, &tokens, &session));
    assert!(tokens.read().is_none());

    // The stale login resolves afterwards and must change nothing.
    api.gate.set(true);
    block_on(login_fut);
    assert!(tokens.read().is_none());
    let state = session.borrow();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.user.is_none());
}

#[test]
fn failed_login_error_does_not_leak_into_later_authentication() {
    let mut api = MockAuthApi::new();
    api.grant = Err(ApiError::Api("Invalid username or password".to_owned()));
    let tokens = MemoryTokenStore::default();
    let session = state();

    block_on(login(&api, &tokens, &session, "admin", "wrong"));
    assert!(session.borrow().error.is_some());

    tokens.save("tok-existing");
    let api = MockAuthApi::new();
    block_on(check_auth(&api, &tokens, &session));

    let state = session.borrow();
    assert!(state.is_authenticated());
    assert!(state.error.is_none());
}

// =============================================================
// logout driver
// =============================================================

#[test]
fn logout_clears_token_and_settles_anonymous() {
    let api = MockAuthApi::new();
    let tokens = MemoryTokenStore::default();
    tokens.save("tok-existing");
    let session = state();

    block_on(logout(&api, &tokens, &session));

    assert!(tokens.read().is_none());
    let state = session.borrow();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.error.is_none());
}

#[test]
fn logout_endpoint_failure_still_invalidates_locally() {
    let mut api = MockAuthApi::new();
    api.logout = Err(ApiError::Network("connection refused".to_owned()));
    let tokens = MemoryTokenStore::default();
    tokens.save("tok-existing");
    let session = state();

    block_on(logout(&api, &tokens, &session));

    assert!(tokens.read().is_none());
    assert_eq!(session.borrow().phase, SessionPhase::Anonymous);
}

// =============================================================
// check_auth driver
// =============================================================

#[test]
fn check_auth_without_stored_token_settles_expired_without_a_network_call() {
    let api = MockAuthApi::new();
    let tokens = MemoryTokenStore::default();
    let session = state();

    block_on(check_auth(&api, &tokens, &session));

    assert_eq!(api.profile_calls.get(), 0);
    let state = session.borrow();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some(SESSION_EXPIRED));
}

#[test]
fn check_auth_with_valid_token_authenticates() {
    let api = MockAuthApi::new();
    let tokens = MemoryTokenStore::default();
    tokens.save("tok-existing");
    let session = state();

    block_on(check_auth(&api, &tokens, &session));

    assert_eq!(api.profile_calls.get(), 1);
    assert!(session.borrow().is_authenticated());
}

#[test]
fn check_auth_rejection_clears_token_and_reports_expiry() {
    let mut api = MockAuthApi::new();
    api.profile = Err(ApiError::Api("token revoked".to_owned()));
    let tokens = MemoryTokenStore::default();
    tokens.save("tok-existing");
    let session = state();

    block_on(check_auth(&api, &tokens, &session));

    assert!(tokens.read().is_none());
    let state = session.borrow();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    // Expiry is reported distinctly from a fresh-login failure.
    assert_eq!(state.error.as_deref(), Some(SESSION_EXPIRED));
}
