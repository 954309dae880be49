/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Authentication state machine and session notifications
//!
//! ```text
//! Unauthenticated --login/register/google--> Authenticated
//! Authenticated   --401 on a request-------> Refreshing
//! Refreshing      --refresh succeeded------> Authenticated
//! Refreshing      --refresh failed---------> Unauthenticated (SessionExpired)
//! any             --logout-----------------> Unauthenticated (LoggedOut)
//! ```
//!
//! The application listens for [`SessionEvent::SessionExpired`] to navigate
//! back to its login view.

use std::fmt;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

const EVENT_CAPACITY: usize = 16;

/// Current authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No usable tokens
    Unauthenticated,
    /// Tokens stored and believed valid
    Authenticated,
    /// A token refresh is in flight
    Refreshing,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::Authenticated => "authenticated",
            AuthState::Refreshing => "refreshing",
        };
        f.write_str(name)
    }
}

/// Notifications emitted on session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login, registration or Google sign-in succeeded
    LoggedIn,
    /// The access token was renewed
    TokenRefreshed,
    /// The user logged out
    LoggedOut,
    /// The refresh failed and the session was cleared; show the login view
    SessionExpired,
}

/// Holds the auth state and fans out session events
#[derive(Debug)]
pub struct SessionSignal {
    state: watch::Sender<AuthState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionSignal {
    /// Creates a signal starting in `initial`
    #[must_use]
    pub fn new(initial: AuthState) -> Self {
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { state, events }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// Receiver that observes every state change
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Receiver for session events emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn logged_in(&self) {
        self.transition(AuthState::Authenticated, Some(SessionEvent::LoggedIn));
    }

    pub(crate) fn refreshing(&self) {
        self.transition(AuthState::Refreshing, None);
    }

    /// Leaves `Refreshing` without an outcome; the stored tokens are untouched
    pub(crate) fn refresh_abandoned(&self) {
        let changed = self.state.send_if_modified(|state| {
            if *state == AuthState::Refreshing {
                *state = AuthState::Authenticated;
                true
            } else {
                false
            }
        });
        if changed {
            debug!("Refresh abandoned, auth state back to {}", AuthState::Authenticated);
        }
    }

    pub(crate) fn refreshed(&self) {
        self.transition(AuthState::Authenticated, Some(SessionEvent::TokenRefreshed));
    }

    pub(crate) fn expired(&self) {
        self.transition(AuthState::Unauthenticated, Some(SessionEvent::SessionExpired));
    }

    pub(crate) fn logged_out(&self) {
        self.transition(AuthState::Unauthenticated, Some(SessionEvent::LoggedOut));
    }

    fn transition(&self, next: AuthState, event: Option<SessionEvent>) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!("Auth state {} -> {}", previous, next);
        }
        if let Some(event) = event {
            info!("Session event: {:?}", event);
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

impl Default for SessionSignal {
    fn default() -> Self {
        Self::new(AuthState::Unauthenticated)
    }
}
