/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Single-flight token refresh coordination
pub mod refresh;
/// Auth state machine and session events
pub mod state;

pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use state::{AuthState, SessionEvent, SessionSignal};
