/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Tasks Client Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tasks_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! client.auth().login("ada@example.com", "secret").await?;
//! let stats = client.get_statistics().await?;
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Client configuration
pub use crate::application::config::{Config, RateLimiterConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type and body normalization
pub use crate::error::{AppError, extract_error_message};

// ============================================================================
// CLIENT AND AUTHENTICATION
// ============================================================================

/// High-level client
pub use crate::application::client::Client;

/// Session operations
pub use crate::application::auth::Auth;

/// Auth state and session events
pub use crate::session::{AuthState, SessionEvent};

// ============================================================================
// SERVICES (TRAITS)
// ============================================================================

/// Resource service traits, implemented by [`Client`]
pub use crate::application::services::{CategoryService, SubtaskService, TaskService};

// ============================================================================
// TRANSPORT
// ============================================================================

/// Authenticated transport and raw request description
pub use crate::model::http::{ApiRequest, HttpClient, is_auth_endpoint};

/// Client-side throttling
pub use crate::application::rate_limiter::RateLimiter;

// ============================================================================
// MODELS
// ============================================================================

/// Authentication models
pub use crate::model::auth::{
    AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest, TokenPair, User,
};

/// Task models
pub use crate::model::task::{
    Category, Priority, Subtask, SubtaskProgress, Task, TaskCalendar, TaskFilters,
    TaskStatistics, TaskStatus,
};

/// Request bodies
pub use crate::model::requests::{
    CategoryRequest, CreateSubtaskRequest, CreateTaskRequest, UpdateSubtaskRequest,
    UpdateTaskRequest,
};

// ============================================================================
// STORAGE
// ============================================================================

/// Token stores
pub use crate::storage::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};

/// Token storage configuration
pub use crate::storage::config::StorageConfig;

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use reqwest::{Method, StatusCode};
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};
