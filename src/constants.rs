/// Default base URL of the tasks REST API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Default timeout in seconds applied to every HTTP request, refresh included
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// User agent string sent with every request
pub const USER_AGENT: &str = concat!("tasks-client/", env!("CARGO_PKG_VERSION"));

/// Login endpoint
pub const LOGIN_PATH: &str = "auth/login/";
/// Registration endpoint
pub const REGISTER_PATH: &str = "auth/register/";
/// Access token refresh endpoint
pub const REFRESH_PATH: &str = "auth/refresh/";
/// Logout endpoint (refresh token blacklisting)
pub const LOGOUT_PATH: &str = "auth/logout/";
/// Google OAuth exchange endpoint
pub const GOOGLE_AUTH_PATH: &str = "auth/google/";
/// Current user profile endpoint
pub const ME_PATH: &str = "auth/me/";

/// Endpoints whose `401` answers mean bad credentials rather than an expired
/// access token. They never enter the refresh path.
pub const AUTH_ENDPOINTS: [&str; 4] = [LOGIN_PATH, REGISTER_PATH, REFRESH_PATH, GOOGLE_AUTH_PATH];

/// Default maximum number of requests per rate limiter period
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 120;
/// Default rate limiter period in seconds
pub const DEFAULT_RATE_LIMIT_PERIOD_SECONDS: u64 = 60;
/// Default rate limiter burst size
pub const DEFAULT_RATE_LIMIT_BURST_SIZE: u32 = 30;

/// Message for requests that never got a response
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check your connection.";
/// Fallback message for `400 Bad Request`
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please check your data.";
/// Fallback message for `401 Unauthorized` and `404 Not Found`
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Fallback message for `403 Forbidden`
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
/// Fallback message for `5xx` answers
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
/// Fallback message for everything else
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";
/// Refresh failure reason when no refresh token is stored
pub const NO_REFRESH_TOKEN_MESSAGE: &str = "No refresh token available";
/// Refresh failure reason when the task driving the refresh was dropped
pub const REFRESH_INTERRUPTED_MESSAGE: &str = "Token refresh was interrupted";
/// Refresh failure reason for requests that lost their session to an earlier refresh
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
