/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Authentication models: tokens, user profile, auth payloads
pub mod auth;
/// Authenticated HTTP transport with coordinated token refresh
pub mod http;
/// Request bodies for the resource endpoints
pub mod requests;
/// Task, subtask and category models
pub mod task;
