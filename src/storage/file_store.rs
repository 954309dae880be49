/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::auth::{TokenPair, User};
use crate::storage::token_store::{StoredSession, TokenStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Token store persisted as a JSON document
///
/// The document is read once on [`FileTokenStore::open`] and kept in memory.
/// Every mutation rewrites it through a temporary file and a rename, and the
/// in-memory copy changes only after the write succeeded.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    session: RwLock<StoredSession>,
}

impl FileTokenStore {
    /// Opens the store at `path`
    ///
    /// A missing file is an empty session. An unreadable document is logged
    /// and treated as empty as well, since the user can simply log in again.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let session = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Ignoring corrupt token file {}: {}", path.display(), e);
                StoredSession::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No token file at {}, starting empty", path.display());
                StoredSession::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    /// Location of the JSON document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the session and keeps it only once it is on disk
    async fn update<F>(&self, change: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut StoredSession) -> Result<(), AppError> + Send,
    {
        let mut session = self.session.write().await;
        let mut next = session.clone();
        change(&mut next)?;
        self.persist(&next).await?;
        *session = next;
        Ok(())
    }

    async fn persist(&self, session: &StoredSession) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<StoredSession, AppError> {
        Ok(self.session.read().await.clone())
    }

    async fn set_tokens(&self, tokens: TokenPair) -> Result<(), AppError> {
        self.update(|session| {
            session.tokens = Some(tokens);
            Ok(())
        })
        .await
    }

    async fn set_access_token(&self, access: &str) -> Result<(), AppError> {
        self.update(|session| session.replace_access(access)).await
    }

    async fn set_user(&self, user: User) -> Result<(), AppError> {
        self.update(|session| {
            session.user = Some(user);
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut session = self.session.write().await;
        *session = StoredSession::default();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
