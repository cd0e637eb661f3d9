use std::sync::Arc;

use tracing::{error, warn};

use crate::io::store::{KeyValueStore, NICKNAME_KEY, StoreError};
use crate::ops::validation::{ValidationError, is_blank};

/// Error type for login
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not save nickname: {0}")]
    Storage(#[from] StoreError),
}

/// The login surface: a nickname kept under its own key
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Session { store }
    }

    /// Store the nickname as typed. Blank input is rejected.
    pub async fn login(&self, nickname: &str) -> Result<(), SessionError> {
        if is_blank(nickname) {
            return Err(ValidationError::EmptyNickname.into());
        }
        self.store
            .set(NICKNAME_KEY, nickname.to_string())
            .await
            .inspect_err(|e| error!(error = %e, "failed to save nickname"))?;
        Ok(())
    }

    /// The stored nickname, if any. Read failures count as none.
    pub async fn nickname(&self) -> Option<String> {
        match self.store.get(NICKNAME_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to read nickname");
                None
            }
        }
    }
}
