//! Session slice: the tier standing in for authentication.
//!
//! A viewer "logs in" by entering a shared secret; the matching tier is persisted under
//! [`USER_PLAN_KEY`] and mirrored in memory. The mirror is read once when the store opens
//! and afterwards only changed by this store, so other processes writing the same storage
//! are not observed until the next open.

mod error;
mod secrets;

pub use crate::error::{SessionError, SessionErrorExt};
pub use crate::secrets::{SecretTable, normalize};

use lectern_domain::Tier;
use lectern_domain::constants::USER_PLAN_KEY;
use lectern_domain::events::TierChanged;
use lectern_events::EventBus;
use lectern_storage::{KeyValueStore, StorageKey};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct SessionInner<S> {
    storage: S,
    key: StorageKey,
    secrets: SecretTable,
    bus: EventBus,
    tier: RwLock<Option<Tier>>,
}

/// Persisted session tier. Cheap to clone; clones share state.
#[derive(Debug)]
pub struct SessionStore<S> {
    inner: Arc<SessionInner<S>>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Opens the store and restores the persisted tier.
    ///
    /// A stored value that is not exactly `silver`, `gold` or `diamond` is treated as no
    /// session.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the storage cannot be read.
    pub async fn open(storage: S, secrets: SecretTable, bus: EventBus) -> Result<Self, SessionError> {
        let key = StorageKey::try_from(USER_PLAN_KEY)?;
        let stored = storage.get(&key).await.context("Failed to restore session")?;

        let tier = match stored.as_deref() {
            None => None,
            Some(raw) => {
                let tier = Tier::from_persisted(raw);
                if tier.is_none() {
                    warn!(value = raw, "Ignoring unrecognized persisted tier");
                }
                tier
            },
        };

        debug!(tier = ?tier, secrets = secrets.len(), "Session restored");
        Ok(Self {
            inner: Arc::new(SessionInner { storage, key, secrets, bus, tier: RwLock::new(tier) }),
        })
    }

    /// Tries `secret` against the secret table.
    ///
    /// On a match the tier is persisted and returned. On no match nothing is persisted, the
    /// current session is left as it was and `Ok(None)` is returned; callers show
    /// [`lectern_domain::constants::INCORRECT_SECRET_MESSAGE`].
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if a matched tier cannot be persisted. The in-memory
    /// tier is then unchanged.
    pub async fn login(&self, secret: &str) -> Result<Option<Tier>, SessionError> {
        let Some(tier) = self.inner.secrets.lookup(secret) else {
            info!("Login rejected");
            return Ok(None);
        };

        self.inner
            .storage
            .set(&self.inner.key, tier.as_str())
            .await
            .context("Failed to persist tier")?;
        *self.inner.tier.write() = Some(tier);

        info!(tier = %tier, "Logged in");
        self.announce(Some(tier));
        Ok(Some(tier))
    }

    /// Clears the persisted tier.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the stored value cannot be removed.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.inner.storage.remove(&self.inner.key).await.context("Failed to clear tier")?;
        let previous = self.inner.tier.write().take();

        info!(previous = ?previous, "Logged out");
        self.announce(None);
        Ok(())
    }

    #[must_use]
    pub fn current_tier(&self) -> Option<Tier> {
        *self.inner.tier.read()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current_tier().is_some()
    }

    fn announce(&self, tier: Option<Tier>) {
        if let Err(err) = self.inner.bus.publish(TierChanged { tier }) {
            warn!(error = %err, "Failed to publish tier change");
        }
    }
}
