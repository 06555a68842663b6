//! Conversation registry - correlates in-flight turns with open conversations.
//!
//! A turn registers its conversation under the turn's [`MessageId`] before the
//! framework sees the update, so a reply sent asynchronously for that message
//! can be written into the right, still-open webhook exchange. The entry is
//! released when the [`Registration`] guard drops, on success, failure, panic
//! or cancellation alike.
//!
//! The registry is instance-scoped: two bots in one process never see each
//! other's conversations.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::domain::conversation::Conversation;
use crate::domain::message::MessageId;

type Entries = HashMap<MessageId, Arc<Conversation>>;

/// In-memory map of message identifier to open conversation.
///
/// Cloning yields another handle to the same entries. Locks are never held
/// across an await point.
#[derive(Debug, Clone, Default)]
pub struct ConversationRegistry {
    entries: Arc<RwLock<Entries>>,
}

impl ConversationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `conversation` under `mid`, returning the entry it replaced.
    pub fn put(
        &self,
        mid: MessageId,
        conversation: Arc<Conversation>,
    ) -> Option<Arc<Conversation>> {
        let replaced = self.write().insert(mid.clone(), conversation);
        if replaced.is_some() {
            warn!(%mid, "Replaced an open conversation still registered for this message");
        }
        replaced
    }

    /// Open conversation for `mid`, if any.
    pub fn get(&self, mid: &MessageId) -> Option<Arc<Conversation>> {
        self.read().get(mid).cloned()
    }

    /// Removes the entry for `mid`. Removing an absent entry is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&self, mid: &MessageId) -> bool {
        self.write().remove(mid).is_some()
    }

    /// Removes the entry for `mid` only if it still holds `conversation`.
    ///
    /// Returns whether an entry was removed.
    pub fn delete_if(&self, mid: &MessageId, conversation: &Arc<Conversation>) -> bool {
        let mut entries = self.write();
        let owned = entries
            .get(mid)
            .is_some_and(|current| Arc::ptr_eq(current, conversation));
        if owned {
            entries.remove(mid);
        }
        owned
    }

    /// Registers `conversation` for the lifetime of the returned guard.
    pub fn register(&self, mid: MessageId, conversation: Arc<Conversation>) -> Registration {
        self.put(mid.clone(), Arc::clone(&conversation));
        debug!(%mid, "Registered conversation");
        Registration {
            registry: self.clone(),
            mid,
            conversation,
        }
    }

    pub fn contains(&self, mid: &MessageId) -> bool {
        self.read().contains_key(mid)
    }

    /// Number of open conversations.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are plain map inserts and removals; a panic elsewhere cannot
    // leave the map inconsistent, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped registry entry; dropping it removes the entry.
///
/// Only the conversation this guard registered is removed, so a later turn
/// that reused the same message identifier keeps its entry.
#[derive(Debug)]
#[must_use = "the conversation is unregistered as soon as the registration is dropped"]
pub struct Registration {
    registry: ConversationRegistry,
    mid: MessageId,
    conversation: Arc<Conversation>,
}

impl Registration {
    pub fn mid(&self) -> &MessageId {
        &self.mid
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.delete_if(&self.mid, &self.conversation);
        debug!(mid = %self.mid, remaining = self.registry.len(), "Released conversation");
    }
}
