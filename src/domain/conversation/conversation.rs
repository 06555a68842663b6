//! Live conversation handle for one webhook exchange.
//!
//! A `Conversation` lives exactly as long as the HTTP request that produced
//! it. Handlers share it through `Arc` while the turn is in flight; replies
//! written with [`Conversation::ask`] are collected and rendered into the
//! webhook response once the turn finishes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use super::request::AppRequest;

/// Mutable key/value bag persisted across turns by the platform.
pub type ConversationData = Map<String, Value>;

/// Platform conversation for a single request/response cycle.
#[derive(Debug, Default)]
pub struct Conversation {
    id: Option<String>,
    request: AppRequest,
    data: Mutex<ConversationData>,
    replies: Mutex<Vec<String>>,
}

impl Conversation {
    /// Creates a conversation for an inbound request with an empty data bag.
    pub fn new(request: AppRequest) -> Self {
        Self {
            id: request.conversation_id().map(str::to_owned),
            request,
            data: Mutex::new(ConversationData::new()),
            replies: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the data bag, typically with state restored from the
    /// previous turn.
    pub fn with_data(self, data: ConversationData) -> Self {
        Self {
            data: Mutex::new(data),
            ..self
        }
    }

    /// Conversation identifier, if the platform supplied one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The raw inbound payload.
    pub fn request(&self) -> &AppRequest {
        &self.request
    }

    /// Intent the platform matched for this request.
    pub fn intent(&self) -> Option<&str> {
        self.request.intent()
    }

    /// Reads a value from the data bag.
    pub fn data_value(&self, key: &str) -> Option<Value> {
        lock(&self.data).get(key).cloned()
    }

    /// Writes a value into the data bag.
    pub fn set_data_value(&self, key: impl Into<String>, value: Value) {
        lock(&self.data).insert(key.into(), value);
    }

    /// Snapshot of the whole data bag.
    pub fn data(&self) -> ConversationData {
        lock(&self.data).clone()
    }

    /// Queues a reply for the user and keeps the microphone open.
    pub fn ask(&self, text: impl Into<String>) {
        lock(&self.replies).push(text.into());
    }

    /// Replies queued so far, in order.
    pub fn replies(&self) -> Vec<String> {
        lock(&self.replies).clone()
    }
}

// A panicking writer cannot leave a map or a Vec<String> half-updated, so a
// poisoned lock is still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_for(id: &str) -> AppRequest {
        serde_json::from_value(json!({ "conversation": { "conversationId": id } })).unwrap()
    }

    #[test]
    fn takes_id_from_request() {
        let conversation = Conversation::new(request_for("ABCDEFGH"));
        assert_eq!(conversation.id(), Some("ABCDEFGH"));
    }

    #[test]
    fn default_conversation_has_nothing() {
        let conversation = Conversation::default();
        assert_eq!(conversation.id(), None);
        assert_eq!(conversation.intent(), None);
        assert!(conversation.data().is_empty());
        assert!(conversation.replies().is_empty());
    }

    #[test]
    fn data_bag_reads_back_writes() {
        let conversation = Conversation::default();
        conversation.set_data_value("turn", json!(4));

        assert_eq!(conversation.data_value("turn"), Some(json!(4)));
        assert_eq!(conversation.data_value("missing"), None);
    }

    #[test]
    fn with_data_restores_previous_state() {
        let mut data = ConversationData::new();
        data.insert("turn".to_string(), json!(7));

        let conversation = Conversation::new(request_for("c-1")).with_data(data);

        assert_eq!(conversation.id(), Some("c-1"));
        assert_eq!(conversation.data_value("turn"), Some(json!(7)));
    }

    #[test]
    fn ask_collects_replies_in_order() {
        let conversation = Conversation::default();
        conversation.ask("first");
        conversation.ask(String::from("second"));

        assert_eq!(conversation.replies(), vec!["first", "second"]);
    }
}
