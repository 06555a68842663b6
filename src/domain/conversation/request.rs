//! Inbound Actions SDK conversation webhook payload.
//!
//! Only the fields the adapter reads are modelled; unknown fields are ignored
//! so newer payload revisions still deserialize.

use serde::{Deserialize, Serialize};

/// Body of a conversation webhook call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RequestUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationInfo>,

    #[serde(default)]
    pub inputs: Vec<Input>,

    #[serde(default)]
    pub is_in_sandbox: bool,
}

impl AppRequest {
    /// Conversation identifier assigned by the platform.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation
            .as_ref()
            .and_then(|c| c.conversation_id.as_deref())
    }

    /// Opaque state token echoed back from the previous response.
    pub fn conversation_token(&self) -> Option<&str> {
        self.conversation
            .as_ref()
            .and_then(|c| c.conversation_token.as_deref())
    }

    /// Intent of the first input.
    pub fn intent(&self) -> Option<&str> {
        self.inputs.first().and_then(|i| i.intent.as_deref())
    }

    /// Raw user utterance of the first input.
    pub fn query(&self) -> Option<&str> {
        self.inputs
            .first()
            .and_then(|i| i.raw_inputs.first())
            .and_then(|r| r.query.as_deref())
    }
}

/// The user the platform is talking to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Conversation metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConversationType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_token: Option<String>,
}

/// Whether the conversation just started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationType {
    TypeUnspecified,
    New,
    Active,
    #[serde(other)]
    Unknown,
}

/// One user input within a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    #[serde(default)]
    pub raw_inputs: RawInputs,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
}

/// Raw inputs arrive as a list from the platform, but single-object payloads
/// are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInputs {
    Many(Vec<RawInput>),
    One(RawInput),
}

impl RawInputs {
    pub fn first(&self) -> Option<&RawInput> {
        match self {
            RawInputs::Many(raws) => raws.first(),
            RawInputs::One(raw) => Some(raw),
        }
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        RawInputs::Many(Vec::new())
    }
}

/// The utterance as typed or spoken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Named argument extracted by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
}
