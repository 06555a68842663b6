//! Outbound Actions SDK conversation webhook payload.

use serde::{Deserialize, Serialize};

use super::token;
use crate::domain::conversation::Conversation;

/// Intent the platform should expect for the user's next utterance.
pub const TEXT_INTENT: &str = "actions.intent.TEXT";

/// Body answering a conversation webhook call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse {
    pub expect_user_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_token: Option<String>,
    pub expected_inputs: Vec<ExpectedInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedInput {
    pub input_prompt: InputPrompt,
    pub possible_intents: Vec<ExpectedIntent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPrompt {
    pub rich_initial_prompt: RichResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichResponse {
    pub items: Vec<RichResponseItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichResponseItem {
    pub simple_response: SimpleResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedIntent {
    pub intent: String,
}

impl AppResponse {
    /// Asks the user every reply queued on the conversation and carries its
    /// data bag forward. `None` if nothing was queued.
    pub fn from_conversation(conversation: &Conversation) -> Option<Self> {
        let replies = conversation.replies();
        if replies.is_empty() {
            return None;
        }

        let items = replies
            .into_iter()
            .map(|text| RichResponseItem {
                simple_response: SimpleResponse {
                    text_to_speech: text,
                },
            })
            .collect();

        Some(Self {
            expect_user_response: true,
            conversation_token: Some(token::encode(&conversation.data())),
            expected_inputs: vec![ExpectedInput {
                input_prompt: InputPrompt {
                    rich_initial_prompt: RichResponse { items },
                },
                possible_intents: vec![ExpectedIntent {
                    intent: TEXT_INTENT.to_string(),
                }],
            }],
        })
    }

    /// Texts the user will hear, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.expected_inputs
            .iter()
            .flat_map(|input| &input.input_prompt.rich_initial_prompt.items)
            .map(|item| item.simple_response.text_to_speech.as_str())
            .collect()
    }
}
