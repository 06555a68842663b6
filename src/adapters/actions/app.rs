//! ActionsApp - conversation webhook dispatcher.
//!
//! Restores the conversation data bag from the request token, routes the
//! request to the handler registered for its intent (or the fallback) and
//! renders whatever the handler asked into an [`AppResponse`]. Errors and
//! panics escaping a handler go to the catch handler when one is set.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, warn};

use super::response::AppResponse;
use super::token;
use crate::domain::conversation::{AppRequest, Conversation};

/// Intent sent when the user starts talking to the action.
pub const MAIN_INTENT: &str = "actions.intent.MAIN";

/// Intent sent for every follow-up utterance.
pub const TEXT_INTENT: &str = super::response::TEXT_INTENT;

/// Error raised by an intent handler.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error("Intent handler failed: {0}")]
    Failed(String),

    #[error("Intent handler panicked: {0}")]
    Panicked(String),

    #[error("Bot is no longer available")]
    BotUnavailable,
}

/// Error returned by [`ActionsApp::handle`].
#[derive(Debug, Error)]
pub enum ActionsError {
    #[error("No handler registered for intent '{0}'")]
    NoHandler(String),

    #[error("Intent '{0}' completed without a response")]
    NoResponse(String),

    #[error("Unhandled intent handler error: {0}")]
    Unhandled(#[from] HandlerError),
}

/// Options the app was created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsAppOptions {
    /// Project id requests are expected to be signed for.
    pub verification: Option<String>,
    /// OAuth client id used for account linking.
    pub client_id: Option<String>,
    /// Logs request and response bodies.
    pub debug: bool,
}

type IntentFuture = BoxFuture<'static, Result<(), HandlerError>>;
type IntentHandler = Arc<dyn Fn(Arc<Conversation>, Option<String>) -> IntentFuture + Send + Sync>;
type CatchHandler = Arc<dyn Fn(&Arc<Conversation>, &HandlerError) + Send + Sync>;

/// Conversation webhook app.
#[derive(Default)]
pub struct ActionsApp {
    options: ActionsAppOptions,
    intents: HashMap<String, IntentHandler>,
    fallback: Option<IntentHandler>,
    catch: Option<CatchHandler>,
}

impl ActionsApp {
    pub fn new(options: ActionsAppOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ActionsAppOptions {
        &self.options
    }

    /// Registers the handler for `name`. The handler receives the
    /// conversation and the user's raw query.
    pub fn intent<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arc<Conversation>, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.intents.insert(name.into(), boxed(handler));
        self
    }

    /// Registers the handler for intents without their own handler.
    pub fn fallback<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Arc<Conversation>, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.fallback = Some(boxed(handler));
        self
    }

    /// Registers the handler for errors escaping intent handlers.
    pub fn catch<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Arc<Conversation>, &HandlerError) + Send + Sync + 'static,
    {
        self.catch = Some(Arc::new(handler));
        self
    }

    pub fn has_intent(&self, name: &str) -> bool {
        self.intents.contains_key(name)
    }

    /// Handles one webhook request.
    pub async fn handle(&self, request: AppRequest) -> Result<AppResponse, ActionsError> {
        if self.options.debug {
            debug!(?request, "Conversation request");
        }

        let data = token::decode(request.conversation_token());
        let conversation = Arc::new(Conversation::new(request).with_data(data));
        let intent = conversation.intent().unwrap_or_default().to_string();

        let handler = self
            .intents
            .get(&intent)
            .or(self.fallback.as_ref())
            .ok_or_else(|| ActionsError::NoHandler(intent.clone()))?;

        let query = conversation.request().query().map(str::to_owned);
        let result = AssertUnwindSafe(handler(Arc::clone(&conversation), query))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(HandlerError::Panicked(panic_message(panic.as_ref()))));

        if let Err(err) = result {
            match &self.catch {
                Some(catch) => catch(&conversation, &err),
                None => return Err(err.into()),
            }
        }

        let response = AppResponse::from_conversation(&conversation).ok_or_else(|| {
            warn!(intent = %intent, "Intent handler did not ask anything");
            ActionsError::NoResponse(intent.clone())
        })?;

        if self.options.debug {
            debug!(?response, "Conversation response");
        }
        Ok(response)
    }
}

impl fmt::Debug for ActionsApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut intents: Vec<&String> = self.intents.keys().collect();
        intents.sort();
        f.debug_struct("ActionsApp")
            .field("options", &self.options)
            .field("intents", &intents)
            .field("fallback", &self.fallback.is_some())
            .field("catch", &self.catch.is_some())
            .finish()
    }
}

fn boxed<F, Fut>(handler: F) -> IntentHandler
where
    F: Fn(Arc<Conversation>, Option<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Arc::new(move |conversation, query| handler(conversation, query).boxed())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
