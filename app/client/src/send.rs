//! One send action against a session.

use crate::{
    ChatMessage, ContentType, GravityClient, Session, Update,
    conversation::{INTERRUPTED, NO_RESPONSE},
};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::Message;
use protocol::{ChatRequest, ImageRequest};
use registry::{DEFAULT_IMAGE_MODEL, Registry, has_image_intent};
use std::pin::pin;

/// The routed category token.
const AUTO: &str = "auto";

/// Model used when web search is requested on a model without tools.
const COMPOUND: &str = "groq/compound";

impl GravityClient {
    /// Send `text` in `session` with the model or category `selection`.
    ///
    /// The user message is appended right away. Image-tier selections, and
    /// `auto` with an image request, go to the image endpoint; everything
    /// else opens a chat stream. Yields a snapshot of each message as it
    /// changes, so a front-end can render every delta when it arrives.
    /// With `tools` the request asks for web search, switching to the
    /// compound model unless a compound model is already selected.
    pub fn send_message<'a>(
        &'a self,
        session: &'a mut Session,
        selection: &'a str,
        text: &'a str,
        tools: bool,
    ) -> impl Stream<Item = ChatMessage> + 'a {
        stream! {
            let text = text.trim();
            if text.is_empty() {
                return;
            }
            let registry = Registry::builtin();

            let mut history = session.history();
            history.push(Message::user(text));
            session.push_user(text);

            let image_model = if registry.is_image(selection) {
                Some(selection)
            } else if registry.is_image_category(selection)
                || (selection == AUTO && has_image_intent(text))
            {
                Some(DEFAULT_IMAGE_MODEL)
            } else {
                None
            };
            if let Some(model) = image_model {
                let request = ImageRequest {
                    prompt: text.to_owned(),
                    model: model.into(),
                };
                let before = session.messages.len();
                match self.image(&request).await {
                    Ok(response) => {
                        if let Some(url) = response.image_url {
                            session.push_ai(url, ContentType::Image, Some(model));
                        }
                        if let Some(text) = response.text {
                            session.push_ai(text, ContentType::Text, None);
                        }
                        if session.messages.len() == before {
                            session.push_error(NO_RESPONSE);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("image request failed: {e}");
                        session.push_error(INTERRUPTED);
                    }
                }
                for message in &session.messages[before..] {
                    yield message.clone();
                }
                return;
            }

            let target = if tools && !selection.starts_with(COMPOUND) {
                COMPOUND
            } else {
                selection
            };
            let mut request = ChatRequest::new(target, history);
            request.tools = tools;

            let reply = session.begin_reply();
            let mut frames = pin!(self.chat(&request));
            loop {
                let update = match frames.next().await {
                    Some(Ok(frame)) => Update::Frame(frame),
                    Some(Err(e)) => {
                        tracing::warn!("chat stream failed: {e}");
                        Update::Broken
                    }
                    None => Update::Done,
                };
                let last = !matches!(update, Update::Frame(protocol::Frame::Delta { .. }));
                let before = session.messages.len();
                session.apply(reply, update);

                if let Some(message) = session.message(reply) {
                    yield message.clone();
                }
                for message in &session.messages[before..] {
                    yield message.clone();
                }
                if last {
                    break;
                }
            }
        }
    }
}
