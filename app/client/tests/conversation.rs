//! Tests for the session transcript and reply state machine.

use gravity_client::{
    ContentType, MessageKind, Session, Update,
    conversation::{HISTORY_WINDOW, INTERRUPTED, NO_RESPONSE},
};
use llm::Role;
use protocol::Frame;

fn delta(content: &str, model: Option<&str>) -> Update {
    Update::Frame(Frame::Delta {
        content: content.to_owned(),
        model: model.map(Into::into),
    })
}

#[test]
fn first_user_message_names_the_session() {
    let mut session = Session::new(1);
    session.push_user("Explain the borrow checker like I am five years old");
    session.push_user("And lifetimes?");
    assert_eq!(session.title, "Explain the borrow checker lik");
    assert_eq!(session.title.chars().count(), 30);
}

#[test]
fn history_skips_errors_and_keeps_the_window() {
    let mut session = Session::new(1);
    for i in 0..10 {
        session.push_user(&format!("q{i}"));
        session.push_ai(format!("a{i}"), ContentType::Text, Some("m"));
        session.push_error("oops");
    }

    let history = session.history();
    assert_eq!(history.len(), HISTORY_WINDOW);
    assert!(history.iter().all(|m| m.content != "oops"));
    assert_eq!(history.last().unwrap().content, "a9");
    assert_eq!(history.last().unwrap().role, Role::Assistant);
    assert_eq!(history[0].content, "a2");
}

#[test]
fn deltas_accumulate_until_done() {
    let mut session = Session::new(1);
    session.push_user("Hello");
    let reply = session.begin_reply();
    assert!(session.message(reply).unwrap().streaming);

    session.apply(reply, delta("Hi", Some("llama-3.1-8b-instant")));
    session.apply(reply, delta(" there", None));
    session.apply(reply, Update::Done);

    let message = session.message(reply).unwrap();
    assert_eq!(message.kind, MessageKind::Ai);
    assert_eq!(message.content, "Hi there");
    assert!(!message.streaming);
    assert_eq!(message.model_used.as_deref(), Some("llama-3.1-8b-instant"));
}

#[test]
fn model_label_follows_a_switch() {
    let mut session = Session::new(1);
    let reply = session.begin_reply();
    session.apply(reply, delta("*[Primary model busy...]*\n\n", Some("llama-3.1-8b-instant")));
    session.apply(reply, delta("", Some("gemini-2.5-flash")));
    session.apply(reply, delta("OK", None));
    session.apply(reply, Update::Done);

    let message = session.message(reply).unwrap();
    assert_eq!(message.content, "*[Primary model busy...]*\n\nOK");
    assert_eq!(message.model_used.as_deref(), Some("gemini-2.5-flash"));
}

#[test]
fn done_without_content_is_no_response() {
    let mut session = Session::new(1);
    let reply = session.begin_reply();
    session.apply(reply, delta("", Some("m")));
    session.apply(reply, Update::Done);

    assert_eq!(session.messages.len(), 1);
    let message = session.message(reply).unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.content, NO_RESPONSE);
}

#[test]
fn broken_stream_before_content_replaces_the_reply() {
    let mut session = Session::new(1);
    session.push_user("Hello");
    let reply = session.begin_reply();
    session.apply(reply, Update::Broken);

    assert_eq!(session.messages.len(), 2);
    let message = session.message(reply).unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.content, INTERRUPTED);
    assert!(!message.streaming);
}

#[test]
fn error_after_partial_output_keeps_the_text() {
    let mut session = Session::new(1);
    let reply = session.begin_reply();
    session.apply(reply, delta("Partial", Some("m")));
    session.apply(
        reply,
        Update::Frame(Frame::error("The model stopped responding.")),
    );
    session.apply(reply, Update::Done);

    assert_eq!(session.messages.len(), 2);
    let partial = session.message(reply).unwrap();
    assert_eq!(partial.kind, MessageKind::Ai);
    assert_eq!(partial.content, "Partial");
    assert!(!partial.streaming);
    let error = session.messages.last().unwrap();
    assert_eq!(error.kind, MessageKind::Error);
    assert_eq!(error.content, "The model stopped responding.");
}

#[test]
fn error_frame_before_content_shows_the_server_message() {
    let mut session = Session::new(1);
    let reply = session.begin_reply();
    session.apply(reply, Update::Frame(Frame::error("All models are busy.")));

    let message = session.message(reply).unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.content, "All models are busy.");
}

#[test]
fn finished_replies_ignore_updates() {
    let mut session = Session::new(1);
    let reply = session.begin_reply();
    session.apply(reply, delta("done", Some("m")));
    session.apply(reply, Update::Done);
    session.apply(reply, delta(" late", Some("other")));
    session.apply(reply, Update::Broken);

    assert_eq!(session.messages.len(), 1);
    let message = session.message(reply).unwrap();
    assert_eq!(message.content, "done");
    assert_eq!(message.model_used.as_deref(), Some("m"));
}
