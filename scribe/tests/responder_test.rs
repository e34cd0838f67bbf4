//! Conversation-history contract of the responders.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use scribe::prelude::*;

fn params() -> ChatParams {
    ChatParams::new("Summarize", "Doc content").with_prompt_label("summary")
}

/// Notifier that records every message it receives.
#[derive(Debug, Clone, Default)]
struct RecordingNotifier(Arc<Mutex<Vec<String>>>);

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_owned());
    }
}

fn roles_and_texts(history: &ChatHistory) -> Vec<(Role, String)> {
    history.iter().map(|t| (t.role, t.text())).collect()
}

mod single_shot {
    use super::*;

    #[tokio::test]
    async fn test_appends_priming_then_reply() {
        let responder = Responder::new(MockProvider::new().reply("A short summary."));
        let mut history = ChatHistory::new();

        let reply = responder.respond(&params(), &mut history).await.unwrap();

        assert_eq!(reply, "A short summary.");
        assert_eq!(
            roles_and_texts(&history),
            vec![
                (Role::User, "Doc content".to_owned()),
                (Role::User, RULES.to_owned()),
                (Role::User, "prompt: summary".to_owned()),
                (Role::Model, "A short summary.".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_grows_existing_history_by_four() {
        let responder = Responder::new(MockProvider::new().reply("reply"));
        let mut history = ChatHistory::from(vec![Turn::user("old q"), Turn::model("old a")]);

        responder.respond(&params(), &mut history).await.unwrap();

        assert_eq!(history.len(), 6);
        assert_eq!(history.turns()[0].text(), "old q");
        assert_eq!(history.turns()[1].text(), "old a");
        assert_eq!(history.last().unwrap(), &Turn::model("reply"));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_not_deduplicated() {
        let responder = Responder::new(MockProvider::new().reply("one").reply("two"));
        let mut history = ChatHistory::new();

        responder.respond(&params(), &mut history).await.unwrap();
        responder.respond(&params(), &mut history).await.unwrap();

        assert_eq!(history.len(), 8);
        assert_eq!(history.turns()[3].text(), "one");
        assert_eq!(history.turns()[7].text(), "two");
    }

    #[tokio::test]
    async fn test_failure_keeps_priming_only_and_notifies_once() {
        let notifier = RecordingNotifier::default();
        let responder = Responder::new(
            MockProvider::new().reply(MockReply::fail(LlmError::auth("mock", "bad key"))),
        )
        .with_notifier(notifier.clone());
        let mut history = ChatHistory::new();

        let err = responder.respond(&params(), &mut history).await.unwrap_err();

        assert!(matches!(err.as_llm(), Some(LlmError::Auth { .. })));
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|t| t.role == Role::User));
        assert_eq!(notifier.messages(), vec![FAILURE_NOTICE.to_owned()]);
    }
}

mod streaming {
    use super::*;

    #[tokio::test]
    async fn test_delivers_chunks_in_order_and_appends_concatenation() {
        let responder = Responder::new(
            MockProvider::new().reply(MockReply::chunks(["The ", "doc ", "says ", "hi."])),
        );
        let mut history = ChatHistory::new();
        let mut seen = Vec::new();

        let reply = responder
            .respond_stream(&params(), &mut history, |chunk| seen.push(chunk.to_owned()))
            .await
            .unwrap();

        assert_eq!(seen, ["The ", "doc ", "says ", "hi."]);
        assert_eq!(reply, seen.concat());
        assert_eq!(history.len(), 4);
        assert_eq!(history.last().unwrap(), &Turn::model(seen.concat()));
    }

    #[tokio::test]
    async fn test_priming_turns_are_marked() {
        let responder = Responder::new(MockProvider::new().reply("ok"));
        let mut history = ChatHistory::new();

        responder
            .respond_stream(&params(), &mut history, |_| {})
            .await
            .unwrap();

        let turns = history.turns();
        assert_eq!(turns[0].text(), "Doc content");
        assert_eq!(turns[1].text(), format!("{PROMPT_MARKER}\n{RULES}"));
        assert_eq!(turns[2].text(), ":::prompt:::\nsummary");
        assert_eq!(turns[3], Turn::model("ok"));

        let visible: Vec<String> = history.visible().map(Turn::text).collect();
        assert_eq!(visible, ["Doc content", "ok"]);
    }

    #[tokio::test]
    async fn test_failure_before_stream_delivers_nothing() {
        let notifier = RecordingNotifier::default();
        let responder = Responder::new(
            MockProvider::new().reply(MockReply::fail(LlmError::rate_limited("mock", "quota"))),
        )
        .with_notifier(notifier.clone());
        let mut history = ChatHistory::new();
        let mut calls = 0;

        let err = responder
            .respond_stream(&params(), &mut history, |_| calls += 1)
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(calls, 0);
        assert_eq!(history.len(), 3);
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_mid_stream_appends_no_reply() {
        let notifier = RecordingNotifier::default();
        let responder = Responder::new(MockProvider::new().reply(MockReply::FailAfter {
            chunks: vec!["partial".into()],
            error: LlmError::stream("connection reset"),
        }))
        .with_notifier(notifier.clone());
        let mut history = ChatHistory::new();
        let mut seen = Vec::new();

        let result = responder
            .respond_stream(&params(), &mut history, |c| seen.push(c.to_owned()))
            .await;

        assert!(result.is_err());
        assert_eq!(seen, ["partial"]);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|t| t.role == Role::User));
        assert_eq!(notifier.messages(), vec![FAILURE_NOTICE.to_owned()]);
    }

    #[tokio::test]
    async fn test_shared_provider_serves_sequential_calls() {
        let provider: SharedChatProvider = Arc::new(
            MockProvider::new()
                .reply(MockReply::chunks(["a"]))
                .reply(MockReply::chunks(["b"])),
        );
        let responder = Responder::new(provider);
        let mut first = ChatHistory::new();
        let mut second = ChatHistory::new();

        responder
            .respond_stream(&params(), &mut first, |_| {})
            .await
            .unwrap();
        responder
            .respond_stream(&params(), &mut second, |_| {})
            .await
            .unwrap();

        assert_eq!(first.last().unwrap().text(), "a");
        assert_eq!(second.last().unwrap().text(), "b");
    }
}
