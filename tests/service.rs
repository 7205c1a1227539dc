use std::time::Duration;

use heat_recovery_toolbox::service::chat::{self, canned_answer, ChatBackend, ChatReply};
use heat_recovery_toolbox::service::{ApiClient, ServiceError};

struct StubBackend(Result<&'static str, u16>);

impl ChatBackend for StubBackend {
    fn ask(&self, _message: &str) -> Result<String, ServiceError> {
        match self.0 {
            Ok(text) => Ok(text.to_string()),
            Err(status) => Err(ServiceError::from_status(status, "")),
        }
    }
}

#[test]
fn server_detail_string_is_shown_verbatim() {
    let err = ServiceError::from_status(422, r#"{"detail": "flow_rate must be positive"}"#);
    assert_eq!(err.to_string(), "flow_rate must be positive");
}

#[test]
fn non_string_or_missing_detail_uses_status() {
    let validation = r#"{"detail": [{"loc": ["body", "flow_rate"], "msg": "field required"}]}"#;
    assert_eq!(
        ServiceError::from_status(422, validation).to_string(),
        "Server error (422)"
    );
    assert_eq!(ServiceError::from_status(500, "").to_string(), "Server error (500)");
    assert_eq!(
        ServiceError::from_status(502, "<html>Bad Gateway</html>").to_string(),
        "Server error (502)"
    );
    assert_eq!(
        ServiceError::from_status(400, r#"{"detail": ""}"#).to_string(),
        "Server error (400)"
    );
}

#[test]
fn endpoint_joins_without_double_slash() {
    let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
    assert_eq!(client.endpoint("/analyze"), "http://localhost:8000/analyze");
    assert_eq!(client.endpoint("report"), "http://localhost:8000/report");
}

#[test]
fn canned_answers_match_case_insensitively() {
    assert!(canned_answer("What is ThermaVision?")
        .unwrap()
        .starts_with("ThermaVision is"));
    assert!(canned_answer("TECH STACK please").unwrap().contains("FastAPI"));
    assert!(canned_answer("How does it work?").unwrap().contains("Q = m * Cp * dT"));
    assert_eq!(canned_answer("payback for coal boilers"), None);
}

#[test]
fn earlier_keywords_take_priority() {
    // "this"에 "hi"가 들어 있으므로 인사말이 먼저 걸린다.
    assert_eq!(canned_answer("Who developed this?"), canned_answer("hello"));
}

#[test]
fn chat_reply_routes_by_source() {
    let online = StubBackend(Ok("Use a recuperator."));
    assert_eq!(chat::reply(&online, "   "), None);
    assert!(matches!(chat::reply(&online, "hello"), Some(ChatReply::Canned(_))));
    assert_eq!(
        chat::reply(&online, "best exchanger for 400C gas"),
        Some(ChatReply::Service("Use a recuperator.".to_string()))
    );

    let offline = StubBackend(Err(503));
    let reply = chat::reply(&offline, "best exchanger for 400C gas").unwrap();
    assert_eq!(reply, ChatReply::Offline);
    assert_eq!(reply.text(), chat::OFFLINE_REPLY);
}
