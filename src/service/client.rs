use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Serialize;

use super::models::{AnalysisInput, AnalysisResult, ChatRequest, ChatResponse, ErrorBody};

/// 외부 분석 서비스 호출 오류. 화면에는 `Display` 문자열을 그대로 보여준다.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// 2xx가 아닌 응답. 서버가 준 detail이 있으면 그 문구를 쓴다.
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },
    /// 연결 실패, 타임아웃 등 전송 오류
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// 응답 JSON 해석 실패
    #[error("invalid response from service: {0}")]
    Decode(#[from] serde_json::Error),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("Server error ({status})"),
    }
}

impl ServiceError {
    /// 오류 응답 본문에서 문자열 `detail`을 꺼낸다. 없거나 비었거나 문자열이 아니면 None.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|d| !d.is_empty());
        ServiceError::Server { status, detail }
    }
}

/// 분석/보고서/챗 엔드포인트를 호출하는 동기 HTTP 클라이언트.
///
/// 요청은 한 번에 하나씩 보내며 중복 요청 방지나 취소는 하지 않는다.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{path}` 형태의 URL을 만든다.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ServiceError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");
        let res = self.http.post(&url).json(body).send()?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "service returned error status");
            return Err(ServiceError::from_status(status.as_u16(), &text));
        }
        tracing::debug!(%url, status = status.as_u16(), "service responded");
        Ok(res)
    }

    /// `POST /analyze`: 기준 분석 결과를 받는다.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, ServiceError> {
        let text = self.post_json("analyze", input)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `POST /report`: 보고서 문서(바이너리)를 받는다.
    pub fn report(&self, input: &AnalysisInput) -> Result<Vec<u8>, ServiceError> {
        let bytes = self.post_json("report", input)?.bytes()?;
        Ok(bytes.to_vec())
    }

    /// `POST /chat`
    pub fn chat(&self, message: &str) -> Result<String, ServiceError> {
        let req = ChatRequest {
            message: message.to_string(),
        };
        let text = self.post_json("chat", &req)?.text()?;
        let res: ChatResponse = serde_json::from_str(&text)?;
        Ok(res.response)
    }
}
