//! 챗 상담 기능. 자주 묻는 질문은 내장 답변으로, 나머지는 `/chat`으로 보낸다.

use super::client::{ApiClient, ServiceError};

pub const GREETING: &str =
    "Hello! I'm ThermaBot. How can I help you optimize your sugar mill's energy recovery today?";

/// 서비스 연결에 실패했을 때의 답변.
pub const OFFLINE_REPLY: &str = "I'm having trouble connecting to my AI brain. Please check if the backend is running or try a different question!";

pub const SUGGESTIONS: [&str; 4] = [
    "What is ThermaVision?",
    "How does it work?",
    "What are the benefits?",
    "Technical Stack?",
];

const ABOUT: &str = "ThermaVision is an industrial energy optimization platform designed for the sugar industry. It simulates and calculates the feasibility of recovering waste heat from flue gases to pre-heat raw juice, reducing boiler energy demand.";
const HOW_IT_WORKS: &str = "It uses the thermodynamic principle Q = m * Cp * dT. By diverting high-temperature flue gas (150°C - 450°C) through a heat exchanger, we transfer energy to the juice stream, saving bagasse fuel and reducing CO₂.";
const BENEFITS: &str = "The key benefits are: 1. Significant fuel (Bagasse) savings. 2. Reduced CO₂ footprint. 3. Improved plant efficiency. 4. Rapid ROI (usually 1.5 - 3 years).";
const DEVELOPERS: &str = "This project was developed by Team Four-0-Four (Babin, Debasmita, Joita, and Manisha) for the SugarNxt Hackathon 2026.";
const BOILER_SAFETY: &str = "Yes, ThermaVision includes warnings for the 'Acid Dew Point'. We recommend keeping outlet temps above 120°C to prevent sulphuric acid corrosion in the stack.";
const TECH_STACK: &str = "The backend is built with FastAPI (Python) for thermodynamics and AI. The frontend uses Vanilla JS, Three.js for 3D, and Chart.js for data visualization.";

/// 키워드 → 답변. 위에서부터 검사하므로 순서가 의미를 가진다.
const CANNED_ANSWERS: [(&str, &str); 11] = [
    ("hello", GREETING),
    ("hi", GREETING),
    ("hey", GREETING),
    ("what is thermavision?", ABOUT),
    ("thermavision", ABOUT),
    ("how does it work?", HOW_IT_WORKS),
    ("what are the benefits?", BENEFITS),
    ("who developed this?", DEVELOPERS),
    ("is it safe for the boiler?", BOILER_SAFETY),
    ("technical stack", TECH_STACK),
    ("tech stack", TECH_STACK),
];

/// 소문자로 바꾼 메시지에 키워드가 포함되면 첫 번째로 걸린 답변을 돌려준다.
pub fn canned_answer(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    CANNED_ANSWERS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, answer)| *answer)
}

/// 자유 질문을 받아 답하는 원격 상대.
pub trait ChatBackend {
    fn ask(&self, message: &str) -> Result<String, ServiceError>;
}

impl ChatBackend for ApiClient {
    fn ask(&self, message: &str) -> Result<String, ServiceError> {
        self.chat(message)
    }
}

/// 답변 출처.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Canned(&'static str),
    Service(String),
    Offline,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        match self {
            ChatReply::Canned(s) => s,
            ChatReply::Service(s) => s,
            ChatReply::Offline => OFFLINE_REPLY,
        }
    }
}

/// 메시지 하나에 답한다. 공백뿐인 메시지는 답하지 않는다.
pub fn reply<B: ChatBackend + ?Sized>(backend: &B, message: &str) -> Option<ChatReply> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    if let Some(answer) = canned_answer(message) {
        return Some(ChatReply::Canned(answer));
    }
    match backend.ask(message) {
        Ok(text) => Some(ChatReply::Service(text)),
        Err(err) => {
            tracing::warn!(error = %err, "chat service unavailable");
            Some(ChatReply::Offline)
        }
    }
}
