//! 외부 분석 서비스(HTTP) 연동 모듈 모음.

pub mod chat;
pub mod client;
pub mod models;

pub use client::{ApiClient, ServiceError};
pub use models::*;
