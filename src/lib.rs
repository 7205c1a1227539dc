//! 폐열 회수 분석 클라이언트. 입력 검증과 민감도 재계산을 라이브러리로 분리하여
//! CLI 외의 화면에서도 같은 로직을 쓰도록 한다.

pub mod app;
pub mod config;
pub mod dashboard;
pub mod economics;
pub mod form;
pub mod format;
pub mod i18n;
pub mod service;
pub mod session;
pub mod ui_cli;
