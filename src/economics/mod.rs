//! 폐열 회수 경제성 계산 모듈 모음.

pub mod sensitivity;

pub use sensitivity::*;
