//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리 유틸리티
//! - [`token_utils`] - 액세스 토큰 지문
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들

pub mod display_terminal;
pub mod string_utils;
pub mod token_utils;
