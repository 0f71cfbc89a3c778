//! # HTTP Request Handlers Module
//!
//! UI가 로그인 플로우를 구동하는 HTTP 핸들러입니다.
//! 핸들러는 얇은 어댑터이며, 상태 전이는 모두 [`crate::services::flow::AuthFlow`]가 담당합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   UI (Browser page, Desktop shell)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AuthFlow - 상태 기계                          ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Provider Client / Profile / Session          ← 외부 연동
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인 플로우 엔드포인트
//!   - 스냅샷 (`GET /state`)
//!   - 프로바이더 선택 (`POST /providers/{provider}/select`)
//!   - 프로바이더 콜백 (`POST /callback`)
//!   - 동의 취소, 재시도, 모드 전환, 화면 이탈
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AuthFlowError>`를 반환하며,
//! `ResponseError` 구현이 상태 코드와 `{"error": ..., "stage": ...}` 본문을 만듭니다.

pub mod auth;
