//! Architect.io 로그인 게이트웨이
//!
//! 외부 ID 프로바이더(Google, Apple)로 로그인 시도를 진행하고,
//! 백엔드 세션 엔드포인트에서 애플리케이션 사용자를 받아 대시보드로 보내는 서비스입니다.
//!
//! # Features
//!
//! - **토큰 클라이언트**: OAuth 2.0 implicit 플로우 동의 URL 생성과 콜백 해석
//! - **프로필 조회**: 액세스 토큰으로 userinfo 조회 후 검증
//! - **세션 부트스트랩**: 쿠키 기반 백엔드 세션 생성, 백엔드 역할 우선
//! - **상태 기계**: 시도 순번으로 늦게 도착한 결과를 폐기
//! - **SDK 보관소**: 프로세스 전역에서 디스커버리 문서를 한 번만 로드
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← UI 게이트웨이 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    AuthFlow     │ ← 상태 기계
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Provider / API  │ ← 토큰, 프로필, 세션
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use architect_auth::core::SdkRegistry;
//! use architect_auth::services::provider::HttpDiscoveryLoader;
//!
//! let available = flow
//!     .initialize_providers(&SdkRegistry::global(), Arc::new(HttpDiscoveryLoader::new()))
//!     .await;
//! let consent = flow.select_provider(Provider::Google)?;
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod utils;
