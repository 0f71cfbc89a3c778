//! 세션 부트스트랩 요청/응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::models::user::User;

/// 백엔드 세션 엔드포인트 요청 본문
///
/// ```json
/// { "email": "a@b.com", "fullName": "A B", "role": "student" }
/// ```
#[derive(Debug, Serialize)]
pub struct BootstrapRequest<'a> {
    pub email: &'a str,

    #[serde(rename = "fullName")]
    pub full_name: &'a str,

    pub role: &'a str,
}

/// 백엔드 세션 엔드포인트 응답 본문
///
/// `user`가 없거나 `user.role`이 없으면 거절된 응답으로 취급합니다.
#[derive(Debug, Deserialize)]
pub struct BootstrapResponse {
    #[serde(default)]
    pub user: Option<User>,
}
