//! 문자열 정규화 유틸리티
//!
//! 프로바이더 응답처럼 형식이 들쭉날쭉한 입력을 정리할 때 사용합니다.

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다.
///
/// # Errors
///
/// 공백만 있거나 빈 문자열이면 필드 이름을 담은 메시지를 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  a@b.com ", "email")?, "a@b.com");
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{}은(는) 필수입니다", field_name));
    }
    Ok(trimmed.to_string())
}

/// 선택 문자열을 정리합니다. 공백만 있으면 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일의 `@` 앞부분. `@`가 없으면 전체 문자열.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// 로그용으로 긴 문자열을 자릅니다. 문자 경계를 지킵니다.
pub fn truncate_for_log(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let truncated: String = value.chars().take(max_chars).collect();
    format!("{}…", truncated)
}
