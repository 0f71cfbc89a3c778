//! 프로바이더 userinfo 응답 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::models::profile::Profile;
use crate::utils::string_utils::{clean_optional_string, email_local_part, validate_required_string};

/// userinfo 엔드포인트 원본 응답
///
/// 프로바이더마다 누락되는 필드가 있어 모두 선택 필드로 받고,
/// [`ProviderUserInfo::into_profile`]에서 정규화와 검증을 합니다.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderUserInfo {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl ProviderUserInfo {
    /// 정규화된 [`Profile`]로 변환합니다.
    ///
    /// - `email`은 필수이며 이메일 형식이어야 합니다
    /// - `name`이 비어 있으면 이메일의 로컬 파트를 사용합니다
    /// - 빈 `picture`는 `None`이 됩니다
    pub fn into_profile(self) -> Result<Profile, String> {
        let email = validate_required_string(self.email.as_deref().unwrap_or_default(), "email")?;
        let name = clean_optional_string(self.name)
            .unwrap_or_else(|| email_local_part(&email).to_string());

        let profile = Profile {
            email,
            name,
            picture: clean_optional_string(self.picture),
        };

        profile.validate().map_err(|e| e.to_string())?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_profile_normalizes_fields() {
        let info = ProviderUserInfo {
            email: Some(" a@b.com ".to_string()),
            name: Some("  A B ".to_string()),
            picture: Some("   ".to_string()),
        };

        let profile = info.into_profile().unwrap();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.name, "A B");
        assert_eq!(profile.picture, None);
    }

    #[test]
    fn test_into_profile_falls_back_to_email_local_part() {
        let info = ProviderUserInfo {
            email: Some("learner@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(info.into_profile().unwrap().name, "learner");
    }

    #[test]
    fn test_into_profile_rejects_missing_or_invalid_email() {
        assert!(ProviderUserInfo::default().into_profile().is_err());

        let info = ProviderUserInfo {
            email: Some("not-an-email".to_string()),
            name: Some("A B".to_string()),
            picture: None,
        };
        assert!(info.into_profile().is_err());
    }
}
