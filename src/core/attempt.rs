//! 로그인 시도 순번 관리
//!
//! 시도마다 단조 증가하는 순번을 부여하고, 비동기 작업이 끝나 상태를 갱신하기 직전에
//! 그 순번이 여전히 활성 순번인지 확인합니다. 순번이 다르면 결과를 버립니다.
//!
//! 순번은 OAuth `state` 파라미터에도 실려 나가므로([`AttemptToken`]),
//! 늦게 도착한 프로바이더 콜백도 같은 방식으로 걸러집니다.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::provider::Provider;

/// 시도 순번
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AttemptId(u64);

impl AttemptId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 단조 증가 순번 발급기
///
/// 0은 "활성 시도 없음"을 뜻하며 어떤 시도에도 발급되지 않습니다.
#[derive(Debug, Default)]
pub struct AttemptSequence {
    current: u64,
}

impl AttemptSequence {
    /// 다음 [`begin`](Self::begin)이 돌려줄 순번
    pub fn peek_next(&self) -> AttemptId {
        AttemptId(self.current + 1)
    }

    /// 새 시도를 시작합니다. 이전 시도는 모두 무효가 됩니다.
    pub fn begin(&mut self) -> AttemptId {
        self.current += 1;
        AttemptId(self.current)
    }

    /// 진행 중인 시도를 무효화합니다 (화면 이탈, 취소).
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, attempt: AttemptId) -> bool {
        self.current == attempt.0
    }
}

/// OAuth `state`로 사용하는 시도 식별자
///
/// `provider.sequence.nonce` 형식으로 인코딩됩니다.
/// nonce는 순번을 추측해 위조한 콜백을 막습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptToken {
    provider: Provider,
    attempt: AttemptId,
    nonce: String,
}

impl AttemptToken {
    pub fn issue(provider: Provider, attempt: AttemptId) -> Self {
        Self {
            provider,
            attempt,
            nonce: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn encode(&self) -> String {
        format!("{}.{}.{}", self.provider.as_str(), self.attempt.0, self.nonce)
    }

    /// 콜백으로 돌아온 `state`를 해석합니다. 형식이 맞지 않으면 `None`.
    pub fn parse(state: &str) -> Option<Self> {
        let mut parts = state.splitn(3, '.');
        let provider = parts.next()?.parse::<Provider>().ok()?;
        let attempt = parts.next()?.parse::<u64>().ok()?;
        let nonce = parts.next()?;
        if nonce.is_empty() {
            return None;
        }

        Some(Self {
            provider,
            attempt: AttemptId(attempt),
            nonce: nonce.to_string(),
        })
    }

    /// 콜백 `state`가 이 토큰과 정확히 일치하는지
    pub fn matches(&self, state: &str) -> bool {
        Self::parse(state).is_some_and(|other| other == *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic_and_invalidates() {
        let mut sequence = AttemptSequence::default();

        let first = sequence.begin();
        assert!(sequence.is_current(first));

        let next = sequence.peek_next();
        let second = sequence.begin();
        assert_eq!(next, second);
        assert!(second > first);
        assert!(!sequence.is_current(first));

        sequence.invalidate();
        assert!(!sequence.is_current(second));
    }

    #[test]
    fn test_token_matches_only_its_own_state() {
        let token = AttemptToken::issue(Provider::Google, AttemptId(3));
        let other = AttemptToken::issue(Provider::Google, AttemptId(3));

        assert!(token.matches(&token.encode()));
        assert!(!token.matches(&other.encode()));
        assert!(!token.matches("google.3"));
        assert!(!token.matches("garbage"));
    }

    #[test]
    fn test_parse_reads_provider_and_attempt() {
        let parsed = AttemptToken::parse("apple.7.abc123").unwrap();

        assert_eq!(parsed.provider(), Provider::Apple);
        assert_eq!(parsed.attempt().value(), 7);
        assert!(AttemptToken::parse("github.7.abc").is_none());
        assert!(AttemptToken::parse("apple.x.abc").is_none());
    }
}
