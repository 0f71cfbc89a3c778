//! 토큰 지문 유틸리티
//!
//! 액세스 토큰은 로그와 UI 어디에도 원문으로 남기지 않습니다.
//! 같은 토큰인지 추적할 수 있도록 SHA-256 앞 12자리만 사용합니다.

use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 12;

/// 토큰의 SHA-256 지문 (`sha256:1a2b3c4d5e6f`)
pub fn fingerprint(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("sha256:{}", &hex[..FINGERPRINT_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("tok123");

        assert_eq!(a, fingerprint("tok123"));
        assert_ne!(a, fingerprint("tok124"));
        assert_eq!(a.len(), "sha256:".len() + FINGERPRINT_LEN);
        assert!(!a.contains("tok123"));
    }
}
