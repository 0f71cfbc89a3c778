use log::info;

/// 로그인 성공 후 화면 이동을 수행하는 주체
///
/// 플로우는 리다이렉트 지연이 끝나면 시도당 정확히 한 번 `navigate`를 호출합니다.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str);
}

/// 이동 대상을 로그로만 남기는 기본 구현
///
/// 게이트웨이 모드에서는 UI가 스냅샷의 `redirect_to`를 보고 직접 이동합니다.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, destination: &str) {
        info!("➡️ 리다이렉트: {}", destination);
    }
}
