//! 터미널 출력 포맷팅 유틸리티
//!
//! 게이트웨이 시작 시 프로바이더 초기화 결과를 보기 좋게 출력합니다.

use crate::domain::dto::snapshot::ProviderAvailability;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              PROVIDER INITIALIZATION             ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 프로바이더별 초기화 결과를 한 줄씩 출력합니다
pub fn print_provider_status(providers: &[ProviderAvailability]) {
    for entry in providers {
        let mark = if entry.available { "✓ ready" } else { "✗ unavailable" };
        println!("  ├─ {:<10} {}", entry.name, mark);
    }
}

/// 최종 요약을 출력합니다
pub fn print_final_summary(available: usize, total: usize) {
    println!();
    if available == 0 {
        println!("⚠️  사용 가능한 로그인 프로바이더가 없습니다 ({}/{})", available, total);
    } else {
        println!("✨ 로그인 프로바이더 {}/{} 준비 완료", available, total);
    }
    println!();
}
