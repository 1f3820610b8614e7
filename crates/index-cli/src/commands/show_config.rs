//! 적용된 설정 출력 커맨드.

use anyhow::{Context, Result};

use index_core::AppConfig;

/// 파일, 환경 변수, 기본값을 합친 최종 설정을 TOML로 직렬화합니다.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("설정 직렬화 실패")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_config() {
        let out = render_config(&AppConfig::default()).unwrap();
        assert!(out.contains("[basket]"));
        assert!(out.contains("\"287840\""));
        assert!(out.contains("unlisted_policy = \"ignore\""));

        let parsed: AppConfig = toml::from_str(&out).unwrap();
        assert_eq!(parsed.basket.tickers.len(), 53);
    }
}
