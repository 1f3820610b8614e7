//! KRX 종목 코드.
//!
//! KRX 단축 코드는 6자리 숫자 문자열입니다 (예: "035720").
//! 스프레드시트나 pandas를 거친 파일은 앞자리 0이 빠지는 경우가 있어
//! 로딩 시점에 정규화합니다.

/// 종목 코드 (6자리 KRX 단축 코드).
pub type Ticker = String;

/// KRX 단축 코드 길이.
pub const KRX_TICKER_LEN: usize = 6;

/// 종목 코드를 정규화합니다.
///
/// 공백을 제거하고, 숫자로만 이루어진 코드는 6자리로 0을 채웁니다.
/// 숫자가 아닌 코드(예: 지수 코드, 알파벳 포함 코드)는 대문자로만 변환합니다.
pub fn normalize_ticker(raw: &str) -> Ticker {
    let trimmed = raw.trim();
    if !trimmed.is_empty()
        && trimmed.len() < KRX_TICKER_LEN
        && trimmed.chars().all(|c| c.is_ascii_digit())
    {
        format!("{:0>width$}", trimmed, width = KRX_TICKER_LEN)
    } else {
        trimmed.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_numeric_codes() {
        assert_eq!(normalize_ticker("23760"), "023760");
        assert_eq!(normalize_ticker(" 287840 "), "287840");
    }

    #[test]
    fn test_keeps_alphanumeric_codes() {
        assert_eq!(normalize_ticker("0009k0"), "0009K0");
        assert_eq!(normalize_ticker(""), "");
    }

    proptest::proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in "[ 0-9A-Za-z]{0,8}") {
            let once = normalize_ticker(&raw);
            proptest::prop_assert_eq!(normalize_ticker(&once), once);
        }

        #[test]
        fn prop_numeric_codes_keep_value(code in 1u32..1_000_000) {
            let normalized = normalize_ticker(&code.to_string());
            proptest::prop_assert_eq!(normalized.len(), KRX_TICKER_LEN);
            proptest::prop_assert_eq!(normalized.parse::<u32>().unwrap(), code);
        }
    }
}
