//! 문자열/숫자 정규화.
//!
//! 브라질 표기(`1.234,56`, `R$`, `24,3 %`)를 정확한 `Decimal`로 바꿉니다.
//! 부동소수점은 거치지 않습니다.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::NormalizationError;

const CURRENCY_SYMBOL: &str = "R$";
const NO_DATA: &str = "-";
const PERCENT: char = '%';

/// 줄바꿈과 툴팁 표시 문자(`?`)를 제거하고 앞뒤 공백을 정리합니다.
///
/// 여러 번 적용해도 결과가 같습니다.
pub fn string_processing(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '?'))
        .collect();
    cleaned.trim().to_string()
}

/// 숫자 문자열을 `Decimal`로 변환합니다.
///
/// 처리 순서:
/// 1. 줄바꿈 제거
/// 2. `R$` 제거
/// 3. 모든 공백 제거 (non-breaking space 포함)
/// 4. 천 단위 구분자 `.` 제거
/// 5. 소수 구분자 `,` → `.`
///
/// 단독 `-`는 "데이터 없음"이므로 0이 됩니다. `%`로 끝나면 100으로
/// 나눈 분수를 반환합니다 (`"24,3 %"` → `0.243`).
///
/// 정리 후 정확히 `-`인 경우만 0입니다. `"- %"`처럼 퍼센트가 붙은
/// 자리표시자는 받아들이지 않고 `InvalidDecimal`을 반환합니다.
pub fn number_processing(raw: &str) -> Result<Decimal, NormalizationError> {
    let value = clean_number(raw);

    if value == NO_DATA {
        return Ok(Decimal::ZERO);
    }

    match value.strip_suffix(PERCENT) {
        Some(percent) => Ok(parse_decimal(raw, percent)? / Decimal::ONE_HUNDRED),
        None => parse_decimal(raw, &value),
    }
}

fn clean_number(raw: &str) -> String {
    let without_newlines: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();

    without_newlines
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

fn parse_decimal(raw: &str, value: &str) -> Result<Decimal, NormalizationError> {
    Decimal::from_str(value).map_err(|source| NormalizationError::InvalidDecimal {
        raw: raw.to_string(),
        value: value.to_string(),
        source,
    })
}
