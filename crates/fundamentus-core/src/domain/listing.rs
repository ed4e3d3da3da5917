//! 디렉터리 페이지의 기업/부동산 펀드 목록 항목.

use serde::{Deserialize, Serialize};

/// 상장 기업.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// 종목 코드 (예: "AALR3")
    pub code: String,
    /// 대문자로 정규화된 약칭
    pub name: String,
    /// 대문자로 정규화된 법인명
    pub corporate_name: String,
    /// 상세 페이지 절대 URL
    pub link: String,
}

/// 부동산 투자 펀드 (FII).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFund {
    /// 종목 코드 (예: "ABCP11")
    pub code: String,
    /// 대문자로 정규화된 펀드명
    pub name: String,
    /// 상세 페이지 절대 URL
    pub link: String,
}
