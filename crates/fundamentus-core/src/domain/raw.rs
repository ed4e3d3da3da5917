//! 추출 단계의 원시 레코드.
//!
//! HTML에서 그대로 읽어 온 문자열만 담습니다. 정규화와 타입 변환은
//! 변환 단계의 책임입니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 원시 필드 (제목, 툴팁, 값).
///
/// 등락률(oscillations)과 종목 식별 정보에는 툴팁이 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub value: String,
}

impl RawField {
    /// 툴팁이 있는 필드를 생성합니다.
    pub fn new(title: impl Into<String>, tooltip: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tooltip: Some(tooltip.into()),
            value: value.into(),
        }
    }

    /// 툴팁이 없는 필드를 생성합니다.
    pub fn without_tooltip(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tooltip: None,
            value: value.into(),
        }
    }
}

/// 필드 키 → 원시 필드 매핑.
pub type RawSection = BTreeMap<String, RawField>;

/// 상세 정보 카테고리 (52주 변동 폭이 한 단계 더 중첩됨).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDetailedInformation {
    pub fields: RawSection,
    pub variation_52_weeks: RawSection,
}

/// 재무상태표 레이아웃.
///
/// 추출 단계에서 한 번 결정되어 변환 단계까지 그대로 전달됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetLayout {
    /// 일반 기업 (6개 필드)
    #[default]
    Standard,
    /// 금융기관 (4개 필드)
    FinancialInstitution,
}

/// 재무상태표 카테고리.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBalanceSheet {
    pub layout: BalanceSheetLayout,
    pub fields: RawSection,
}

/// 손익계산서 카테고리 (12개월 / 3개월).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIncomeStatement {
    pub twelve_months: RawSection,
    pub three_months: RawSection,
}

/// 상세 페이지 하나에서 추출한 전체 원시 정보.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInformation {
    pub stock_identification: RawSection,
    pub financial_summary: RawSection,
    pub price_information: RawSection,
    pub detailed_information: RawDetailedInformation,
    pub oscillations: RawSection,
    pub valuation_indicators: RawSection,
    pub profitability_indicators: RawSection,
    pub indebtedness_indicators: RawSection,
    pub balance_sheet: RawBalanceSheet,
    pub income_statement: RawIncomeStatement,
}

/// 기업 목록의 원시 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCompany {
    pub code: String,
    pub name: String,
    pub corporate_name: String,
    pub link: String,
}

/// 부동산 펀드(FII) 목록의 원시 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPropertyFund {
    pub code: String,
    pub name: String,
    pub link: String,
}
