//! 변환 단계의 타입 지정 레코드.
//!
//! 모든 숫자 필드는 정확한 `Decimal` 값으로, 날짜/분류/종류 같은 텍스트
//! 필드는 정리된 문자열로 보관됩니다. 생성 이후에는 변경되지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 정규화된 필드 값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 정확한 소수 (퍼센트는 0.243 같은 분수로 저장)
    Number(Decimal),
    /// 텍스트 (날짜, 섹터명, 종목 종류 등)
    Text(String),
}

impl FieldValue {
    /// 숫자 값이면 반환합니다.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// 텍스트 값이면 반환합니다.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// 표시용 제목/툴팁과 정규화된 값을 가진 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationItem {
    pub title: String,
    pub tooltip: String,
    pub value: FieldValue,
}

impl InformationItem {
    pub fn new(title: impl Into<String>, tooltip: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            title: title.into(),
            tooltip: tooltip.into(),
            value: value.into(),
        }
    }
}

/// 종목 식별 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIdentification {
    pub code: InformationItem,
    pub name: InformationItem,
}

/// 재무 요약 (시가총액, 기업가치, 주식 수, 최근 결산일, 섹터).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub market_valuation: InformationItem,
    pub enterprise_valuation: InformationItem,
    pub number_of_shares: InformationItem,
    pub last_balance_sheet_date: InformationItem,
    pub sector: InformationItem,
    pub subsector: InformationItem,
}

/// 시세 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInformation {
    pub price: InformationItem,
    pub date: InformationItem,
}

/// 52주 최저/최고가.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation52Weeks {
    pub lowest_value: InformationItem,
    pub highest_value: InformationItem,
}

/// 상세 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedInformation {
    pub stock_type: InformationItem,
    pub traded_volume_per_day: InformationItem,
    pub equity_value_per_share: InformationItem,
    pub earnings_per_share: InformationItem,
    pub variation_52_weeks: Variation52Weeks,
}

/// 기간별 등락률.
///
/// 연도별 항목의 제목에는 페이지의 실제 연도가 들어갑니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oscillations {
    pub variation_day: InformationItem,
    pub variation_month: InformationItem,
    pub variation_30_days: InformationItem,
    pub variation_12_months: InformationItem,
    pub variation_current_year: InformationItem,
    pub variation_1_year_ago: InformationItem,
    pub variation_2_years_ago: InformationItem,
    pub variation_3_years_ago: InformationItem,
    pub variation_4_years_ago: InformationItem,
    pub variation_5_years_ago: InformationItem,
}

/// 밸류에이션 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationIndicators {
    pub price_divided_by_profit_title: InformationItem,
    pub price_divided_by_asset_value: InformationItem,
    pub price_divided_by_ebit: InformationItem,
    pub price_divided_by_net_revenue: InformationItem,
    pub price_divided_by_total_assets: InformationItem,
    pub price_divided_by_net_current_assets: InformationItem,
    pub dividend_yield: InformationItem,
    pub enterprise_value_by_ebitda: InformationItem,
    pub enterprise_value_by_ebit: InformationItem,
    pub price_by_working_capital: InformationItem,
}

/// 수익성 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityIndicators {
    pub return_on_equity: InformationItem,
    pub return_on_invested_capital: InformationItem,
    pub ebit_divided_by_total_assets: InformationItem,
    pub net_revenue_growth_last_5_years: InformationItem,
    pub net_revenue_divided_by_total_assets: InformationItem,
    pub gross_profit_divided_by_net_revenue: InformationItem,
    pub ebit_divided_by_net_revenue: InformationItem,
    pub net_income_divided_by_net_revenue: InformationItem,
}

/// 부채 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndebtednessIndicators {
    pub current_liquidity: InformationItem,
    pub gross_debt_by_equity: InformationItem,
    pub net_debt_by_equity: InformationItem,
    pub net_debt_by_ebitda: InformationItem,
    pub equity_by_total_assets: InformationItem,
}

/// 일반 기업 재무상태표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardBalanceSheet {
    pub total_assets: InformationItem,
    pub current_assets: InformationItem,
    pub cash: InformationItem,
    pub gross_debt: InformationItem,
    pub net_debt: InformationItem,
    pub equity: InformationItem,
}

/// 금융기관 재무상태표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInstitutionBalanceSheet {
    pub total_assets: InformationItem,
    pub credit_portfolio: InformationItem,
    pub deposits: InformationItem,
    pub equity: InformationItem,
}

/// 재무상태표 (두 가지 형태 중 하나).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceSheet {
    Standard(StandardBalanceSheet),
    FinancialInstitution(FinancialInstitutionBalanceSheet),
}

impl BalanceSheet {
    /// 총자산.
    pub fn total_assets(&self) -> &InformationItem {
        match self {
            Self::Standard(sheet) => &sheet.total_assets,
            Self::FinancialInstitution(sheet) => &sheet.total_assets,
        }
    }

    /// 자기자본.
    pub fn equity(&self) -> &InformationItem {
        match self {
            Self::Standard(sheet) => &sheet.equity,
            Self::FinancialInstitution(sheet) => &sheet.equity,
        }
    }

    /// 금융기관 형태인지 확인합니다.
    pub fn is_financial_institution(&self) -> bool {
        matches!(self, Self::FinancialInstitution(_))
    }
}

/// 손익계산서의 한 기간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementPeriod {
    pub revenue: InformationItem,
    pub ebit: InformationItem,
    pub net_income: InformationItem,
}

/// 손익계산서 (최근 12개월 / 최근 3개월).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub twelve_months: IncomeStatementPeriod,
    pub three_months: IncomeStatementPeriod,
}

/// 종목 하나의 전체 변환 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedInformation {
    pub stock_identification: StockIdentification,
    pub financial_summary: FinancialSummary,
    pub price_information: PriceInformation,
    pub detailed_information: DetailedInformation,
    pub oscillations: Oscillations,
    pub valuation_indicators: ValuationIndicators,
    pub profitability_indicators: ProfitabilityIndicators,
    pub indebtedness_indicators: IndebtednessIndicators,
    pub balance_sheet: BalanceSheet,
    pub income_statement: IncomeStatement,
}
