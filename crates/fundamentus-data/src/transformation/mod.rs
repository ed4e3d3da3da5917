//! 원시 문자열 → 타입 지정 레코드 변환 (파이프라인의 세 번째 단계).
//!
//! 모든 필드의 제목과 툴팁에는 `string_processing`, 숫자 필드의 값에는
//! `number_processing`을 적용합니다. 한 필드라도 실패하면 전체 변환이
//! 실패하며 부분 결과는 버려집니다.

mod normalize;

pub use normalize::{number_processing, string_processing};

use fundamentus_core::{
    BalanceSheet, BalanceSheetLayout, Company, DetailedInformation, ExtractContract,
    FinancialInstitutionBalanceSheet, FinancialSummary, IncomeStatement, IncomeStatementPeriod,
    IndebtednessIndicators, InformationItem, Oscillations, PriceInformation,
    ProfitabilityIndicators, PropertyFund, RawBalanceSheet, RawCompany, RawField,
    RawInformation, RawPropertyFund, RawSection, StandardBalanceSheet, StockIdentification,
    TransformContract, TransformedInformation, ValuationIndicators, Variation52Weeks,
};
use tracing::instrument;

use crate::error::TransformationError;

pub type Result<T> = std::result::Result<T, TransformationError>;

/// 카테고리 하나를 읽는 헬퍼.
///
/// 누락된 키와 정규화 실패에 `카테고리.키` 경로를 붙입니다.
struct Section<'a> {
    category: &'static str,
    fields: &'a RawSection,
}

impl<'a> Section<'a> {
    fn new(category: &'static str, fields: &'a RawSection) -> Self {
        Self { category, fields }
    }

    fn field(&self, key: &'static str) -> Result<&'a RawField> {
        self.fields
            .get(key)
            .ok_or(TransformationError::MissingField {
                category: self.category,
                key,
            })
    }

    /// 숫자 필드.
    fn number(&self, key: &'static str) -> Result<InformationItem> {
        let field = self.field(key)?;
        let value = number_processing(&field.value).map_err(|source| {
            TransformationError::Normalization {
                category: self.category,
                key,
                source,
            }
        })?;

        Ok(InformationItem::new(
            string_processing(&field.title),
            tooltip(field),
            value,
        ))
    }

    /// 텍스트 필드 (날짜, 분류, 종목 종류, 식별 문자열).
    fn text(&self, key: &'static str) -> Result<InformationItem> {
        let field = self.field(key)?;
        Ok(InformationItem::new(
            string_processing(&field.title),
            tooltip(field),
            string_processing(&field.value),
        ))
    }
}

fn tooltip(field: &RawField) -> String {
    field
        .tooltip
        .as_deref()
        .map(string_processing)
        .unwrap_or_default()
}

/// 원시 레코드 변환기.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    /// 상세 페이지 원시 정보를 변환합니다. 추출일은 그대로 전달됩니다.
    #[instrument(name = "transform_all_information", skip_all, fields(extraction_date = contract.extraction_date))]
    pub fn transform_all_information(
        &self,
        contract: ExtractContract<RawInformation>,
    ) -> Result<TransformContract<TransformedInformation>> {
        let raw = &contract.raw_information;

        let transformed = TransformedInformation {
            stock_identification: stock_identification(&raw.stock_identification)?,
            financial_summary: financial_summary(&raw.financial_summary)?,
            price_information: price_information(&raw.price_information)?,
            detailed_information: detailed_information(
                &raw.detailed_information.fields,
                &raw.detailed_information.variation_52_weeks,
            )?,
            oscillations: oscillations(&raw.oscillations)?,
            valuation_indicators: valuation_indicators(&raw.valuation_indicators)?,
            profitability_indicators: profitability_indicators(&raw.profitability_indicators)?,
            indebtedness_indicators: indebtedness_indicators(&raw.indebtedness_indicators)?,
            balance_sheet: balance_sheet(&raw.balance_sheet)?,
            income_statement: IncomeStatement {
                twelve_months: income_statement_period(
                    "income_statement.twelve_months",
                    &raw.income_statement.twelve_months,
                )?,
                three_months: income_statement_period(
                    "income_statement.three_months",
                    &raw.income_statement.three_months,
                )?,
            },
        };

        tracing::debug!(
            financial_institution = transformed.balance_sheet.is_financial_institution(),
            "상세 정보 변환 완료"
        );

        Ok(TransformContract::new(transformed, contract.extraction_date))
    }

    /// 기업 목록을 변환합니다. 링크는 `base_url` 기준 절대 URL이 됩니다.
    #[instrument(name = "transform_companies", skip_all, fields(count = contract.raw_information.len()))]
    pub fn transform_companies(
        &self,
        contract: ExtractContract<Vec<RawCompany>>,
        base_url: &str,
    ) -> Result<TransformContract<Vec<Company>>> {
        let companies = contract
            .raw_information
            .iter()
            .map(|raw| Company {
                code: normalize_code(&raw.code),
                name: normalize_name(&raw.name),
                corporate_name: normalize_name(&raw.corporate_name),
                link: absolute_link(base_url, &raw.link),
            })
            .collect();

        Ok(TransformContract::new(companies, contract.extraction_date))
    }

    /// 부동산 펀드 목록을 변환합니다.
    #[instrument(name = "transform_property_funds", skip_all, fields(count = contract.raw_information.len()))]
    pub fn transform_property_funds(
        &self,
        contract: ExtractContract<Vec<RawPropertyFund>>,
        base_url: &str,
    ) -> Result<TransformContract<Vec<PropertyFund>>> {
        let funds = contract
            .raw_information
            .iter()
            .map(|raw| PropertyFund {
                code: normalize_code(&raw.code),
                name: normalize_name(&raw.name),
                link: absolute_link(base_url, &raw.link),
            })
            .collect();

        Ok(TransformContract::new(funds, contract.extraction_date))
    }
}

// =============================================================================
// 카테고리별 변환
// =============================================================================

fn stock_identification(fields: &RawSection) -> Result<StockIdentification> {
    let section = Section::new("stock_identification", fields);
    Ok(StockIdentification {
        code: section.text("code")?,
        name: section.text("name")?,
    })
}

fn financial_summary(fields: &RawSection) -> Result<FinancialSummary> {
    let section = Section::new("financial_summary", fields);
    Ok(FinancialSummary {
        market_valuation: section.number("market_valuation")?,
        enterprise_valuation: section.number("enterprise_valuation")?,
        number_of_shares: section.number("number_of_shares")?,
        last_balance_sheet_date: section.text("last_balance_sheet_date")?,
        sector: section.text("sector")?,
        subsector: section.text("subsector")?,
    })
}

fn price_information(fields: &RawSection) -> Result<PriceInformation> {
    let section = Section::new("price_information", fields);
    Ok(PriceInformation {
        price: section.number("price")?,
        date: section.text("date")?,
    })
}

fn detailed_information(
    fields: &RawSection,
    variation_52_weeks: &RawSection,
) -> Result<DetailedInformation> {
    let section = Section::new("detailed_information", fields);
    let variation = Section::new("detailed_information.variation_52_weeks", variation_52_weeks);

    Ok(DetailedInformation {
        stock_type: section.text("stock_type")?,
        traded_volume_per_day: section.number("traded_volume_per_day")?,
        equity_value_per_share: section.number("equity_value_per_share")?,
        earnings_per_share: section.number("earnings_per_share")?,
        variation_52_weeks: Variation52Weeks {
            lowest_value: variation.number("lowest_value")?,
            highest_value: variation.number("highest_value")?,
        },
    })
}

fn oscillations(fields: &RawSection) -> Result<Oscillations> {
    let section = Section::new("oscillations", fields);
    Ok(Oscillations {
        variation_day: section.number("variation_day")?,
        variation_month: section.number("variation_month")?,
        variation_30_days: section.number("variation_30_days")?,
        variation_12_months: section.number("variation_12_months")?,
        variation_current_year: section.number("variation_current_year")?,
        variation_1_year_ago: section.number("variation_1_year_ago")?,
        variation_2_years_ago: section.number("variation_2_years_ago")?,
        variation_3_years_ago: section.number("variation_3_years_ago")?,
        variation_4_years_ago: section.number("variation_4_years_ago")?,
        variation_5_years_ago: section.number("variation_5_years_ago")?,
    })
}

fn valuation_indicators(fields: &RawSection) -> Result<ValuationIndicators> {
    let section = Section::new("valuation_indicators", fields);
    Ok(ValuationIndicators {
        price_divided_by_profit_title: section.number("price_divided_by_profit_title")?,
        price_divided_by_asset_value: section.number("price_divided_by_asset_value")?,
        price_divided_by_ebit: section.number("price_divided_by_ebit")?,
        price_divided_by_net_revenue: section.number("price_divided_by_net_revenue")?,
        price_divided_by_total_assets: section.number("price_divided_by_total_assets")?,
        price_divided_by_net_current_assets: section.number("price_divided_by_net_current_assets")?,
        dividend_yield: section.number("dividend_yield")?,
        enterprise_value_by_ebitda: section.number("enterprise_value_by_ebitda")?,
        enterprise_value_by_ebit: section.number("enterprise_value_by_ebit")?,
        price_by_working_capital: section.number("price_by_working_capital")?,
    })
}

fn profitability_indicators(fields: &RawSection) -> Result<ProfitabilityIndicators> {
    let section = Section::new("profitability_indicators", fields);
    Ok(ProfitabilityIndicators {
        return_on_equity: section.number("return_on_equity")?,
        return_on_invested_capital: section.number("return_on_invested_capital")?,
        ebit_divided_by_total_assets: section.number("ebit_divided_by_total_assets")?,
        net_revenue_growth_last_5_years: section.number("net_revenue_growth_last_5_years")?,
        net_revenue_divided_by_total_assets: section.number("net_revenue_divided_by_total_assets")?,
        gross_profit_divided_by_net_revenue: section.number("gross_profit_divided_by_net_revenue")?,
        ebit_divided_by_net_revenue: section.number("ebit_divided_by_net_revenue")?,
        net_income_divided_by_net_revenue: section.number("net_income_divided_by_net_revenue")?,
    })
}

fn indebtedness_indicators(fields: &RawSection) -> Result<IndebtednessIndicators> {
    let section = Section::new("indebtedness_indicators", fields);
    Ok(IndebtednessIndicators {
        current_liquidity: section.number("current_liquidity")?,
        gross_debt_by_equity: section.number("gross_debt_by_equity")?,
        net_debt_by_equity: section.number("net_debt_by_equity")?,
        net_debt_by_ebitda: section.number("net_debt_by_ebitda")?,
        equity_by_total_assets: section.number("equity_by_total_assets")?,
    })
}

/// 추출 단계가 결정한 레이아웃에 따라 분기합니다.
fn balance_sheet(raw: &RawBalanceSheet) -> Result<BalanceSheet> {
    let section = Section::new("balance_sheet", &raw.fields);

    match raw.layout {
        BalanceSheetLayout::Standard => Ok(BalanceSheet::Standard(StandardBalanceSheet {
            total_assets: section.number("total_assets")?,
            current_assets: section.number("current_assets")?,
            cash: section.number("cash")?,
            gross_debt: section.number("gross_debt")?,
            net_debt: section.number("net_debt")?,
            equity: section.number("equity")?,
        })),
        BalanceSheetLayout::FinancialInstitution => Ok(BalanceSheet::FinancialInstitution(
            FinancialInstitutionBalanceSheet {
                total_assets: section.number("total_assets")?,
                credit_portfolio: section.number("credit_portfolio")?,
                deposits: section.number("deposits")?,
                equity: section.number("equity")?,
            },
        )),
    }
}

fn income_statement_period(
    category: &'static str,
    fields: &RawSection,
) -> Result<IncomeStatementPeriod> {
    let section = Section::new(category, fields);
    Ok(IncomeStatementPeriod {
        revenue: section.number("revenue")?,
        ebit: section.number("ebit")?,
        net_income: section.number("net_income")?,
    })
}

// =============================================================================
// 목록 정규화
// =============================================================================

fn normalize_code(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn normalize_name(raw: &str) -> String {
    string_processing(raw).to_uppercase()
}

/// 상대 링크를 `base_url` 기준 절대 URL로 바꿉니다.
fn absolute_link(base_url: &str, href: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim().trim_start_matches('/')
    )
}
