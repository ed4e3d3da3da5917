//! HTML → 원시 문자열 추출 (파이프라인의 두 번째 단계).
//!
//! 입력은 HTML 본문 문자열 하나뿐입니다. 상태 코드나 URL은 받지 않습니다.
//! 기대한 요소가 하나라도 없으면 추출 전체가 실패하며, 부분 결과는
//! 반환하지 않습니다.

mod html;
mod schema;

use fundamentus_core::{
    ExtractContract, RawBalanceSheet, RawCompany, RawDetailedInformation, RawField,
    RawIncomeStatement, RawInformation, RawPropertyFund, RawSection,
};
use scraper::{ElementRef, Html};
use tracing::instrument;

use crate::error::{ExtractionError, StructureError};
use html::{all, css, first, nth, read_positions, read_slots, text_of, tooltip, Frames};
use schema::{
    BlockSchema, FieldShape, ANCHOR, BALANCE_COLUMN, BALANCE_SHEET_FRAME, BALANCE_SHEET_LAYOUTS,
    COMPANIES_TABLE, DATA, DETAILED_INFORMATION, FINANCIAL_SUMMARY, INCOME_STATEMENT_FRAME,
    INCOME_STATEMENT_ROWS, INDEBTEDNESS_INDICATORS, OSCILLATIONS, PRICE_INFORMATION,
    PROFITABILITY_INDICATORS, PROPERTY_FUNDS_TABLE, RESULTS_TABLE, STATEMENT_ROW,
    STATEMENT_TITLE, STATEMENT_VALUE, STOCK_IDENTIFICATION, STOCK_IDENTIFICATION_BLOCK,
    TABLE_CELL, TABLE_ROW, THREE_MONTHS_CELL, TWELVE_MONTHS_CELL, VALUATION_INDICATORS,
    VARIATION_52_WEEKS,
};

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// 구조 오류에 섹션 이름을 붙여 추출 오류로 감쌉니다.
fn in_section<T>(section: &'static str, result: std::result::Result<T, StructureError>) -> Result<T> {
    result.map_err(|source| ExtractionError::Structure { section, source })
}

/// Fundamentus 페이지 추출기.
///
/// 상태가 없으므로 여러 호출에서 공유해도 됩니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// 종목 상세 페이지(mobile 레이아웃)의 모든 정보를 추출합니다.
    ///
    /// 목록 페이지가 전달되면 `ExtractionError::DirectoryPage`로 즉시 실패합니다.
    #[instrument(name = "extract_all_information", skip_all, fields(bytes = html.len()))]
    pub fn extract_all_information(&self, html: &str) -> Result<ExtractContract<RawInformation>> {
        let document = Html::parse_document(html);

        if in_section("page", is_directory_page(&document))? {
            return Err(ExtractionError::DirectoryPage);
        }

        let frames = in_section("page", Frames::new(&document))?;
        tracing::debug!(frames = frames.len(), "상세 페이지 블록 수");

        let raw_information = RawInformation {
            stock_identification: in_section(
                "stock_identification",
                self.stock_identification(&document),
            )?,
            financial_summary: self.data_section(&frames, &FINANCIAL_SUMMARY)?,
            price_information: self.data_section(&frames, &PRICE_INFORMATION)?,
            detailed_information: RawDetailedInformation {
                fields: self.data_section(&frames, &DETAILED_INFORMATION)?,
                variation_52_weeks: self.data_section(&frames, &VARIATION_52_WEEKS)?,
            },
            oscillations: self.data_section(&frames, &OSCILLATIONS)?,
            valuation_indicators: self.data_section(&frames, &VALUATION_INDICATORS)?,
            profitability_indicators: self.data_section(&frames, &PROFITABILITY_INDICATORS)?,
            indebtedness_indicators: self.data_section(&frames, &INDEBTEDNESS_INDICATORS)?,
            balance_sheet: in_section("balance_sheet", self.balance_sheet(&frames))?,
            income_statement: in_section("income_statement", self.income_statement(&frames))?,
        };

        tracing::debug!(
            layout = ?raw_information.balance_sheet.layout,
            "상세 페이지 추출 완료"
        );

        Ok(ExtractContract::new(raw_information))
    }

    /// 목록 페이지의 첫 번째 결과 테이블(기업)을 추출합니다.
    #[instrument(name = "extract_companies", skip_all)]
    pub fn extract_companies(&self, html: &str) -> Result<ExtractContract<Vec<RawCompany>>> {
        let document = Html::parse_document(html);

        let companies = in_section(
            "companies",
            self.table_rows(&document, COMPANIES_TABLE, "companies", |cells| {
                let (code, link) = code_cell(&cells, "companies")?;
                Ok(RawCompany {
                    code,
                    name: text_of(cell(&cells, 1, "companies")?),
                    corporate_name: text_of(cell(&cells, 2, "companies")?),
                    link,
                })
            }),
        )?;

        tracing::debug!(count = companies.len(), "기업 목록 추출 완료");
        Ok(ExtractContract::new(companies))
    }

    /// 목록 페이지의 두 번째 결과 테이블(부동산 펀드)을 추출합니다.
    #[instrument(name = "extract_property_funds", skip_all)]
    pub fn extract_property_funds(
        &self,
        html: &str,
    ) -> Result<ExtractContract<Vec<RawPropertyFund>>> {
        let document = Html::parse_document(html);

        let funds = in_section(
            "property_funds",
            self.table_rows(&document, PROPERTY_FUNDS_TABLE, "property_funds", |cells| {
                let (code, link) = code_cell(&cells, "property_funds")?;
                Ok(RawPropertyFund {
                    code,
                    name: text_of(cell(&cells, 1, "property_funds")?),
                    link,
                })
            }),
        )?;

        tracing::debug!(count = funds.len(), "부동산 펀드 목록 추출 완료");
        Ok(ExtractContract::new(funds))
    }

    // =========================================================================
    // 상세 페이지 섹션
    // =========================================================================

    fn data_section(&self, frames: &Frames<'_>, schema: &BlockSchema) -> Result<RawSection> {
        in_section(schema.name, read_block(frames, schema))
    }

    fn stock_identification(&self, document: &Html) -> std::result::Result<RawSection, StructureError> {
        const BLOCK: &str = "stock_identification";

        let header = document
            .select(&css(STOCK_IDENTIFICATION_BLOCK)?)
            .next()
            .ok_or(StructureError::MissingBlock { block: BLOCK })?;

        STOCK_IDENTIFICATION
            .iter()
            .map(|&(key, title, selector)| -> std::result::Result<(String, RawField), StructureError> {
                let value = text_of(first(header, selector, BLOCK)?);
                Ok((key.to_string(), RawField::without_tooltip(title, value)))
            })
            .collect()
    }

    /// 두 열의 `div.data` 개수로 레이아웃을 결정합니다.
    fn balance_sheet(&self, frames: &Frames<'_>) -> std::result::Result<RawBalanceSheet, StructureError> {
        const BLOCK: &str = "balance_sheet";

        let frame = frames.locate(BALANCE_SHEET_FRAME, BLOCK)?;
        let left = all(nth(frame, BALANCE_COLUMN, 0, BLOCK)?, DATA)?;
        let right = all(nth(frame, BALANCE_COLUMN, 1, BLOCK)?, DATA)?;

        let schema = BALANCE_SHEET_LAYOUTS
            .iter()
            .find(|schema| left.len() == schema.column_len && right.len() == schema.column_len)
            .ok_or(StructureError::UnexpectedBalanceSheetShape {
                left: left.len(),
                right: right.len(),
            })?;

        let mut fields = read_positions(&left, schema.left, FieldShape::Titled, BLOCK)?;
        fields.extend(read_positions(&right, schema.right, FieldShape::Titled, BLOCK)?);

        Ok(RawBalanceSheet {
            layout: schema.layout,
            fields,
        })
    }

    fn income_statement(&self, frames: &Frames<'_>) -> std::result::Result<RawIncomeStatement, StructureError> {
        const BLOCK: &str = "income_statement";

        let frame = frames.locate(INCOME_STATEMENT_FRAME, BLOCK)?;
        let rows = all(frame, STATEMENT_ROW)?;

        let mut statement = RawIncomeStatement::default();
        for slot in INCOME_STATEMENT_ROWS {
            let row = rows
                .get(slot.position)
                .copied()
                .ok_or(StructureError::MissingElement {
                    block: BLOCK,
                    selector: STATEMENT_ROW,
                    position: slot.position,
                })?;

            let title_element = first(row, STATEMENT_TITLE, BLOCK)?;
            let title = text_of(title_element);
            let tooltip = tooltip(title_element, BLOCK)?;

            let twelve = text_of(nth(row, STATEMENT_VALUE, TWELVE_MONTHS_CELL, BLOCK)?);
            let three = text_of(nth(row, STATEMENT_VALUE, THREE_MONTHS_CELL, BLOCK)?);

            statement.twelve_months.insert(
                slot.key.to_string(),
                RawField::new(title.clone(), tooltip.clone(), twelve),
            );
            statement
                .three_months
                .insert(slot.key.to_string(), RawField::new(title, tooltip, three));
        }

        Ok(statement)
    }

    // =========================================================================
    // 목록 페이지
    // =========================================================================

    /// N번째 결과 테이블의 데이터 행을 변환합니다 (헤더 행 제외).
    fn table_rows<T>(
        &self,
        document: &Html,
        index: usize,
        block: &'static str,
        mut parse_row: impl FnMut(Vec<ElementRef<'_>>) -> std::result::Result<T, StructureError>,
    ) -> std::result::Result<Vec<T>, StructureError> {
        let table = document
            .select(&css(RESULTS_TABLE)?)
            .nth(index)
            .ok_or(StructureError::MissingTable { index })?;

        let row_selector = css(TABLE_ROW)?;
        let mut rows = Vec::new();
        for row in table.select(&row_selector).skip(1) {
            let cells = all(row, TABLE_CELL)?;
            if cells.is_empty() {
                tracing::trace!(block, "셀 없는 행 건너뜀");
                continue;
            }
            rows.push(parse_row(cells)?);
        }

        Ok(rows)
    }
}

fn is_directory_page(document: &Html) -> std::result::Result<bool, StructureError> {
    Ok(document.select(&css(RESULTS_TABLE)?).next().is_some())
}

fn read_block(frames: &Frames<'_>, schema: &BlockSchema) -> std::result::Result<RawSection, StructureError> {
    let block = frames.locate(schema.locator, schema.name)?;
    let data_blocks = all(block, DATA)?;
    read_slots(&data_blocks, schema)
}

fn cell<'a>(
    cells: &[ElementRef<'a>],
    position: usize,
    block: &'static str,
) -> std::result::Result<ElementRef<'a>, StructureError> {
    cells
        .get(position)
        .copied()
        .ok_or(StructureError::MissingElement {
            block,
            selector: TABLE_CELL,
            position,
        })
}

/// 첫 번째 셀의 코드 텍스트와 링크 대상.
fn code_cell(
    cells: &[ElementRef<'_>],
    block: &'static str,
) -> std::result::Result<(String, String), StructureError> {
    let code_cell = cell(cells, 0, block)?;
    let link = first(code_cell, ANCHOR, block)?
        .value()
        .attr("href")
        .ok_or(StructureError::MissingAttribute {
            block,
            attribute: "href",
        })?;

    Ok((text_of(code_cell), link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundamentus_core::BalanceSheetLayout;

    const MGLU3: &str = include_str!("../../tests/fixtures/mglu3.html");
    const BBAS3: &str = include_str!("../../tests/fixtures/bbas3.html");
    const DIRECTORY: &str = include_str!("../../tests/fixtures/directory.html");

    fn value<'a>(section: &'a RawSection, key: &str) -> &'a str {
        &section[key].value
    }

    #[test]
    fn test_extract_identification_and_price() {
        let contract = Extractor::new().extract_all_information(MGLU3).unwrap();
        let raw = contract.raw_information;

        assert_eq!(value(&raw.stock_identification, "code"), "MGLU3");
        assert_eq!(value(&raw.stock_identification, "name"), "MAGAZ LUIZA");
        assert_eq!(raw.stock_identification["code"].title, "Código");
        assert_eq!(value(&raw.price_information, "price"), "R$4,56");
        assert_eq!(value(&raw.price_information, "date"), "\n19/09/2022\n");
        assert_eq!(raw.price_information["price"].title, "Cotação ?");
    }

    #[test]
    fn test_extract_uses_tooltip_fallback_attribute() {
        let raw = Extractor::new()
            .extract_all_information(MGLU3)
            .unwrap()
            .raw_information;

        // title="" 이므로 data-original-title 사용
        let psr = &raw.valuation_indicators["price_divided_by_net_revenue"];
        assert_eq!(
            psr.tooltip.as_deref(),
            Some("Price Sales Ratio: Preço da ação dividido pela Receita Líquida por ação.")
        );

        let pl = &raw.valuation_indicators["price_divided_by_profit_title"];
        assert_eq!(pl.value, "-514,47");
        assert!(pl.tooltip.as_deref().unwrap().starts_with("Preço da ação dividido pelo lucro"));
    }

    #[test]
    fn test_tooltip_without_any_attribute_fails() {
        let html = MGLU3.replacen(
            "P/L <span class=\"data-tooltip\" data-toggle=\"tooltip\" title=",
            "P/L <span class=\"data-tooltip\" data-toggle=\"tooltip\" data-note=",
            1,
        );
        assert_ne!(html, MGLU3);

        let err = Extractor::new().extract_all_information(&html).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Structure {
                section: "valuation_indicators",
                source: StructureError::MissingAttribute {
                    attribute: "data-original-title",
                    ..
                },
            }
        ));
    }

    #[test]
    fn test_extract_detailed_information_skips_duplicates() {
        let raw = Extractor::new()
            .extract_all_information(MGLU3)
            .unwrap()
            .raw_information;
        let detailed = &raw.detailed_information;

        assert_eq!(value(&detailed.fields, "stock_type"), "ON NM");
        assert_eq!(value(&detailed.fields, "equity_value_per_share"), "1,62");
        assert_eq!(value(&detailed.fields, "earnings_per_share"), "-0,01");
        assert_eq!(detailed.fields.len(), 4);

        let lowest = &detailed.variation_52_weeks["lowest_value"];
        assert_eq!(lowest.value, "R$ 2,13");
        assert_eq!(lowest.title, "mínimo ?");
        assert_eq!(
            lowest.tooltip.as_deref(),
            Some("Menor cotação da ação nos últimos 12 meses.")
        );
        assert_eq!(value(&detailed.variation_52_weeks, "highest_value"), "R$ 16,39");
    }

    #[test]
    fn test_extract_oscillations_have_no_tooltip() {
        let raw = Extractor::new()
            .extract_all_information(MGLU3)
            .unwrap()
            .raw_information;

        assert_eq!(raw.oscillations.len(), 10);
        assert!(raw.oscillations.values().all(|field| field.tooltip.is_none()));
        assert_eq!(raw.oscillations["variation_day"].value, "\n2,24 %");
        assert_eq!(raw.oscillations["variation_current_year"].title, "2022");
        assert_eq!(raw.oscillations["variation_5_years_ago"].title, "2017");
    }

    #[test]
    fn test_extract_standard_balance_sheet() {
        let raw = Extractor::new()
            .extract_all_information(MGLU3)
            .unwrap()
            .raw_information;

        assert_eq!(raw.balance_sheet.layout, BalanceSheetLayout::Standard);
        assert_eq!(raw.balance_sheet.fields.len(), 6);
        assert_eq!(value(&raw.balance_sheet.fields, "gross_debt"), "R$ 6.846.580.000");
        assert_eq!(value(&raw.balance_sheet.fields, "equity"), "R$ 10.937.800.000");
    }

    #[test]
    fn test_extract_financial_institution_balance_sheet() {
        let raw = Extractor::new()
            .extract_all_information(BBAS3)
            .unwrap()
            .raw_information;

        assert_eq!(raw.balance_sheet.layout, BalanceSheetLayout::FinancialInstitution);
        let keys: Vec<&str> = raw.balance_sheet.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["credit_portfolio", "deposits", "equity", "total_assets"]);
        assert_eq!(value(&raw.balance_sheet.fields, "deposits"), "R$ 810.540.000.000");
    }

    #[test]
    fn test_unexpected_balance_sheet_shape_fails() {
        let html = MGLU3.replacen(
            "<div class=\"data\">\n<span class=\"data-title\">Disponibilidades",
            "<div class=\"removed\">\n<span class=\"data-title\">Disponibilidades",
            1,
        );

        let err = Extractor::new().extract_all_information(&html).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Structure {
                section: "balance_sheet",
                source: StructureError::UnexpectedBalanceSheetShape { left: 2, right: 3 },
            }
        ));
    }

    #[test]
    fn test_extract_income_statement_periods() {
        let raw = Extractor::new()
            .extract_all_information(MGLU3)
            .unwrap()
            .raw_information;
        let statement = &raw.income_statement;

        assert_eq!(value(&statement.twelve_months, "revenue"), "R$ 35.336.600.000");
        assert_eq!(value(&statement.three_months, "revenue"), "R$ 8.562.390.000");
        assert_eq!(value(&statement.twelve_months, "net_income"), "R$ -59.819.000");
        assert_eq!(value(&statement.three_months, "ebit"), "R$ 274.562.000");
        assert_eq!(statement.three_months["ebit"].title, "EBIT ?");
    }

    #[test]
    fn test_directory_page_is_rejected() {
        let err = Extractor::new().extract_all_information(DIRECTORY).unwrap_err();
        assert!(matches!(err, ExtractionError::DirectoryPage));
    }

    #[test]
    fn test_missing_block_fails() {
        let err = Extractor::new()
            .extract_all_information("<html><body><p>Nenhum papel encontrado</p></body></html>")
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Structure {
                section: "stock_identification",
                source: StructureError::MissingBlock { .. },
            }
        ));
    }

    #[test]
    fn test_extract_companies() {
        let companies = Extractor::new()
            .extract_companies(DIRECTORY)
            .unwrap()
            .raw_information;

        assert_eq!(companies.len(), 25);
        assert_eq!(companies[0].code, "AALR3 ");
        assert_eq!(companies[0].link, "detalhes.php?papel=AALR3 ");
        assert_eq!(companies[0].corporate_name, "CENTRO DE IMAGEM DIAGNOSTICOS S.A.");
        assert_eq!(companies[1].name, "ABC Brasil");
    }

    #[test]
    fn test_extract_property_funds() {
        let funds = Extractor::new()
            .extract_property_funds(DIRECTORY)
            .unwrap()
            .raw_information;

        assert_eq!(funds.len(), 26);
        assert_eq!(funds[0].code, "ABCP11");
        assert_eq!(funds[0].link, "detalhes.php?papel=ABCP11");
    }

    #[test]
    fn test_property_funds_require_second_table() {
        let err = Extractor::new().extract_property_funds(MGLU3).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Structure {
                source: StructureError::MissingTable { index: 1 },
                ..
            }
        ));
    }
}
