//! mobile 레이아웃 필드 인덱스 테이블.
//!
//! 페이지 마크업에는 필드 이름 속성이 없으므로 블록 안의 위치가 유일한
//! 식별 수단입니다. `(블록, 위치) → 필드 키` 매핑을 모두 이 파일에 모아
//! 레이아웃이 바뀌면 이 테이블만 고치면 되도록 합니다.
//! 추출기 밖에서는 위치 인덱스가 보이지 않습니다.

use fundamentus_core::BalanceSheetLayout;

// =============================================================================
// CSS 셀렉터
// =============================================================================

pub(crate) const FRAME: &str = "div.frame";
pub(crate) const DATA: &str = "div.data";
pub(crate) const DATA_TITLE: &str = "span.data-title";
pub(crate) const DATA_VALUE: &str = "span.data-value";
pub(crate) const DATA_TEXT: &str = "span.data-text";
pub(crate) const DATA_TOOLTIP: &str = "span.data-tooltip";
pub(crate) const BALANCE_COLUMN: &str = "div.col-sm";
pub(crate) const STATEMENT_ROW: &str = "tbody tr";
pub(crate) const STATEMENT_TITLE: &str = "span.dt-title";
pub(crate) const STATEMENT_VALUE: &str = "span.dt-value";

/// 목록(디렉터리) 페이지의 결과 테이블. 상세 페이지에는 없습니다.
pub(crate) const RESULTS_TABLE: &str = "table.table-resultados-trimestrais";
pub(crate) const TABLE_ROW: &str = "tr";
pub(crate) const TABLE_CELL: &str = "td";
pub(crate) const ANCHOR: &str = "a";

/// 툴팁 속성 (비어 있으면 대체 속성 확인)
pub(crate) const TOOLTIP_ATTR: &str = "title";
pub(crate) const TOOLTIP_FALLBACK_ATTR: &str = "data-original-title";

// =============================================================================
// 블록 스키마
// =============================================================================

/// 블록 위치 지정 방식.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Locator {
    /// 문서 내 N번째 `div.frame`
    Frame(usize),
    /// 셀렉터와 일치하는 첫 요소
    Selector(&'static str),
}

/// 블록 안 `div.data` 요소의 모양.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldShape {
    /// `span.data-title`(툴팁 포함) + `span.data-value`
    Titled,
    /// `span.data-value` + `span.data-text`(툴팁 포함)
    Labeled,
    /// `span.data-value` + `span.data-text` (툴팁 없음)
    LabeledWithoutTooltip,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSlot {
    pub key: &'static str,
    pub position: usize,
}

const fn slot(key: &'static str, position: usize) -> FieldSlot {
    FieldSlot { key, position }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockSchema {
    pub name: &'static str,
    pub locator: Locator,
    pub shape: FieldShape,
    pub fields: &'static [FieldSlot],
}

pub(crate) const FINANCIAL_SUMMARY: BlockSchema = BlockSchema {
    name: "financial_summary",
    locator: Locator::Frame(0),
    shape: FieldShape::Titled,
    fields: &[
        slot("market_valuation", 0),
        slot("enterprise_valuation", 1),
        slot("number_of_shares", 2),
        slot("last_balance_sheet_date", 3),
        slot("sector", 4),
        slot("subsector", 5),
    ],
};

pub(crate) const PRICE_INFORMATION: BlockSchema = BlockSchema {
    name: "price_information",
    locator: Locator::Selector("div.frame-cotacao"),
    shape: FieldShape::Titled,
    fields: &[slot("price", 0), slot("date", 1)],
};

// 위치 4는 52주 변동 폭 컨테이너, 7/8은 좁은 화면용 VPA/LPA 중복
pub(crate) const DETAILED_INFORMATION: BlockSchema = BlockSchema {
    name: "detailed_information",
    locator: Locator::Frame(1),
    shape: FieldShape::Titled,
    fields: &[
        slot("stock_type", 0),
        slot("traded_volume_per_day", 1),
        slot("equity_value_per_share", 2),
        slot("earnings_per_share", 3),
    ],
};

pub(crate) const VARIATION_52_WEEKS: BlockSchema = BlockSchema {
    name: "detailed_information.variation_52_weeks",
    locator: Locator::Frame(1),
    shape: FieldShape::Labeled,
    fields: &[slot("lowest_value", 5), slot("highest_value", 6)],
};

pub(crate) const OSCILLATIONS: BlockSchema = BlockSchema {
    name: "oscillations",
    locator: Locator::Selector("div.oscilacoes"),
    shape: FieldShape::LabeledWithoutTooltip,
    fields: &[
        slot("variation_day", 0),
        slot("variation_month", 1),
        slot("variation_30_days", 2),
        slot("variation_12_months", 3),
        slot("variation_current_year", 4),
        slot("variation_1_year_ago", 5),
        slot("variation_2_years_ago", 6),
        slot("variation_3_years_ago", 7),
        slot("variation_4_years_ago", 8),
        slot("variation_5_years_ago", 9),
    ],
};

pub(crate) const VALUATION_INDICATORS: BlockSchema = BlockSchema {
    name: "valuation_indicators",
    locator: Locator::Frame(4),
    shape: FieldShape::Titled,
    fields: &[
        slot("price_divided_by_profit_title", 0),
        slot("price_divided_by_asset_value", 1),
        slot("price_divided_by_ebit", 2),
        slot("price_divided_by_net_revenue", 3),
        slot("price_divided_by_total_assets", 4),
        slot("price_divided_by_net_current_assets", 5),
        slot("dividend_yield", 6),
        slot("enterprise_value_by_ebitda", 7),
        slot("enterprise_value_by_ebit", 8),
        slot("price_by_working_capital", 9),
    ],
};

pub(crate) const PROFITABILITY_INDICATORS: BlockSchema = BlockSchema {
    name: "profitability_indicators",
    locator: Locator::Frame(5),
    shape: FieldShape::Titled,
    fields: &[
        slot("return_on_equity", 0),
        slot("return_on_invested_capital", 1),
        slot("ebit_divided_by_total_assets", 2),
        slot("net_revenue_growth_last_5_years", 3),
        slot("net_revenue_divided_by_total_assets", 4),
        slot("gross_profit_divided_by_net_revenue", 5),
        slot("ebit_divided_by_net_revenue", 6),
        slot("net_income_divided_by_net_revenue", 7),
    ],
};

pub(crate) const INDEBTEDNESS_INDICATORS: BlockSchema = BlockSchema {
    name: "indebtedness_indicators",
    locator: Locator::Frame(6),
    shape: FieldShape::Titled,
    fields: &[
        slot("current_liquidity", 0),
        slot("gross_debt_by_equity", 1),
        slot("net_debt_by_equity", 2),
        slot("net_debt_by_ebitda", 3),
        slot("equity_by_total_assets", 4),
    ],
};

// =============================================================================
// 종목 식별 (헤더)
// =============================================================================

pub(crate) const STOCK_IDENTIFICATION_BLOCK: &str = "div.header-acao";

/// (키, 표시 제목, 셀렉터)
pub(crate) const STOCK_IDENTIFICATION: &[(&str, &str, &str)] = &[
    ("code", "Código", "h1.acao-papel"),
    ("name", "Nome", "span.acao-nome"),
];

// =============================================================================
// 재무상태표
// =============================================================================

pub(crate) const BALANCE_SHEET_FRAME: Locator = Locator::Frame(7);

/// 재무상태표 레이아웃 하나의 스키마.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BalanceSheetSchema {
    pub layout: BalanceSheetLayout,
    /// 각 열의 `div.data` 개수
    pub column_len: usize,
    pub left: &'static [FieldSlot],
    pub right: &'static [FieldSlot],
}

// 금융기관 레이아웃의 위치 2/3은 해당 없음("-") 자리표시자
pub(crate) const BALANCE_SHEET_LAYOUTS: &[BalanceSheetSchema] = &[
    BalanceSheetSchema {
        layout: BalanceSheetLayout::Standard,
        column_len: 3,
        left: &[slot("total_assets", 0), slot("current_assets", 1), slot("cash", 2)],
        right: &[slot("gross_debt", 0), slot("net_debt", 1), slot("equity", 2)],
    },
    BalanceSheetSchema {
        layout: BalanceSheetLayout::FinancialInstitution,
        column_len: 4,
        left: &[slot("total_assets", 0), slot("credit_portfolio", 1)],
        right: &[slot("deposits", 0), slot("equity", 1)],
    },
];

// =============================================================================
// 손익계산서
// =============================================================================

pub(crate) const INCOME_STATEMENT_FRAME: Locator = Locator::Frame(8);

/// 행 위치 → 필드 키
pub(crate) const INCOME_STATEMENT_ROWS: &[FieldSlot] =
    &[slot("revenue", 0), slot("ebit", 1), slot("net_income", 2)];

/// 값 셀 위치
pub(crate) const TWELVE_MONTHS_CELL: usize = 0;
pub(crate) const THREE_MONTHS_CELL: usize = 1;

// =============================================================================
// 목록 페이지
// =============================================================================

pub(crate) const COMPANIES_TABLE: usize = 0;
pub(crate) const PROPERTY_FUNDS_TABLE: usize = 1;
