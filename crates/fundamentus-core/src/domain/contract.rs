//! 단계 간 전달 봉투.
//!
//! 추출일은 서기 1년 1월 1일을 1로 하는 그레고리력 서수(ordinal day)입니다.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// 날짜를 서수로 변환합니다.
pub fn ordinal_day(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

/// 오늘 날짜의 서수.
pub fn today_ordinal() -> i32 {
    ordinal_day(Local::now().date_naive())
}

/// 추출 결과 봉투.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractContract<T> {
    pub raw_information: T,
    pub extraction_date: i32,
}

impl<T> ExtractContract<T> {
    /// 오늘 날짜로 봉투를 생성합니다.
    pub fn new(raw_information: T) -> Self {
        Self::with_date(raw_information, today_ordinal())
    }

    pub fn with_date(raw_information: T, extraction_date: i32) -> Self {
        Self {
            raw_information,
            extraction_date,
        }
    }

    /// 추출일을 날짜로 반환합니다.
    pub fn extraction_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.extraction_date)
    }
}

/// 변환 결과 봉투.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformContract<T> {
    pub transformed_information: T,
    pub extraction_date: i32,
}

impl<T> TransformContract<T> {
    pub fn new(transformed_information: T, extraction_date: i32) -> Self {
        Self {
            transformed_information,
            extraction_date,
        }
    }

    /// 추출일을 날짜로 반환합니다.
    pub fn extraction_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.extraction_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_day_epoch() {
        let first_day = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(ordinal_day(first_day), 1);

        // 2022-09-19 = 738417
        let pregao = NaiveDate::from_ymd_opt(2022, 9, 19).unwrap();
        assert_eq!(ordinal_day(pregao), 738_417);
    }

    #[test]
    fn test_extraction_day_round_trip() {
        let contract = ExtractContract::with_date((), 738_417);
        assert_eq!(contract.extraction_day(), NaiveDate::from_ymd_opt(2022, 9, 19));
    }

    #[test]
    fn test_new_contract_uses_today() {
        let contract = ExtractContract::new(vec!["MGLU3"]);
        assert!((today_ordinal() - contract.extraction_date).abs() <= 1);
    }
}
