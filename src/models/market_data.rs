use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;

/// 일별 종가 한 건 (수정 종가 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        PricePoint { date, price }
    }
}

/// 시뮬레이션 입력 검증: 비어 있지 않고, 날짜가 엄격히 증가하며, 모든 가격이 양수여야 한다.
pub fn validate_series(series: &[PricePoint]) -> Result<(), BacktestError> {
    if series.is_empty() {
        return Err(BacktestError::EmptySeries);
    }

    let mut previous: Option<NaiveDate> = None;
    for point in series {
        if point.price <= Decimal::ZERO {
            return Err(BacktestError::NonPositivePrice {
                date: point.date,
                price: point.price,
            });
        }
        if let Some(prev) = previous {
            if point.date <= prev {
                return Err(BacktestError::UnorderedSeries { date: point.date });
            }
        }
        previous = Some(point.date);
    }

    Ok(())
}
