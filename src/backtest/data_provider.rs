use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::BacktestError;
use crate::models::market_data::PricePoint;

/// 과거 일별 가격 제공자
#[cfg_attr(test, mockall::automock)]
pub trait HistoricalDataProvider {
    /// `start <= date < end` 구간의 정제된 가격 시계열 반환
    fn load_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, BacktestError>;
}

/// 단일 종목 CSV 파일 제공자
///
/// 날짜 열(`Date`)과 종가 열을 읽는다. 수정 종가(`Adj Close`/`adj_close`) 열이 있으면
/// 그것을, 없으면 `Close` 열을 쓴다. 그 외 열은 무시한다.
pub struct CsvDataProvider {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDataProvider {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Result<Self, BacktestError> {
        if !delimiter.is_ascii() {
            return Err(BacktestError::InvalidParameter(format!(
                "CSV delimiter must be ASCII, got {:?}",
                delimiter
            )));
        }

        Ok(Self { path: path.into(), delimiter: delimiter as u8 })
    }
}

impl HistoricalDataProvider for CsvDataProvider {
    fn load_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, BacktestError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = rdr.headers()?.clone();
        let date_idx = find_column(&headers, DATE_COLUMNS).ok_or_else(|| {
            BacktestError::ParseError(format!("no date column in {}", self.path.display()))
        })?;
        let price_idx = find_column(&headers, PRICE_COLUMNS).ok_or_else(|| {
            BacktestError::ParseError(format!("no close price column in {}", self.path.display()))
        })?;

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let record = rec?;
            let date = parse_date(record.get(date_idx).unwrap_or_default())?;
            let price = match record.get(price_idx) {
                Some(raw) if !raw.is_empty() => Some(parse_price(raw)?),
                _ => None,
            };
            rows.push((date, price));
        }

        let series = clean_series(rows, start, end);
        if series.is_empty() {
            return Err(BacktestError::DataNotFound(format!(
                "No data returned for {} between {} and {} in {}",
                symbol,
                start,
                end,
                self.path.display()
            )));
        }

        log::info!("{} 가격 데이터 {}건 로드 ({})", symbol, series.len(), self.path.display());
        Ok(series)
    }
}

/// 원시 행 정제: 구간 필터 (end 미포함), 날짜 정렬, 중복 날짜는 첫 행 유지,
/// 빈 가격은 직전 가격으로 채움. 앞부분의 채울 수 없는 행은 버린다.
pub fn clean_series(
    mut rows: Vec<(NaiveDate, Option<Decimal>)>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PricePoint> {
    rows.retain(|(date, _)| *date >= start && *date < end);

    // 안정 정렬이라 같은 날짜는 파일 순서 유지
    rows.sort_by_key(|(date, _)| *date);
    rows.dedup_by_key(|(date, _)| *date);

    let mut last_price: Option<Decimal> = None;
    let mut series = Vec::with_capacity(rows.len());
    for (date, price) in rows {
        if let Some(price) = price.or(last_price) {
            last_price = Some(price);
            series.push(PricePoint::new(date, price));
        }
    }

    series
}

// 수정 종가 우선
const PRICE_COLUMNS: &[&str] = &["adj_close", "adj close", "close"];
const DATE_COLUMNS: &[&str] = &["date", "datetime"];

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|name| {
        headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, BacktestError> {
    // "2018-01-02 00:00:00" 같은 타임스탬프 형식도 허용
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| BacktestError::ParseError(format!("invalid date {:?}: {}", raw, e)))
}

fn parse_price(raw: &str) -> Result<Decimal, BacktestError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| BacktestError::ParseError(format!("invalid price {:?}: {}", raw, e)))
}
