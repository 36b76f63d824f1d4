//! 이동평균 윈도우 조합 병렬 탐색
//!
//! 각 조합은 독립된 엔진/계좌 상태로 실행되고 가격 시계열만 읽기 전용으로 공유한다.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backtest::engine::{BacktestEngine, EngineConfig};
use crate::backtest::performance::ReportBuilder;
use crate::error::BacktestError;
use crate::models::market_data::{validate_series, PricePoint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    pub short_window: usize,
    pub long_window: usize,
    pub final_cash: Decimal,
    pub roi_percent: Decimal,
    pub trades: usize,
    pub win_rate_percent: Decimal,
}

/// 모든 (short, long) 조합 중 short < long 인 것만 실행, ROI 내림차순 정렬
pub fn run_sweep(
    series: &[PricePoint],
    initial_cash: Decimal,
    short_windows: &[usize],
    long_windows: &[usize],
) -> Result<Vec<SweepResult>, BacktestError> {
    validate_series(series)?;

    let pairs: Vec<(usize, usize)> = short_windows
        .iter()
        .flat_map(|&s| long_windows.iter().map(move |&l| (s, l)))
        .filter(|&(s, l)| s > 0 && s < l)
        .collect();

    if pairs.is_empty() {
        return Err(BacktestError::InvalidWindow(
            "no window pair with 0 < short < long".to_string(),
        ));
    }

    log::info!("윈도우 조합 {}개 탐색 시작", pairs.len());

    let mut results = pairs
        .par_iter()
        .map(|&(short_window, long_window)| -> Result<SweepResult, BacktestError> {
            let engine = BacktestEngine::new(EngineConfig {
                initial_cash,
                short_window,
                long_window,
            })?;
            let result = engine.run(series)?;
            let completed: Vec<_> = result.completed_trades().collect();

            Ok(SweepResult {
                short_window,
                long_window,
                final_cash: result.final_cash,
                roi_percent: ReportBuilder::roi(initial_cash, result.final_cash),
                trades: completed.len(),
                win_rate_percent: ReportBuilder::win_rate(&completed),
            })
        })
        .collect::<Result<Vec<_>, BacktestError>>()?;

    results.sort_by(|a, b| {
        b.roi_percent
            .cmp(&a.roi_percent)
            .then(a.short_window.cmp(&b.short_window))
            .then(a.long_window.cmp(&b.long_window))
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn series(prices: &[i64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices.iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), Decimal::from(*p)))
            .collect()
    }

    #[test]
    fn test_sweep_skips_invalid_pairs_and_sorts_by_roi() {
        let prices = series(&[10, 10, 10, 12, 14, 15, 13, 11, 9, 9, 12, 16]);
        let results = run_sweep(&prices, dec!(100), &[1, 2, 3], &[2, 3]).unwrap();

        // (1,2) (1,3) (2,3) 만 유효
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.short_window < r.long_window));
        assert!(results.windows(2).all(|w| w[0].roi_percent >= w[1].roi_percent));
    }

    #[test]
    fn test_sweep_matches_single_run() {
        let prices = series(&[10, 10, 10, 12, 14]);
        let results = run_sweep(&prices, dec!(100), &[2], &[3]).unwrap();

        assert_eq!(results[0].final_cash, dec!(116));
        assert_eq!(results[0].trades, 1);
    }

    #[test]
    fn test_sweep_without_valid_pairs_is_error() {
        let prices = series(&[10, 11]);
        assert!(run_sweep(&prices, dec!(100), &[5], &[3]).is_err());
    }
}
