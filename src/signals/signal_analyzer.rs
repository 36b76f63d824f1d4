/**
* filename : signal_analyzer
* author : HAMA
* date: 2025. 5. 11.
* description: 단기/장기 SMA 크로스오버 신호 계산
**/

use crate::error::BacktestError;
use crate::indicators::{Indicator, SimpleMovingAverage};
use crate::models::market_data::PricePoint;
use super::signal_types::SignalPoint;

/// 이동평균 윈도우 검증: 둘 다 양수이고 short < long
pub fn validate_windows(short_window: usize, long_window: usize) -> Result<(), BacktestError> {
  if short_window == 0 || long_window == 0 {
    return Err(BacktestError::InvalidWindow(format!(
      "window sizes must be positive (short={}, long={})",
      short_window, long_window
    )));
  }
  
  if short_window >= long_window {
    return Err(BacktestError::InvalidWindow(format!(
      "short window {} must be less than long window {}",
      short_window, long_window
    )));
  }
  
  Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct SignalComputer {
  short_window: usize,
  long_window: usize,
}

impl SignalComputer {
  pub fn new(short_window: usize, long_window: usize) -> Result<Self, BacktestError> {
    validate_windows(short_window, long_window)?;
    
    Ok(SignalComputer {
      short_window,
      long_window,
    })
  }
  
  pub fn short_window(&self) -> usize {
    self.short_window
  }
  
  pub fn long_window(&self) -> usize {
    self.long_window
  }
  
  /// 가격 시계열 전체에 대한 신호 계산 (입력과 1:1, 같은 순서)
  pub fn compute(&self, series: &[PricePoint]) -> Vec<SignalPoint> {
    let mut short_ma = SimpleMovingAverage::new(self.short_window);
    let mut long_ma = SimpleMovingAverage::new(self.long_window);
    let mut signals = Vec::with_capacity(series.len());
    let mut previous_signal: Option<u8> = None;
    
    for point in series {
      short_ma.update(point.price);
      long_ma.update(point.price);
      
      let short_mean = short_ma.value();
      let long_mean = long_ma.value();
      
      // 평균 중 하나라도 없으면 신호 없음(0)
      let position_signal = match (short_mean, long_mean) {
        (Some(s), Some(l)) if s > l => 1,
        _ => 0,
      };
      
      // 첫 행은 이전 값이 없으므로 0
      let signal_delta = match previous_signal {
        Some(prev) => position_signal as i8 - prev as i8,
        None => 0,
      };
      previous_signal = Some(position_signal);
      
      signals.push(SignalPoint {
        date: point.date,
        short_mean,
        long_mean,
        position_signal,
        signal_delta,
      });
    }
    
    signals
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, NaiveDate};
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;
  
  fn series(prices: &[Decimal]) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    prices.iter()
      .enumerate()
      .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), *p))
      .collect()
  }
  
  #[test]
  fn test_rejects_bad_windows() {
    assert!(SignalComputer::new(3, 3).is_err());
    assert!(SignalComputer::new(5, 2).is_err());
    assert!(SignalComputer::new(0, 2).is_err());
    assert!(SignalComputer::new(2, 3).is_ok());
  }
  
  #[test]
  fn test_crossover_signals() {
    let prices = [10, 10, 10, 12, 12, 12, 8, 8, 8].map(Decimal::from);
    let signals = SignalComputer::new(2, 3).unwrap().compute(&series(&prices));
    
    let positions: Vec<u8> = signals.iter().map(|s| s.position_signal).collect();
    let deltas: Vec<i8> = signals.iter().map(|s| s.signal_delta).collect();
    
    assert_eq!(positions, vec![0, 0, 0, 1, 1, 0, 0, 0, 0]);
    assert_eq!(deltas, vec![0, 0, 0, 1, 0, -1, 0, 0, 0]);
    
    assert_eq!(signals[0].short_mean, None);
    assert_eq!(signals[1].short_mean, Some(dec!(10)));
    assert_eq!(signals[1].long_mean, None);
    assert_eq!(signals[3].short_mean, Some(dec!(11)));
    assert!(signals[2].has_means());
  }
  
  #[test]
  fn test_short_series_never_signals() {
    let prices = [1, 2, 3, 4].map(Decimal::from);
    let signals = SignalComputer::new(2, 5).unwrap().compute(&series(&prices));
    
    assert_eq!(signals.len(), 4);
    assert!(signals.iter().all(|s| s.long_mean.is_none()));
    assert!(signals.iter().all(|s| s.position_signal == 0 && s.signal_delta == 0));
  }
  
  #[test]
  fn test_first_delta_is_zero_even_when_signal_is_on() {
    // long=2 이면 두 번째 행부터 평균이 정의됨; 첫 행은 항상 0
    let prices = [5, 6, 7].map(Decimal::from);
    let signals = SignalComputer::new(1, 2).unwrap().compute(&series(&prices));
    
    assert_eq!(signals[0].signal_delta, 0);
    assert_eq!(signals[1].position_signal, 1);
    assert_eq!(signals[1].signal_delta, 1);
  }
}
