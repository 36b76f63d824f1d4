/**
* filename : signal_types
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 하루치 크로스오버 신호
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPoint {
  pub date: NaiveDate,
  pub short_mean: Option<Decimal>,
  pub long_mean: Option<Decimal>,
  pub position_signal: u8,  // 1: 단기 > 장기, 0: 그 외 (평균 미정의 포함)
  pub signal_delta: i8,     // position_signal[t] - position_signal[t-1]
}

impl SignalPoint {
  pub fn is_golden_cross(&self) -> bool {
    self.signal_delta > 0
  }
  
  pub fn is_death_cross(&self) -> bool {
    self.signal_delta < 0
  }
  
  // 두 이동평균이 모두 정의되어 있는지
  pub fn has_means(&self) -> bool {
    self.short_mean.is_some() && self.long_mean.is_some()
  }
}
