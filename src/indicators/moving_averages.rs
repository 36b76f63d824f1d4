/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description: 고정 크기 슬라이딩 윈도우 단순 이동평균
**/

use std::collections::VecDeque;
use rust_decimal::Decimal;
use super::Indicator;

/// 누적 합을 유지하는 단순 이동평균
///
/// 윈도우 합은 Decimal::MAX 이하여야 한다. 일별 주가 범위에서는 문제되지 않는다.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
  name: String,
  period: usize,
  values: VecDeque<Decimal>,
  sum: Decimal,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      period,
      values: VecDeque::with_capacity(period + 1),
      sum: Decimal::ZERO,
    }
  }
  
  pub fn period(&self) -> usize {
    self.period
  }
}

impl Indicator for SimpleMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }
  
  fn update(&mut self, price: Decimal) {
    // 새 가격 추가
    self.values.push_back(price);
    self.sum += price;
    
    // 윈도우를 벗어난 가격 제거
    if self.values.len() > self.period {
      if let Some(old_value) = self.values.pop_front() {
        self.sum -= old_value;
      }
    }
  }
  
  fn value(&self) -> Option<Decimal> {
    if !self.is_ready() {
      return None;
    }
    
    Some(self.sum / Decimal::from(self.period))
  }
  
  fn is_ready(&self) -> bool {
    self.period > 0 && self.values.len() >= self.period
  }
  
  fn reset(&mut self) {
    self.values.clear();
    self.sum = Decimal::ZERO;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  
  #[test]
  fn test_sma_not_ready_until_window_full() {
    let mut sma = SimpleMovingAverage::new(3);
    sma.update(dec!(10));
    sma.update(dec!(10));
    assert!(!sma.is_ready());
    assert_eq!(sma.value(), None);
    
    sma.update(dec!(13));
    assert_eq!(sma.value(), Some(dec!(11)));
  }
  
  #[test]
  fn test_sma_slides_window() {
    let mut sma = SimpleMovingAverage::new(2);
    for price in [dec!(10), dec!(12), dec!(14), dec!(8)] {
      sma.update(price);
    }
    assert_eq!(sma.value(), Some(dec!(11)));
    assert_eq!(sma.name(), "SMA-2");
  }
  
  #[test]
  fn test_sma_reset() {
    let mut sma = SimpleMovingAverage::new(1);
    sma.update(dec!(5));
    assert_eq!(sma.value(), Some(dec!(5)));
    sma.reset();
    assert!(!sma.is_ready());
  }
}
