//! 수학 관련 유틸리티
//!
//! 주식 수량 계산, 표시용 반올림, 비율 계산 함수 제공

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 표시용 소수점 자릿수
pub const DISPLAY_DP: u32 = 2;

/// 표시용 반올림 (소수점 2자리, 은행가 반올림)
///
/// 내부 누적 계산에는 절대 사용하지 않는다.
pub fn round_display(value: Decimal) -> Decimal {
  value.round_dp(DISPLAY_DP)
}

/// 현금으로 살 수 있는 최대 정수 주식 수 (내림)
///
/// 몫이 Decimal 범위나 u64 범위를 넘으면 u64::MAX 로 제한한다.
pub fn affordable_shares(cash: Decimal, price: Decimal) -> u64 {
  if price <= Decimal::ZERO || cash <= Decimal::ZERO {
    return 0;
  }

  let mut shares = cash
    .checked_div(price)
    .and_then(|q| q.floor().to_u64())
    .unwrap_or(u64::MAX);

  // 나눗셈 정밀도 한계로 올림된 경우 보정
  while shares > 0 && Decimal::from(shares) * price > cash {
    shares -= 1;
  }

  shares
}

/// 백분율 변화 ((to - from) / from * 100). from 이 0 이면 0
pub fn percent_change(from: Decimal, to: Decimal) -> Decimal {
  if from.is_zero() {
    return Decimal::ZERO;
  }

  (to - from) / from * Decimal::ONE_HUNDRED
}

/// 비율 (part / whole * 100). whole 이 0 이면 0
pub fn percentage(part: usize, whole: usize) -> Decimal {
  if whole == 0 {
    return Decimal::ZERO;
  }

  Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED
}
