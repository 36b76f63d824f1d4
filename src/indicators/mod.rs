/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 가격 시계열 지표
**/
pub mod moving_averages;

pub use moving_averages::*;

use std::fmt::Debug;
use rust_decimal::Decimal;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;
  
  // 새로운 가격으로 지표 업데이트
  fn update(&mut self, price: Decimal);
  
  // 현재 지표 값 반환 (데이터가 부족하면 None)
  fn value(&self) -> Option<Decimal>;
  
  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool;
  
  // 지표 상태 리셋
  fn reset(&mut self);
}
