//! 공용 유틸리티
//!
//! 로깅 초기화와 금액/수량 계산 함수 제공

pub mod logging;
pub mod math;
