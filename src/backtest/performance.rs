/**
* filename : performance
* author : HAMA
* date: 2025. 5. 11.
* description: 거래 로그/자산 곡선 요약 지표
**/

use std::fmt;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::equity::EquityPoint;
use crate::models::trade::Trade;
use crate::utils::math::{percent_change, percentage, round_display};
use super::result::BacktestResult;

/// 백테스트 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSummary {
  pub symbol: String,
  pub start: NaiveDate,
  pub end: NaiveDate,
  pub initial_budget: Decimal,
  pub final_cash: Decimal,
  pub total_profit: Decimal,
  pub roi_percent: Decimal,
  pub trades: usize,
  pub win_rate_percent: Decimal,
  pub max_drawdown_percent: Decimal,
}

impl PerformanceSummary {
  /// 출력용 사본 (금액/비율 소수점 2자리)
  pub fn for_display(&self) -> PerformanceSummary {
    PerformanceSummary {
      symbol: self.symbol.clone(),
      start: self.start,
      end: self.end,
      initial_budget: round_display(self.initial_budget),
      final_cash: round_display(self.final_cash),
      total_profit: round_display(self.total_profit),
      roi_percent: round_display(self.roi_percent),
      trades: self.trades,
      win_rate_percent: round_display(self.win_rate_percent),
      max_drawdown_percent: round_display(self.max_drawdown_percent),
    }
  }
}

impl fmt::Display for PerformanceSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = self.for_display();
    writeln!(f, "===== SMA CROSSOVER BACKTEST REPORT =====")?;
    writeln!(f, "Symbol: {}", s.symbol)?;
    writeln!(f, "Start: {}", s.start)?;
    writeln!(f, "End: {}", s.end)?;
    writeln!(f, "Initial Budget: {:.2}", s.initial_budget)?;
    writeln!(f, "Final Cash: {:.2}", s.final_cash)?;
    writeln!(f, "Total Profit: {:.2}", s.total_profit)?;
    writeln!(f, "ROI (%): {:.2}", s.roi_percent)?;
    writeln!(f, "Trades: {}", s.trades)?;
    writeln!(f, "Win Rate (%): {:.2}", s.win_rate_percent)?;
    write!(f, "Max Drawdown (%): {:.2}", s.max_drawdown_percent)
  }
}

/// 요약 지표 계산 유틸리티
pub struct ReportBuilder;

impl ReportBuilder {
  pub fn build(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    result: &BacktestResult,
  ) -> PerformanceSummary {
    let completed: Vec<&Trade> = result.completed_trades().collect();

    PerformanceSummary {
      symbol: symbol.to_string(),
      start,
      end,
      initial_budget: result.initial_cash,
      final_cash: result.final_cash,
      total_profit: Self::total_profit(&completed),
      roi_percent: Self::roi(result.initial_cash, result.final_cash),
      trades: completed.len(),
      win_rate_percent: Self::win_rate(&completed),
      max_drawdown_percent: Self::max_drawdown(&result.equity_curve),
    }
  }

  /// 실현 손익 합계
  pub fn total_profit(completed: &[&Trade]) -> Decimal {
    completed.iter()
      .filter_map(|t| t.realized_profit)
      .sum()
  }

  /// 승률 (%). 완료된 거래가 없으면 0
  pub fn win_rate(completed: &[&Trade]) -> Decimal {
    let wins = completed.iter()
      .filter(|t| t.realized_profit.map_or(false, |p| p > Decimal::ZERO))
      .count();

    percentage(wins, completed.len())
  }

  /// 투자 수익률 (%)
  pub fn roi(initial_budget: Decimal, final_cash: Decimal) -> Decimal {
    percent_change(initial_budget, final_cash)
  }

  /// 자산 곡선 기준 최대 손실폭 (%)
  pub fn max_drawdown(equity_curve: &[EquityPoint]) -> Decimal {
    let mut max_drawdown = Decimal::ZERO;
    let mut peak = Decimal::ZERO;

    for point in equity_curve {
      if point.equity > peak {
        peak = point.equity;
      } else if peak > Decimal::ZERO {
        let drawdown = (peak - point.equity) / peak * Decimal::ONE_HUNDRED;
        max_drawdown = max_drawdown.max(drawdown);
      }
    }

    max_drawdown
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::trade::TradeKind;
  use rust_decimal_macros::dec;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
  }

  fn equity(d: u32, value: Decimal) -> EquityPoint {
    EquityPoint { date: day(d), equity: value, cash: value, shares_held: 0 }
  }

  #[test]
  fn test_summary_with_mixed_trades() {
    let result = BacktestResult {
      initial_cash: dec!(1000),
      final_cash: dec!(1050),
      trades: vec![
        Trade::buy(day(1), dec!(10), 100, dec!(0)),
        Trade::exit(TradeKind::Sell, day(2), dec!(11), 100, dec!(1100), day(1), dec!(10)),
        Trade::buy(day(3), dec!(11), 100, dec!(0)),
        Trade::exit(TradeKind::ForcedSell, day(4), dec!(10.5), 100, dec!(1050), day(3), dec!(11)),
      ],
      equity_curve: vec![],
    };

    let summary = ReportBuilder::build("TEST", day(1), day(5), &result);
    assert_eq!(summary.total_profit, dec!(50));
    assert_eq!(summary.trades, 2);
    assert_eq!(summary.win_rate_percent, dec!(50));
    assert_eq!(summary.roi_percent, dec!(5));
  }

  #[test]
  fn test_win_rate_is_zero_without_completed_trades() {
    assert_eq!(ReportBuilder::win_rate(&[]), Decimal::ZERO);
  }

  #[test]
  fn test_max_drawdown() {
    let curve = vec![
      equity(1, dec!(100)),
      equity(2, dec!(120)),
      equity(3, dec!(90)),
      equity(4, dec!(130)),
      equity(5, dec!(117)),
    ];
    assert_eq!(ReportBuilder::max_drawdown(&curve), dec!(25));
    assert_eq!(ReportBuilder::max_drawdown(&[]), Decimal::ZERO);
  }

  #[test]
  fn test_display_rounds_values() {
    let summary = PerformanceSummary {
      symbol: "AAPL".to_string(),
      start: day(1),
      end: day(31),
      initial_budget: dec!(5000),
      final_cash: dec!(5123.456),
      total_profit: dec!(123.456),
      roi_percent: dec!(2.46912),
      trades: 3,
      win_rate_percent: dec!(66.666666),
      max_drawdown_percent: dec!(0),
    };
    let text = summary.to_string();
    assert!(text.contains("Final Cash: 5123.46"));
    assert!(text.contains("ROI (%): 2.47"));
    assert!(text.contains("Win Rate (%): 66.67"));
  }
}
