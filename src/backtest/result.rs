use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::equity::EquityPoint;
use crate::models::trade::Trade;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_cash: Decimal,
    pub final_cash: Decimal,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl BacktestResult {
    /// 청산된 거래 (SELL, FORCED_SELL)
    pub fn completed_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| t.kind.is_exit())
    }

    /// 완료된 왕복 거래 수
    pub fn round_trip_count(&self) -> usize {
        self.completed_trades().count()
    }

    /// 최대 이익 거래
    pub fn max_profit_trade(&self) -> Option<&Trade> {
        self.completed_trades()
            .filter(|t| t.realized_profit.unwrap_or_default() > Decimal::ZERO)
            .max_by_key(|t| t.realized_profit.unwrap_or_default())
    }

    /// 최대 손실 거래
    pub fn max_loss_trade(&self) -> Option<&Trade> {
        self.completed_trades()
            .filter(|t| t.realized_profit.unwrap_or_default() < Decimal::ZERO)
            .min_by_key(|t| t.realized_profit.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trade::TradeKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> BacktestResult {
        let d = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        BacktestResult {
            initial_cash: dec!(100),
            final_cash: dec!(110),
            trades: vec![
                Trade::buy(d, dec!(10), 10, dec!(0)),
                Trade::exit(TradeKind::Sell, d, dec!(12), 10, dec!(120), d, dec!(10)),
                Trade::buy(d, dec!(12), 10, dec!(0)),
                Trade::exit(TradeKind::ForcedSell, d, dec!(11), 10, dec!(110), d, dec!(12)),
            ],
            equity_curve: vec![],
        }
    }

    #[test]
    fn test_round_trip_count() {
        assert_eq!(sample().round_trip_count(), 2);
    }

    #[test]
    fn test_extreme_trades() {
        let result = sample();
        assert_eq!(result.max_profit_trade().unwrap().realized_profit, Some(dec!(20)));
        assert_eq!(result.max_loss_trade().unwrap().realized_profit, Some(dec!(-10)));
    }
}
