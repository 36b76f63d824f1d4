use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 단일 포지션 계좌 상태.
///
/// `shares_held > 0` 이면 항상 진입 가격/일자가 존재한다 (LONG),
/// `shares_held == 0` 이면 둘 다 없다 (FLAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub cash: Decimal,
    pub shares_held: u64,
    pub open_entry_price: Option<Decimal>,
    pub open_entry_date: Option<NaiveDate>,
}

impl AccountState {
    pub fn new(cash: Decimal) -> Self {
        AccountState {
            cash,
            shares_held: 0,
            open_entry_price: None,
            open_entry_date: None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.shares_held == 0
    }

    pub fn is_long(&self) -> bool {
        self.shares_held > 0
    }

    /// 주어진 가격으로 평가한 계좌 가치
    pub fn equity_at(&self, price: Decimal) -> Decimal {
        self.cash + Decimal::from(self.shares_held) * price
    }

    /// 평가 손익 (FLAT 이면 0)
    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        match self.open_entry_price {
            Some(entry) => (price - entry) * Decimal::from(self.shares_held),
            None => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_account_is_flat() {
        let account = AccountState::new(dec!(5000));
        assert!(account.is_flat());
        assert_eq!(account.equity_at(dec!(123.45)), dec!(5000));
        assert_eq!(account.unrealized_pnl(dec!(1)), Decimal::ZERO);
    }

    #[test]
    fn test_long_account_equity() {
        let account = AccountState {
            cash: dec!(4),
            shares_held: 8,
            open_entry_price: Some(dec!(12)),
            open_entry_date: NaiveDate::from_ymd_opt(2024, 1, 4),
        };
        assert!(account.is_long());
        assert_eq!(account.equity_at(dec!(14)), dec!(116));
        assert_eq!(account.unrealized_pnl(dec!(14)), dec!(16));
    }
}
