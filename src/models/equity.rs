use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::position::AccountState;

/// 일별 계좌 평가 스냅샷
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: Decimal,
    pub cash: Decimal,
    pub shares_held: u64,
}

impl EquityPoint {
    pub fn from_account(date: NaiveDate, account: &AccountState, price: Decimal) -> Self {
        EquityPoint {
            date,
            equity: account.equity_at(price),
            cash: account.cash,
            shares_held: account.shares_held,
        }
    }
}
