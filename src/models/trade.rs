use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::math::round_display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    Buy,
    Sell,
    ForcedSell,
}

impl TradeKind {
    /// 포지션을 닫는 거래인지 (SELL, FORCED_SELL)
    pub fn is_exit(&self) -> bool {
        matches!(self, TradeKind::Sell | TradeKind::ForcedSell)
    }
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
            TradeKind::ForcedSell => write!(f, "SELL (FORCED)"),
        }
    }
}

/// 체결 기록. 매수에는 진입 정보/실현 손익이 없고, 매도에는 항상 있다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub kind: TradeKind,
    pub date: NaiveDate,
    pub price: Decimal,
    pub shares: u64,
    pub cash_after: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realized_profit: Option<Decimal>,
}

impl Trade {
    pub fn buy(date: NaiveDate, price: Decimal, shares: u64, cash_after: Decimal) -> Self {
        Trade {
            kind: TradeKind::Buy,
            date,
            price,
            shares,
            cash_after,
            entry_date: None,
            entry_price: None,
            realized_profit: None,
        }
    }

    pub fn exit(
        kind: TradeKind,
        date: NaiveDate,
        price: Decimal,
        shares: u64,
        cash_after: Decimal,
        entry_date: NaiveDate,
        entry_price: Decimal,
    ) -> Self {
        let realized_profit = (price - entry_price) * Decimal::from(shares);
        Trade {
            kind,
            date,
            price,
            shares,
            cash_after,
            entry_date: Some(entry_date),
            entry_price: Some(entry_price),
            realized_profit: Some(realized_profit),
        }
    }

    /// 출력용 사본 (금액 필드 소수점 2자리)
    pub fn for_display(&self) -> Trade {
        Trade {
            kind: self.kind,
            date: self.date,
            price: round_display(self.price),
            shares: self.shares,
            cash_after: round_display(self.cash_after),
            entry_date: self.entry_date,
            entry_price: self.entry_price.map(round_display),
            realized_profit: self.realized_profit.map(round_display),
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.for_display();
        write!(
            f,
            "{:<13} {} price={:.2} shares={} cash_after={:.2}",
            t.kind.to_string(),
            t.date,
            t.price,
            t.shares,
            t.cash_after
        )?;
        if let (Some(entry_date), Some(entry_price), Some(profit)) =
            (t.entry_date, t.entry_price, t.realized_profit)
        {
            write!(f, " entry={} @ {:.2} profit={:.2}", entry_date, entry_price, profit)?;
        }
        Ok(())
    }
}
