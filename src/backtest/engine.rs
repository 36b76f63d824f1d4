use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;
use crate::models::equity::EquityPoint;
use crate::models::market_data::{validate_series, PricePoint};
use crate::models::position::AccountState;
use crate::models::trade::{Trade, TradeKind};
use crate::signals::{validate_windows, SignalComputer, SignalPoint};
use crate::utils::math::affordable_shares;
use super::result::BacktestResult;

/// 엔진 생성 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_cash: Decimal,
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            initial_cash: Decimal::new(500000, 2),
            short_window: 50,
            long_window: 200,
        }
    }
}

/// 백테스트 엔진 - 단일 포지션, 롱 전용, 진입 시 전액 투자 계좌 시뮬레이션
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    initial_cash: Decimal,
    signal_computer: SignalComputer,
}

impl BacktestEngine {
    /// 새로운 백테스트 엔진 생성
    pub fn new(config: EngineConfig) -> Result<Self, BacktestError> {
        validate_windows(config.short_window, config.long_window)?;

        if config.initial_cash <= Decimal::ZERO {
            return Err(BacktestError::InvalidParameter(format!(
                "initial cash must be positive, got {}",
                config.initial_cash
            )));
        }

        Ok(BacktestEngine {
            initial_cash: config.initial_cash,
            signal_computer: SignalComputer::new(config.short_window, config.long_window)?,
        })
    }

    pub fn initial_cash(&self) -> Decimal {
        self.initial_cash
    }

    pub fn signal_computer(&self) -> &SignalComputer {
        &self.signal_computer
    }

    /// 가격 시계열 검증 -> 신호 계산 -> 시뮬레이션
    pub fn run(&self, series: &[PricePoint]) -> Result<BacktestResult, BacktestError> {
        validate_series(series)?;
        let signals = self.signal_computer.compute(series);
        self.simulate(series, &signals)
    }

    /// 이미 계산된 신호로 시뮬레이션 실행
    ///
    /// `signals` 는 `series` 와 같은 길이, 같은 날짜 순서여야 한다.
    pub fn simulate(
        &self,
        series: &[PricePoint],
        signals: &[SignalPoint],
    ) -> Result<BacktestResult, BacktestError> {
        validate_series(series)?;

        if series.len() != signals.len() {
            return Err(BacktestError::InvalidParameter(format!(
                "{} prices but {} signals",
                series.len(),
                signals.len()
            )));
        }

        if let Some((point, signal)) = series.iter().zip(signals).find(|(p, s)| p.date != s.date) {
            return Err(BacktestError::InvalidParameter(format!(
                "signal date {} does not match price date {}",
                signal.date, point.date
            )));
        }

        let mut account = AccountState::new(self.initial_cash);
        let mut trades = Vec::new();
        let mut equity_curve = Vec::with_capacity(series.len() + 1);

        for (point, signal) in series.iter().zip(signals) {
            let (next, trade) = step(account, point, signal);
            account = next;

            if let Some(trade) = trade {
                log::debug!(
                    "{} {} - {}주 @ {} (현금 {})",
                    trade.kind, trade.date, trade.shares, trade.price, trade.cash_after
                );
                trades.push(trade);
            }

            equity_curve.push(EquityPoint::from_account(point.date, &account, point.price));
        }

        // 시계열 종료 시 미청산 포지션 강제 청산
        if let Some(last) = series.last() {
            let (next, trade) = liquidate(account, last);
            account = next;

            if let Some(trade) = trade {
                log::debug!(
                    "{} {} - {}주 @ {} (현금 {})",
                    trade.kind, trade.date, trade.shares, trade.price, trade.cash_after
                );
                trades.push(trade);
                equity_curve.push(EquityPoint::from_account(last.date, &account, last.price));
            }
        }

        Ok(BacktestResult {
            initial_cash: self.initial_cash,
            final_cash: account.cash,
            trades,
            equity_curve,
        })
    }
}

/// 한 행에 대한 상태 전이
///
/// FLAT + 골든크로스 -> 살 수 있는 최대 정수 주식 매수 (0주면 무시),
/// LONG + 데드크로스 -> 전량 매도. 그 외는 상태 유지.
pub fn step(
    account: AccountState,
    point: &PricePoint,
    signal: &SignalPoint,
) -> (AccountState, Option<Trade>) {
    if signal.is_golden_cross() && account.is_flat() {
        let shares = affordable_shares(account.cash, point.price);
        if shares == 0 {
            log::trace!(
                "{} 매수 신호 무시: 현금 {} < 가격 {}",
                point.date, account.cash, point.price
            );
            return (account, None);
        }

        let cash = account.cash - Decimal::from(shares) * point.price;
        let next = AccountState {
            cash,
            shares_held: shares,
            open_entry_price: Some(point.price),
            open_entry_date: Some(point.date),
        };

        return (next, Some(Trade::buy(point.date, point.price, shares, cash)));
    }

    if signal.is_death_cross() && account.is_long() {
        return close_position(account, point, TradeKind::Sell);
    }

    (account, None)
}

/// 열린 포지션을 마지막 가격으로 강제 청산 (FLAT 이면 그대로)
pub fn liquidate(account: AccountState, last: &PricePoint) -> (AccountState, Option<Trade>) {
    if account.is_flat() {
        return (account, None);
    }

    close_position(account, last, TradeKind::ForcedSell)
}

fn close_position(
    account: AccountState,
    point: &PricePoint,
    kind: TradeKind,
) -> (AccountState, Option<Trade>) {
    let (entry_price, entry_date) = match (account.open_entry_price, account.open_entry_date) {
        (Some(price), Some(date)) => (price, date),
        _ => {
            // 진입 정보 없는 LONG 상태: 청산가를 진입가로 보고 포지션은 반드시 닫는다
            log::error!(
                "{} 진입 정보 없는 보유 {}주 청산 (손익 0 처리)",
                point.date, account.shares_held
            );
            (point.price, point.date)
        }
    };

    let shares = account.shares_held;
    let cash = account.cash + Decimal::from(shares) * point.price;
    let trade = Trade::exit(kind, point.date, point.price, shares, cash, entry_date, entry_price);

    (AccountState::new(cash), Some(trade))
}
