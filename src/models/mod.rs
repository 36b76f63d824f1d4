pub mod equity;
pub mod market_data;
pub mod position;
pub mod trade;

pub use equity::EquityPoint;
pub use market_data::PricePoint;
pub use position::AccountState;
pub use trade::{Trade, TradeKind};
