//! Binance wire types.
//!
//! Decimal fields arrive as strings (`"0.00000100"`); `rust_decimal` keeps
//! their scale, which precision inference depends on.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::Deserialize;
use tracing::warn;

use crate::domain::instrument::{
    tags, Constraint, LotSizeConstraint, NotionalConstraint, PriceConstraint,
};
use crate::domain::{Instrument, NetworkRecord, SourceCurrency};

/// `GET /api/v3/exchangeInfo` response.
///
/// Symbols stay undecoded until [`ExchangeInfo::instruments`] so that one
/// malformed entry cannot fail the whole listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<serde_json::Value>,
}

impl ExchangeInfo {
    /// Decode every symbol, skipping entries that are not valid `SymbolInfo`.
    #[must_use]
    pub fn instruments(self) -> Vec<Instrument> {
        self.symbols
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<SymbolInfo>(raw) {
                Ok(info) => Some(Instrument::from(info)),
                Err(error) => {
                    warn!(%error, "Skipping undecodable symbol");
                    None
                }
            })
            .collect()
    }
}

/// One trading pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub quote_precision: u32,
    #[serde(default)]
    pub filters: Vec<FilterInfo>,
}

/// A trading rule, discriminated by `filterType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInfo {
    pub filter_type: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub tick_size: Option<Decimal>,
    pub min_qty: Option<Decimal>,
    pub min_notional: Option<Decimal>,
}

/// `GET /api/v3/ticker/price?symbol=...` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// `GET /sapi/v1/capital/config/getall` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub coin: String,
    #[serde(default)]
    pub network_list: Vec<NetworkInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub network: String,
    pub withdraw_fee: Decimal,
    pub withdraw_min: Decimal,
}

fn required(value: Option<Decimal>, field: &'static str) -> Result<Decimal, serde_json::Error> {
    value.ok_or_else(|| serde_json::Error::missing_field(field))
}

impl TryFrom<FilterInfo> for Constraint {
    type Error = serde_json::Error;

    fn try_from(filter: FilterInfo) -> Result<Self, Self::Error> {
        let constraint = match filter.filter_type.as_str() {
            tags::PRICE_FILTER => Constraint::Price(PriceConstraint {
                min_price: required(filter.min_price, "minPrice")?,
                max_price: required(filter.max_price, "maxPrice")?,
                tick_size: required(filter.tick_size, "tickSize")?,
            }),
            tags::LOT_SIZE => Constraint::LotSize(LotSizeConstraint {
                min_quantity: required(filter.min_qty, "minQty")?,
            }),
            tags::MIN_NOTIONAL => Constraint::MinNotional(NotionalConstraint {
                min_notional: required(filter.min_notional, "minNotional")?,
            }),
            tags::NOTIONAL => Constraint::Notional(NotionalConstraint {
                min_notional: required(filter.min_notional, "minNotional")?,
            }),
            _ => Constraint::Other {
                tag: filter.filter_type,
            },
        };
        Ok(constraint)
    }
}

/// A filter that fails to convert is left out, so the instrument surfaces
/// `ConstraintMissing` for that tag when it is reconciled and the rest of
/// the listing is unaffected.
impl From<SymbolInfo> for Instrument {
    fn from(info: SymbolInfo) -> Self {
        let symbol = info.symbol;
        let constraints = info
            .filters
            .into_iter()
            .filter_map(|filter| {
                let tag = filter.filter_type.clone();
                match Constraint::try_from(filter) {
                    Ok(constraint) => Some(constraint),
                    Err(error) => {
                        warn!(symbol = %symbol, tag = %tag, %error, "Dropping malformed filter");
                        None
                    }
                }
            })
            .collect();
        Instrument::new(
            symbol,
            info.base_asset,
            info.quote_asset,
            info.quote_precision,
            constraints,
        )
    }
}

impl From<CoinInfo> for SourceCurrency {
    fn from(coin: CoinInfo) -> Self {
        let networks = coin
            .network_list
            .into_iter()
            .map(|n| NetworkRecord::new(n.network, n.withdraw_fee, n.withdraw_min))
            .collect();
        SourceCurrency::new(coin.coin, networks)
    }
}
