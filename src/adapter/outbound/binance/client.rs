//! Binance REST API client.
//!
//! Read-only: exchange metadata, ticker prices and coin withdrawal
//! parameters. The API key travels in the `X-MBX-APIKEY` header when
//! configured. The coin listing is a signed endpoint: it carries a
//! `timestamp` and its HMAC-SHA256 `signature` under the API secret.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, RequestBuilder};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::{CoinInfo, ExchangeInfo, TickerPrice};
use crate::adapter::outbound::http::{build_client, endpoint_url, read_json};
use crate::adapter::outbound::signing::{millis, sign_hex};
use crate::domain::{parse_price, Instrument, SourceCurrency};
use crate::error::Result;
use crate::infrastructure::config::{Credentials, SourceVenueConfig};
use crate::port::outbound::venue::SourceVenue;

const VENUE: &str = "Binance";

pub const EXCHANGE_INFO_ENDPOINT: &str = "/api/v3/exchangeInfo";
pub const TICKER_PRICE_ENDPOINT: &str = "/api/v3/ticker/price";
pub const COINS_ENDPOINT: &str = "/sapi/v1/capital/config/getall";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client for the Binance REST API.
pub struct BinanceClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
}

impl BinanceClient {
    /// Create a client with default HTTP settings and no credentials.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            credentials: Credentials::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SourceVenueConfig) -> Self {
        Self {
            http: build_client(&config.http),
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
        }
    }

    /// Use `credentials` for subsequent requests.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// `url` with `timestamp` and `signature` appended.
    ///
    /// Without a secret the URL goes out unsigned and the venue decides.
    fn signed(&self, mut url: Url, at: DateTime<Utc>) -> Result<Url> {
        let Some(secret) = self.credentials.secret.as_deref().filter(|s| !s.is_empty()) else {
            warn!(venue = VENUE, url = %url, "No API secret, sending unsigned request");
            return Ok(url);
        };
        url.query_pairs_mut().append_pair("timestamp", &millis(at).to_string());
        let payload = url.query().unwrap_or_default().to_string();
        let signature = sign_hex(secret, &payload)?;
        url.query_pairs_mut().append_pair("signature", &signature);
        Ok(url)
    }

    async fn get<T>(&self, endpoint: &str, url: Url) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        info!(venue = VENUE, url = %url, "Fetching");
        let response = self.authorize(self.http.get(url)).send().await?;
        read_json(VENUE, endpoint, response).await
    }

    /// Fetch raw exchange metadata.
    pub async fn exchange_info(&self) -> Result<ExchangeInfo> {
        let url = Url::parse(&endpoint_url(&self.base_url, EXCHANGE_INFO_ENDPOINT))?;
        let info: ExchangeInfo = self.get(EXCHANGE_INFO_ENDPOINT, url).await?;
        debug!(venue = VENUE, count = info.symbols.len(), "Fetched symbols");
        Ok(info)
    }

    /// Fetch the raw ticker for one symbol.
    pub async fn ticker(&self, symbol: &str) -> Result<TickerPrice> {
        let url = Url::parse_with_params(
            &endpoint_url(&self.base_url, TICKER_PRICE_ENDPOINT),
            &[("symbol", symbol)],
        )?;
        self.get(TICKER_PRICE_ENDPOINT, url).await
    }

    /// Fetch raw coin configuration.
    pub async fn coins(&self) -> Result<Vec<CoinInfo>> {
        let url = Url::parse(&endpoint_url(&self.base_url, COINS_ENDPOINT))?;
        let url = self.signed(url, Utc::now())?;
        let coins: Vec<CoinInfo> = self.get(COINS_ENDPOINT, url).await?;
        debug!(venue = VENUE, count = coins.len(), "Fetched coins");
        Ok(coins)
    }
}

#[async_trait]
impl SourceVenue for BinanceClient {
    async fn instruments(&self) -> Result<Vec<Instrument>> {
        let info = self.exchange_info().await?;
        Ok(info.instruments())
    }

    async fn currencies(&self) -> Result<Vec<SourceCurrency>> {
        let coins = self.coins().await?;
        Ok(coins.into_iter().map(SourceCurrency::from).collect())
    }

    async fn ticker_price(&self, symbol: &str) -> Result<Decimal> {
        let ticker = self.ticker(symbol).await?;
        Ok(parse_price(symbol, &ticker.price)?)
    }

    fn venue_name(&self) -> &'static str {
        VENUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::HttpConfig;
    use chrono::TimeZone;

    fn credentials(secret: Option<&str>) -> Credentials {
        Credentials {
            api_key: Some("key".into()),
            secret: secret.map(Into::into),
        }
    }

    #[test]
    fn client_reports_venue_name() {
        let client = BinanceClient::new("https://api.binance.com");
        assert_eq!(client.venue_name(), "Binance");
    }

    #[test]
    fn from_config_takes_credentials() {
        let config = SourceVenueConfig {
            base_url: "https://api.binance.com".into(),
            http: HttpConfig::default(),
            credentials: credentials(Some("secret")),
        };
        let client = BinanceClient::from_config(&config);
        assert_eq!(client.credentials, credentials(Some("secret")));
        assert_eq!(client.base_url, "https://api.binance.com");
    }

    #[test]
    fn authorize_sets_header_only_with_key() {
        let client =
            BinanceClient::new("https://api.binance.com").with_credentials(credentials(None));
        let request = client
            .authorize(client.http.get("https://api.binance.com/"))
            .build()
            .unwrap();
        assert_eq!(request.headers().get(API_KEY_HEADER).unwrap(), "key");

        let anonymous = BinanceClient::new("https://api.binance.com");
        let request = anonymous
            .authorize(anonymous.http.get("https://api.binance.com/"))
            .build()
            .unwrap();
        assert!(request.headers().get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn coin_listing_is_signed_with_the_secret() {
        let client = BinanceClient::new("https://api.binance.com")
            .with_credentials(credentials(Some("secret")));
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let url = Url::parse(&endpoint_url(&client.base_url, COINS_ENDPOINT)).unwrap();

        let signed = client.signed(url, at).unwrap();

        let expected = sign_hex("secret", "timestamp=1709294400000").unwrap();
        assert_eq!(
            signed.as_str(),
            format!(
                "https://api.binance.com/sapi/v1/capital/config/getall\
                 ?timestamp=1709294400000&signature={expected}"
            )
        );
    }

    #[test]
    fn coin_listing_without_secret_goes_unsigned() {
        let client =
            BinanceClient::new("https://api.binance.com").with_credentials(credentials(None));
        let url = Url::parse(&endpoint_url(&client.base_url, COINS_ENDPOINT)).unwrap();

        let unsigned = client.signed(url.clone(), Utc::now()).unwrap();

        assert_eq!(unsigned, url);
    }
}
