//! OpenDAX REST API client.
//!
//! Public endpoints list markets and currencies; admin endpoints update a
//! market and set the matching-engine restart secret. Admin requests carry
//! the API key, a millisecond nonce and the HMAC-SHA256 of nonce plus key
//! under the API secret.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, RequestBuilder};
use tracing::{debug, info, warn};

use super::dto::{CurrencyDto, MarketDto, UpdateSecretRequest};
use crate::adapter::outbound::http::{build_client, check_status, endpoint_url, read_json};
use crate::adapter::outbound::signing::{millis, sign_hex};
use crate::domain::{MarketConfig, TargetCurrency, UpdateMarketRequest};
use crate::error::Result;
use crate::infrastructure::config::{Credentials, TargetVenueConfig};
use crate::port::outbound::venue::TargetVenue;

const VENUE: &str = "OpenDAX";

pub const MARKETS_ENDPOINT: &str = "/api/v2/peatio/public/markets";
pub const CURRENCIES_ENDPOINT: &str = "/api/v2/peatio/public/currencies";
pub const MARKET_UPDATE_ENDPOINT: &str = "/api/v2/peatio/admin/markets/update";
pub const SECRET_ENDPOINT: &str = "/api/v2/sonic/admin/finex/secret";

const API_KEY_HEADER: &str = "X-Auth-Apikey";
const NONCE_HEADER: &str = "X-Auth-Nonce";
const SIGNATURE_HEADER: &str = "X-Auth-Signature";

/// HTTP client for the OpenDAX REST API.
pub struct OpendaxClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
}

impl OpendaxClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            credentials: Credentials::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &TargetVenueConfig) -> Self {
        Self {
            http: build_client(&config.http),
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
        }
    }

    /// Use `credentials` for admin requests.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    fn authorize(&self, request: RequestBuilder, at: DateTime<Utc>) -> Result<RequestBuilder> {
        let (Some(key), Some(secret)) = (&self.credentials.api_key, &self.credentials.secret)
        else {
            warn!(venue = VENUE, "Admin credentials incomplete, sending unsigned request");
            return Ok(request);
        };
        let nonce = millis(at).to_string();
        let signature = sign_hex(secret, &format!("{nonce}{key}"))?;
        Ok(request
            .header(API_KEY_HEADER, key)
            .header(NONCE_HEADER, nonce)
            .header(SIGNATURE_HEADER, signature))
    }

    async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, endpoint);
        info!(venue = VENUE, url = %url, "Fetching");
        let response = self.http.get(&url).send().await?;
        read_json(VENUE, endpoint, response).await
    }
}

#[async_trait]
impl TargetVenue for OpendaxClient {
    async fn markets(&self) -> Result<Vec<MarketConfig>> {
        let markets: Vec<MarketDto> = self.get(MARKETS_ENDPOINT).await?;
        debug!(venue = VENUE, count = markets.len(), "Fetched markets");
        Ok(markets.into_iter().map(MarketConfig::from).collect())
    }

    async fn currencies(&self) -> Result<Vec<TargetCurrency>> {
        let currencies: Vec<CurrencyDto> = self.get(CURRENCIES_ENDPOINT).await?;
        debug!(venue = VENUE, count = currencies.len(), "Fetched currencies");
        Ok(currencies.into_iter().map(TargetCurrency::from).collect())
    }

    async fn update_market(&self, request: &UpdateMarketRequest) -> Result<MarketConfig> {
        let url = endpoint_url(&self.base_url, MARKET_UPDATE_ENDPOINT);
        info!(venue = VENUE, symbol = %request.symbol, "Updating market");
        let response = self
            .authorize(self.http.post(&url), Utc::now())?
            .json(request)
            .send()
            .await?;
        let market: MarketDto = read_json(VENUE, MARKET_UPDATE_ENDPOINT, response).await?;
        Ok(market.into())
    }

    async fn request_restart(&self) -> Result<()> {
        let url = endpoint_url(&self.base_url, SECRET_ENDPOINT);
        info!(venue = VENUE, "Requesting matching engine restart");
        let now = Utc::now();
        let response = self
            .authorize(self.http.put(&url), now)?
            .json(&UpdateSecretRequest::restart(now))
            .send()
            .await?;
        check_status(VENUE, SECRET_ENDPOINT, response)?;
        Ok(())
    }

    fn venue_name(&self) -> &'static str {
        VENUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn admin() -> Credentials {
        Credentials {
            api_key: Some("admin-key".into()),
            secret: Some("admin-secret".into()),
        }
    }

    #[test]
    fn update_request_is_sent_as_signed_json() {
        let mut config = TargetVenueConfig {
            base_url: "https://opendax.example/".into(),
            ..Default::default()
        };
        config.credentials = admin();
        let client = OpendaxClient::from_config(&config);

        let proposed = MarketConfig::new("eth", "usdt")
            .with_price_limits(dec!(0.01), dec!(0))
            .with_amount(dec!(0.003), 4)
            .with_price_precision(2);
        let body = UpdateMarketRequest::new("ethusdt", &proposed);
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let request = client
            .authorize(
                client
                    .http
                    .post(endpoint_url(&client.base_url, MARKET_UPDATE_ENDPOINT)),
                at,
            )
            .unwrap()
            .json(&body)
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://opendax.example/api/v2/peatio/admin/markets/update"
        );
        let headers = request.headers();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "admin-key");
        assert_eq!(headers.get(NONCE_HEADER).unwrap(), "1709294400000");
        let expected = sign_hex("admin-secret", "1709294400000admin-key").unwrap();
        assert_eq!(headers.get(SIGNATURE_HEADER).unwrap(), expected.as_str());

        let sent: serde_json::Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(sent["symbol"], "ethusdt");
        assert_eq!(sent["amount_precision"], 4);
        assert_eq!(sent["price_precision"], 2);
    }

    #[test]
    fn incomplete_credentials_send_no_auth_headers() {
        let client = OpendaxClient::new("https://opendax.example").with_credentials(Credentials {
            api_key: Some("admin-key".into()),
            secret: None,
        });

        let request = client
            .authorize(client.http.put("https://opendax.example/"), Utc::now())
            .unwrap()
            .build()
            .unwrap();

        assert!(request.headers().get(API_KEY_HEADER).is_none());
        assert!(request.headers().get(SIGNATURE_HEADER).is_none());
    }

    #[test]
    fn client_reports_venue_name() {
        assert_eq!(OpendaxClient::new("https://opendax.example").venue_name(), "OpenDAX");
    }
}
