//! Exchange-published end-of-day prices.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{
    DataProvider, PriceSeries, QuandlClient, Tickers, check_window, default_end, default_start,
    fetch_all,
};
use crate::error::{FinanceError, FinanceResult};

/// Exchanges with a Quandl database of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMarket {
    #[default]
    London,
    Euronext,
    Singapore,
}

impl StockMarket {
    /// Quandl database code of the exchange.
    pub fn database(self) -> &'static str {
        match self {
            Self::London => "XLON",
            Self::Euronext => "XPAR",
            Self::Singapore => "XSES",
        }
    }
}

/// Provider for exchange databases, which require an API token.
#[derive(Debug)]
pub struct ExchangeDataProvider {
    client: QuandlClient,
    tickers: Tickers,
    market: StockMarket,
    start: NaiveDate,
    end: NaiveDate,
    data: Vec<PriceSeries>,
}

impl ExchangeDataProvider {
    /// Create a provider; an empty token is rejected.
    pub fn new(
        token: impl Into<String>,
        tickers: impl Into<Tickers>,
        market: StockMarket,
    ) -> FinanceResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(FinanceError::Configuration(format!(
                "an API token is required for {}",
                market.database()
            )));
        }
        Ok(Self {
            client: QuandlClient::new(Some(token))?,
            tickers: tickers.into(),
            market,
            start: default_start(),
            end: default_end(),
            data: vec![],
        })
    }

    /// Set the date window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> FinanceResult<Self> {
        check_window(start, end)?;
        self.start = start;
        self.end = end;
        Ok(self)
    }

    /// Replace the HTTP client. The replacement must carry the token.
    #[must_use]
    pub fn with_client(mut self, client: QuandlClient) -> Self {
        self.client = client;
        self
    }

    pub fn market(&self) -> StockMarket {
        self.market
    }

    pub fn tickers(&self) -> &Tickers {
        &self.tickers
    }
}

#[async_trait]
impl DataProvider for ExchangeDataProvider {
    fn name(&self) -> &str {
        "exchange"
    }

    #[instrument(skip(self), fields(database = self.market.database(), tickers = self.tickers.len()))]
    async fn run(&mut self) -> FinanceResult<()> {
        self.data = fetch_all(
            &self.client,
            self.market.database(),
            &self.tickers,
            self.start,
            self.end,
        )
        .await?;
        info!(series = self.data.len(), "Loaded exchange prices");
        Ok(())
    }

    fn data(&self) -> &[PriceSeries] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_databases() {
        assert_eq!(StockMarket::London.database(), "XLON");
        assert_eq!(StockMarket::Euronext.database(), "XPAR");
        assert_eq!(StockMarket::Singapore.database(), "XSES");
    }

    #[test]
    fn test_token_required() {
        let err = ExchangeDataProvider::new("  ", "BP", StockMarket::London).unwrap_err();
        assert!(matches!(err, FinanceError::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let provider = ExchangeDataProvider::new("s3cr3t", "BP;VOD", StockMarket::London).unwrap();
        assert_eq!(provider.tickers().len(), 2);
        assert!(!format!("{provider:?}").contains("s3cr3t"));
    }
}
