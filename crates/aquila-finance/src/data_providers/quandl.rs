//! Quandl v3 dataset client.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::PriceSeries;
use crate::error::{FinanceError, FinanceResult};

/// Default Quandl API endpoint.
pub const QUANDL_API_URL: &str = "https://www.quandl.com/api/v3";

/// Column holding split- and dividend-adjusted closing prices.
pub const ADJUSTED_CLOSE: &str = "Adj. Close";

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    dataset: Dataset,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    column_names: Vec<String>,
    data: Vec<Vec<serde_json::Value>>,
}

/// Thin client over the dataset endpoint.
#[derive(Clone)]
pub struct QuandlClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl QuandlClient {
    /// Create a client against the public endpoint.
    pub fn new(token: Option<String>) -> FinanceResult<Self> {
        Self::with_base_url(QUANDL_API_URL, token)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> FinanceResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dataset URL for one ticker, without the API key.
    pub fn dataset_url(
        &self,
        database: &str,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> String {
        format!(
            "{}/datasets/{}/{}.json?start_date={}&end_date={}&order=asc",
            self.base_url,
            database,
            ticker,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        )
    }

    /// Fetch the adjusted closing prices of one ticker.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        database: &str,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FinanceResult<PriceSeries> {
        let url = self.dataset_url(database, ticker, start, end);
        debug!("Fetching dataset from {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("api_key", token.as_str())]);
        }
        let response = request.send().await.map_err(|e| retrieval(ticker, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FinanceError::Retrieval(format!(
                "Cannot retrieve {ticker} from {database}: HTTP {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| retrieval(ticker, &e))?;
        parse_dataset(ticker, &body)
    }
}

impl std::fmt::Debug for QuandlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuandlClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

fn retrieval(ticker: &str, err: &reqwest::Error) -> FinanceError {
    FinanceError::Retrieval(format!("Cannot retrieve {ticker}: {err}"))
}

/// Extract the adjusted close column from a dataset response.
///
/// Rows are returned in ascending date order. Rows whose price is null are
/// skipped.
pub fn parse_dataset(ticker: &str, body: &str) -> FinanceResult<PriceSeries> {
    let response: DatasetResponse = serde_json::from_str(body)
        .map_err(|e| FinanceError::Parse(format!("Cannot parse quandl output for {ticker}: {e}")))?;
    let dataset = response.dataset;

    let column = dataset
        .column_names
        .iter()
        .position(|c| c == ADJUSTED_CLOSE)
        .ok_or_else(|| {
            FinanceError::Parse(format!(
                "Cannot parse quandl output for {ticker}: no '{ADJUSTED_CLOSE}' column"
            ))
        })?;

    let mut rows = Vec::with_capacity(dataset.data.len());
    for row in &dataset.data {
        let date = row
            .first()
            .and_then(serde_json::Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .ok_or_else(|| {
                FinanceError::Parse(format!("Cannot parse quandl output for {ticker}: bad date"))
            })?;
        if let Some(price) = row.get(column).and_then(serde_json::Value::as_f64) {
            rows.push((date, price));
        }
    }
    rows.sort_by_key(|(date, _)| *date);

    let (dates, prices) = rows.into_iter().unzip();
    Ok(PriceSeries {
        ticker: ticker.to_string(),
        dates,
        prices,
    })
}
