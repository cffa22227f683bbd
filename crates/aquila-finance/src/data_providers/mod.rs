//! Stock-market data providers.
//!
//! A provider loads one price series per ticker in [`DataProvider::run`];
//! the statistics methods then work on the loaded data and fail with
//! [`FinanceError::NoData`] until it has been loaded.

pub mod exchange;
pub mod quandl;
pub mod stats;
pub mod wikipedia;

use async_trait::async_trait;
use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

pub use exchange::{ExchangeDataProvider, StockMarket};
pub use quandl::{QuandlClient, parse_dataset};
pub use wikipedia::{WikiMarket, WikipediaDataProvider};

/// Adjusted closing prices of one ticker, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol.
    pub ticker: String,
    /// Trading dates.
    pub dates: Vec<NaiveDate>,
    /// Prices on those dates.
    pub prices: Vec<f64>,
}

/// Ticker symbols, given either as a list or as one separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tickers(Vec<String>);

impl Tickers {
    /// Split on `;` and newlines, dropping blanks.
    pub fn parse(input: &str) -> Self {
        Self(
            input
                .split([';', '\n'])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// The symbols.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Tickers {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl From<String> for Tickers {
    fn from(input: String) -> Self {
        Self::parse(&input)
    }
}

impl From<Vec<String>> for Tickers {
    fn from(tickers: Vec<String>) -> Self {
        Self(tickers)
    }
}

impl From<Vec<&str>> for Tickers {
    fn from(tickers: Vec<&str>) -> Self {
        Self(tickers.into_iter().map(String::from).collect())
    }
}

/// Default first day of the date window.
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or_default()
}

/// Default last day of the date window.
pub fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, 30).unwrap_or_default()
}

pub(crate) fn check_window(start: NaiveDate, end: NaiveDate) -> FinanceResult<()> {
    if start > end {
        return Err(FinanceError::Configuration(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(())
}

/// Source of price series with derived statistics.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Load one series per ticker, replacing previously loaded data.
    async fn run(&mut self) -> FinanceResult<()>;

    /// The loaded series, in ticker order.
    fn data(&self) -> &[PriceSeries];

    fn mean_vector(&self) -> FinanceResult<Vec<f64>> {
        stats::mean_vector(self.data())
    }

    fn covariance_matrix(&self) -> FinanceResult<Array2<f64>> {
        stats::covariance_matrix(self.data())
    }

    fn period_return_mean_vector(&self) -> FinanceResult<Vec<f64>> {
        stats::period_return_mean_vector(self.data())
    }

    fn period_return_covariance_matrix(&self) -> FinanceResult<Array2<f64>> {
        stats::period_return_covariance_matrix(self.data())
    }

    /// Pairwise similarity from dynamic time warping.
    fn similarity_matrix(&self) -> FinanceResult<Array2<f64>> {
        stats::similarity_matrix(self.data())
    }
}

/// Fetch every ticker from one Quandl database, in order.
pub(crate) async fn fetch_all(
    client: &QuandlClient,
    database: &str,
    tickers: &Tickers,
    start: NaiveDate,
    end: NaiveDate,
) -> FinanceResult<Vec<PriceSeries>> {
    let mut data = Vec::with_capacity(tickers.len());
    for ticker in tickers.as_slice() {
        data.push(client.fetch(database, ticker, start, end).await?);
    }
    Ok(data)
}
