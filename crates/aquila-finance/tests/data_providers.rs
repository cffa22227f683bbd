//! Data providers against a local one-shot HTTP responder.

use aquila_finance::data_providers::QuandlClient;
use aquila_finance::{
    DataProvider, ExchangeDataProvider, FinanceError, StockMarket, WikipediaDataProvider,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ============================================================================
// Helpers
// ============================================================================

fn dataset(prices: &[f64]) -> String {
    let rows: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(day, p)| format!(r#"["2016-01-{:02}", {p}, {p}]"#, day + 4))
        .collect();
    format!(
        r#"{{"dataset": {{"column_names": ["Date", "Close", "Adj. Close"], "data": [{}]}}}}"#,
        rows.join(",")
    )
}

/// Serve one canned response per body, in order, and return the base URL.
async fn serve(bodies: Vec<(u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status, body) in bodies {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status} OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });
    format!("http://{addr}/api/v3")
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_wikipedia_provider_loads_series_in_ticker_order() {
    let url = serve(vec![
        (200, dataset(&[1.0, 2.0, 3.0])),
        (200, dataset(&[3.0, 2.0, 1.0])),
    ])
    .await;
    let mut provider = WikipediaDataProvider::new(None, "GOOG;AAPL")
        .unwrap()
        .with_client(QuandlClient::with_base_url(url, None).unwrap());

    provider.run().await.unwrap();
    let data = provider.data();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].ticker, "GOOG");
    assert_eq!(data[1].prices, vec![3.0, 2.0, 1.0]);

    assert_eq!(provider.mean_vector().unwrap(), vec![2.0, 2.0]);
    let cov = provider.covariance_matrix().unwrap();
    assert!((cov[[0, 1]] + 1.0).abs() < 1e-12);
    let rho = provider.similarity_matrix().unwrap();
    assert!((rho[[0, 1]] - 0.25).abs() < 1e-12);
}

#[tokio::test]
async fn test_exchange_provider_period_returns() {
    let url = serve(vec![(200, dataset(&[100.0, 110.0, 99.0]))]).await;
    let mut provider = ExchangeDataProvider::new("token", vec!["BP"], StockMarket::London)
        .unwrap()
        .with_client(QuandlClient::with_base_url(url, Some("token".into())).unwrap());

    provider.run().await.unwrap();
    let mean = provider.period_return_mean_vector().unwrap();
    assert!((mean[0] - 0.0).abs() < 1e-12);
    let cov = provider.period_return_covariance_matrix().unwrap();
    assert!((cov[[0, 0]] - 0.02).abs() < 1e-12);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_statistics_before_run_fail() {
    let provider = WikipediaDataProvider::new(None, "GOOG").unwrap();
    assert!(matches!(provider.mean_vector(), Err(FinanceError::NoData)));
}

#[tokio::test]
async fn test_http_error_is_retrieval_error() {
    let url = serve(vec![(404, r#"{"quandl_error": {"code": "QECx02"}}"#.to_string())]).await;
    let mut provider = WikipediaDataProvider::new(None, "NOPE")
        .unwrap()
        .with_client(QuandlClient::with_base_url(url, None).unwrap());
    let err = provider.run().await.unwrap_err();
    assert!(matches!(err, FinanceError::Retrieval(_)), "{err}");
}

#[tokio::test]
async fn test_missing_column_is_parse_error() {
    let body = r#"{"dataset": {"column_names": ["Date", "Close"], "data": [["2016-01-04", 1.0]]}}"#;
    let url = serve(vec![(200, body.to_string())]).await;
    let mut provider = WikipediaDataProvider::new(None, "GOOG")
        .unwrap()
        .with_client(QuandlClient::with_base_url(url, None).unwrap());
    assert!(matches!(provider.run().await, Err(FinanceError::Parse(_))));
}

#[tokio::test]
async fn test_refused_connection_is_retrieval_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = QuandlClient::with_base_url(format!("http://{addr}"), None).unwrap();
    let mut provider = WikipediaDataProvider::new(None, "GOOG")
        .unwrap()
        .with_client(client);
    assert!(matches!(provider.run().await, Err(FinanceError::Retrieval(_))));
}
