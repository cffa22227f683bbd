//! Stock Data Demo
//!
//! Downloads adjusted closing prices from Quandl and prints their summary
//! statistics.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use aquila_demos::{init_logging, print_header, print_result, print_section, print_success};
use aquila_finance::{
    DataProvider, ExchangeDataProvider, StockMarket, WikiMarket, WikipediaDataProvider,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Market {
    Nasdaq,
    Nyse,
    London,
    Euronext,
    Singapore,
}

#[derive(Parser, Debug)]
#[command(name = "demo-stock-data")]
#[command(about = "Load stock prices and compute summary statistics")]
struct Args {
    /// Tickers, separated by ';'
    #[arg(short, long, default_value = "GOOG;AAPL")]
    tickers: String,

    /// Market to load from
    #[arg(short, long, value_enum, default_value = "nasdaq")]
    market: Market,

    /// Quandl API token
    #[arg(long, env = "QUANDL_TOKEN")]
    token: Option<String>,

    /// First day, YYYY-MM-DD
    #[arg(long, default_value = "2016-01-01")]
    start: chrono::NaiveDate,

    /// Last day, YYYY-MM-DD
    #[arg(long, default_value = "2016-01-30")]
    end: chrono::NaiveDate,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn provider(args: &Args) -> anyhow::Result<Box<dyn DataProvider>> {
    let tickers = args.tickers.as_str();
    let exchange = |market: StockMarket| -> anyhow::Result<Box<dyn DataProvider>> {
        let token = args
            .token
            .clone()
            .context("Exchange markets require --token or QUANDL_TOKEN")?;
        Ok(Box::new(
            ExchangeDataProvider::new(token, tickers, market)?.with_window(args.start, args.end)?,
        ))
    };
    let wiki = |market: WikiMarket| -> anyhow::Result<Box<dyn DataProvider>> {
        Ok(Box::new(
            WikipediaDataProvider::new(args.token.clone(), tickers)?
                .with_market(market)
                .with_window(args.start, args.end)?,
        ))
    };

    match args.market {
        Market::Nasdaq => wiki(WikiMarket::Nasdaq),
        Market::Nyse => wiki(WikiMarket::Nyse),
        Market::London => exchange(StockMarket::London),
        Market::Euronext => exchange(StockMarket::Euronext),
        Market::Singapore => exchange(StockMarket::Singapore),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    print_header("Stock Data Demo");

    let mut provider = provider(&args)?;
    info!(provider = provider.name(), "Loading prices");
    provider.run().await.context("Failed to load prices")?;

    print_section("Series");
    for series in provider.data() {
        print_result(
            &series.ticker,
            format!(
                "{} prices, {} .. {}",
                series.prices.len(),
                series.dates.first().map_or_else(String::new, ToString::to_string),
                series.dates.last().map_or_else(String::new, ToString::to_string),
            ),
        );
    }

    print_section("Statistics");
    print_result("Mean prices", format!("{:.4?}", provider.mean_vector()?));
    print_result(
        "Mean period returns",
        format!("{:.6?}", provider.period_return_mean_vector()?),
    );
    println!("  Price covariance:\n{:.4}", provider.covariance_matrix()?);
    println!(
        "  Return covariance:\n{:.6}",
        provider.period_return_covariance_matrix()?
    );
    println!("  DTW similarity:\n{:.6}", provider.similarity_matrix()?);

    println!();
    print_success("Stock data demo complete!");
    Ok(())
}
