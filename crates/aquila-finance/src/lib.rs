//! Aquila finance applications.
//!
//! Two parts:
//!
//! - [`credit_risk`]: loss distribution, value at risk and conditional value
//!   at risk of a credit portfolio under the Gaussian conditional
//!   independence model, computed on a simulator or by exact enumeration.
//! - [`data_providers`]: price series from the Quandl v3 API plus summary
//!   statistics over them.
//!
//! # Example
//!
//! ```rust
//! use aquila_core::QuantumAlgorithm;
//! use aquila_finance::credit_risk::{CreditRiskAnalysis, CreditRiskConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = CreditRiskConfig {
//!     n_normal: 2,
//!     normal_max_value: 2.0,
//!     p_zeros: vec![0.15, 0.25],
//!     rhos: vec![0.1, 0.05],
//!     lgd: vec![1, 2],
//!     alpha: 0.95,
//!     classical: true,
//! };
//! let mut analysis = CreditRiskAnalysis::from_config(&config).unwrap();
//! let result = analysis.run(None, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert!(result.value_at_risk <= 3);
//! ```

pub mod credit_risk;
pub mod data_providers;
pub mod error;

pub use credit_risk::{CreditRiskAnalysis, CreditRiskConfig, CreditRiskResult};
pub use data_providers::{
    DataProvider, ExchangeDataProvider, PriceSeries, StockMarket, Tickers, WikiMarket,
    WikipediaDataProvider,
};
pub use error::{FinanceError, FinanceResult};
