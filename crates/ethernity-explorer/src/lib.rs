/*!
 * Ethernity Explorer
 *
 * Cliente da API REST do Blockscout e coleta concorrente dos dados usados no
 * cálculo de reputação de carteiras
 */

pub mod client;
pub mod config;
pub mod fetcher;

// Re-exportações públicas
pub use client::{BlockscoutClient, CacheStats};
pub use config::{ExplorerConfig, FetchLimits};
pub use fetcher::{fetch_wallet_data, fetch_wallet_data_with, WalletData};
