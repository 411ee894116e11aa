use ethernity_core::{error::Result, Error};
use std::env;
use std::time::Duration;

/// URL padrão da API REST v2 do Blockscout (Ethereum mainnet)
pub const DEFAULT_BASE_URL: &str = "https://eth.blockscout.com/api/v2";

/// Variável de ambiente com a URL base do explorer
pub const ENV_BASE_URL: &str = "ETHERNITY_EXPLORER_URL";

/// Variável de ambiente com o timeout das requisições, em segundos
pub const ENV_TIMEOUT_SECS: &str = "ETHERNITY_EXPLORER_TIMEOUT_SECS";

/// Quantidade de registros pedida em cada coleção
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub transactions: usize,
    pub tokens: usize,
    pub internal_transactions: usize,
    pub token_transfers: usize,
    pub balance_history: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            transactions: 50,
            tokens: 100,
            internal_transactions: 30,
            token_transfers: 50,
            balance_history: 30,
        }
    }
}

/// Configuração do cliente de explorer
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub limits: FetchLimits,
    pub use_cache: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            limits: FetchLimits::default(),
            use_cache: true,
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 256,
        }
    }
}

impl ExplorerConfig {
    /// Configuração padrão apontando para outra URL base
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Lê a configuração do ambiente; variáveis ausentes mantêm o padrão
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var(ENV_BASE_URL) {
            let url = url.trim();
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }

        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::ValidationError(format!("{} inválido ({}): {}", ENV_TIMEOUT_SECS, secs, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
