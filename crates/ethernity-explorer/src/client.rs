use crate::config::ExplorerConfig;
use crate::fetcher::{fetch_wallet_data_with, WalletData};
use async_trait::async_trait;
use ethereum_types::Address;
use ethernity_core::traits::ExplorerProvider;
use ethernity_core::types::TransactionHash;
use ethernity_core::utils::format_address;
use ethernity_core::{error::Result, Error};
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::debug;

/// Estatísticas do cache de respostas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Cliente da API REST v2 do Blockscout
pub struct BlockscoutClient {
    http: Client,
    config: ExplorerConfig,
    cache: Mutex<LruCache<String, (Value, Instant)>>,
    counters: Mutex<(u64, u64)>,
}

impl BlockscoutClient {
    /// Cria um novo cliente com timeout por requisição
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::RpcError(format!("Falha ao criar cliente HTTP: {}", e)))?;
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            http,
            config,
            cache: Mutex::new(LruCache::new(capacity)),
            counters: Mutex::new((0, 0)),
        })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Coleta todos os dados da carteira com os limites configurados
    pub async fn fetch_wallet_data(&self, address: &str) -> Result<WalletData> {
        fetch_wallet_data_with(self, address, &self.config.limits).await
    }

    fn url(&self, path: &str, limit: Option<usize>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match limit {
            Some(limit) => format!("{}{}?limit={}", base, path, limit),
            None => format!("{}{}", base, path),
        }
    }

    fn cached(&self, url: &str) -> Option<Value> {
        if !self.config.use_cache {
            return None;
        }
        let hit = {
            let mut cache = self.cache.lock();
            let entry = cache
                .get(url)
                .map(|(value, stored)| (value.clone(), stored.elapsed() < self.config.cache_ttl));
            match entry {
                Some((value, true)) => Some(value),
                Some((_, false)) => {
                    cache.pop(url);
                    None
                }
                None => None,
            }
        };

        let mut counters = self.counters.lock();
        if hit.is_some() {
            counters.0 += 1;
        } else {
            counters.1 += 1;
        }
        hit
    }

    fn store(&self, url: String, value: &Value) {
        if self.config.use_cache {
            self.cache.lock().put(url, (value.clone(), Instant::now()));
        }
    }

    /// Executa um GET e decodifica o corpo como JSON
    async fn get_json(&self, path: &str, limit: Option<usize>) -> Result<Value> {
        let url = self.url(path, limit);
        if let Some(value) = self.cached(&url) {
            debug!(url = %url, "resposta servida do cache");
            return Ok(value);
        }

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::TimeoutError(format!("Requisição expirou: {}", url))
            } else {
                Error::RpcError(format!("Falha na requisição {}: {}", url, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RpcError(format!("Explorer retornou {} para {}", status, url)));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| Error::DecodeError(format!("Resposta inválida de {}: {}", url, e)))?;

        debug!(url = %url, "resposta obtida do explorer");
        self.store(url, &value);
        Ok(value)
    }

    /// Limpa o cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Obtém estatísticas do cache
    pub fn cache_stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        let expired = cache
            .iter()
            .filter(|(_, (_, stored))| stored.elapsed() >= self.config.cache_ttl)
            .count();
        let (hits, misses) = *self.counters.lock();

        CacheStats {
            total_entries: cache.len(),
            expired_entries: expired,
            hits,
            misses,
        }
    }
}

#[async_trait]
impl ExplorerProvider for BlockscoutClient {
    async fn get_wallet_info(&self, address: Address) -> Result<Value> {
        self.get_json(&format!("/addresses/{}", format_address(&address)), None).await
    }

    async fn get_transactions(&self, address: Address, limit: usize) -> Result<Value> {
        let path = format!("/addresses/{}/transactions", format_address(&address));
        self.get_json(&path, Some(limit)).await
    }

    async fn get_token_holdings(&self, address: Address, limit: usize) -> Result<Value> {
        let path = format!("/addresses/{}/tokens", format_address(&address));
        self.get_json(&path, Some(limit)).await
    }

    async fn get_internal_transactions(&self, address: Address, limit: usize) -> Result<Value> {
        let path = format!("/addresses/{}/internal-transactions", format_address(&address));
        self.get_json(&path, Some(limit)).await
    }

    async fn get_token_transfers(&self, address: Address, limit: usize) -> Result<Value> {
        let path = format!("/addresses/{}/token-transfers", format_address(&address));
        self.get_json(&path, Some(limit)).await
    }

    async fn get_balance_history(&self, address: Address, limit: usize) -> Result<Value> {
        let path = format!("/addresses/{}/coin-balance-history", format_address(&address));
        self.get_json(&path, Some(limit)).await
    }

    async fn get_counters(&self, address: Address) -> Result<Value> {
        self.get_json(&format!("/addresses/{}/counters", format_address(&address)), None).await
    }

    async fn get_transaction(&self, tx_hash: TransactionHash) -> Result<Value> {
        self.get_json(&format!("/transactions/0x{:x}", tx_hash), None).await
    }
}
