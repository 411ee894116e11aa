use crate::config::FetchLimits;
use chrono::{DateTime, Utc};
use ethereum_types::Address;
use ethernity_core::traits::ExplorerProvider;
use ethernity_core::types::{
    BalanceHistory, Counters, InternalCallList, TokenHoldingList, TokenTransferList,
    TransactionList, WalletSnapshot,
};
use ethernity_core::utils::{hex_to_address, short_address};
use ethernity_core::{error::Result, Error, RecordList};
use ethernity_reputation::{EnhancedData, ReputationInput};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Dados agregados de uma carteira, prontos para o motor de reputação
#[derive(Debug, Clone, PartialEq)]
pub struct WalletData {
    pub address: Address,
    /// `None` quando o resumo do endereço não pôde ser obtido
    pub wallet: Option<WalletSnapshot>,
    pub transactions: TransactionList,
    pub tokens: TokenHoldingList,
    pub internal_transactions: InternalCallList,
    pub token_transfers: TokenTransferList,
    pub balance_history: BalanceHistory,
    pub counters: Option<Counters>,
    /// Fontes que falharam e foram substituídas por coleções vazias
    pub failed_sources: Vec<&'static str>,
    pub analysis_timestamp: DateTime<Utc>,
}

impl WalletData {
    /// Converte os dados coletados na entrada do motor
    pub fn into_input(self) -> ReputationInput {
        ReputationInput {
            wallet: self.wallet,
            transactions: Some(self.transactions),
            tokens: Some(self.tokens),
            enhanced: EnhancedData {
                internal_transactions: Some(self.internal_transactions),
                token_transfers: Some(self.token_transfers),
                balance_history: Some(self.balance_history),
                counters: self.counters,
            },
        }
    }
}

/// Coleta os dados da carteira com os limites padrão
pub async fn fetch_wallet_data<P>(provider: &P, address: &str) -> Result<WalletData>
where
    P: ExplorerProvider + ?Sized,
{
    fetch_wallet_data_with(provider, address, &FetchLimits::default()).await
}

/// Executa as sete consultas em paralelo.
///
/// Apenas um endereço inválido gera erro. Falhas individuais viram coleções
/// vazias (ou `None` para resumo e contadores) e ficam em `failed_sources`.
pub async fn fetch_wallet_data_with<P>(
    provider: &P,
    address: &str,
    limits: &FetchLimits,
) -> Result<WalletData>
where
    P: ExplorerProvider + ?Sized,
{
    let parsed = hex_to_address(address.trim())
        .ok_or_else(|| Error::ValidationError(format!("Endereço inválido: {}", address)))?;

    let (wallet, transactions, tokens, internal, transfers, history, counters) = tokio::join!(
        provider.get_wallet_info(parsed),
        provider.get_transactions(parsed, limits.transactions),
        provider.get_token_holdings(parsed, limits.tokens),
        provider.get_internal_transactions(parsed, limits.internal_transactions),
        provider.get_token_transfers(parsed, limits.token_transfers),
        provider.get_balance_history(parsed, limits.balance_history),
        provider.get_counters(parsed),
    );

    let mut failed = Vec::new();
    let data = WalletData {
        address: parsed,
        wallet: settle(wallet, "wallet", &mut failed).and_then(object),
        transactions: collection(transactions, "transactions", &mut failed),
        tokens: collection(tokens, "tokens", &mut failed),
        internal_transactions: collection(internal, "internal_transactions", &mut failed),
        token_transfers: collection(transfers, "token_transfers", &mut failed),
        balance_history: collection(history, "balance_history", &mut failed),
        counters: settle(counters, "counters", &mut failed).and_then(object),
        failed_sources: failed,
        analysis_timestamp: Utc::now(),
    };

    debug!(
        address = %short_address(&parsed),
        transactions = data.transactions.len(),
        tokens = data.tokens.len(),
        failed = data.failed_sources.len(),
        "dados da carteira coletados"
    );
    Ok(data)
}

fn settle(result: Result<Value>, source: &'static str, failed: &mut Vec<&'static str>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                source,
                error = %e,
                transient = e.is_transient(),
                "falha ao consultar o explorer, seguindo sem estes dados"
            );
            failed.push(source);
            None
        }
    }
}

fn collection<T: DeserializeOwned>(
    result: Result<Value>,
    source: &'static str,
    failed: &mut Vec<&'static str>,
) -> RecordList<T> {
    settle(result, source, failed)
        .map(RecordList::from_value)
        .unwrap_or_default()
}

fn object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}
