use ethernity_core::decode;
use ethernity_core::types::{
    BalanceHistory, Counters, InternalCallList, TokenHoldingList, TokenTransferList,
    TransactionList, WalletSnapshot,
};
use serde::Deserialize;

/// Dados complementares, cada um opcional e pontuado de forma independente
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhancedData {
    #[serde(alias = "internalTransactions")]
    pub internal_transactions: Option<InternalCallList>,
    #[serde(alias = "tokenTransfers")]
    pub token_transfers: Option<TokenTransferList>,
    #[serde(alias = "balanceHistory")]
    pub balance_history: Option<BalanceHistory>,
    #[serde(deserialize_with = "decode::nested")]
    pub counters: Option<Counters>,
}

/// Entrada completa de uma análise
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReputationInput {
    #[serde(alias = "walletInfo", deserialize_with = "decode::nested")]
    pub wallet: Option<WalletSnapshot>,
    pub transactions: Option<TransactionList>,
    pub tokens: Option<TokenHoldingList>,
    #[serde(flatten)]
    pub enhanced: EnhancedData,
}

impl ReputationInput {
    pub fn new(wallet: WalletSnapshot) -> Self {
        Self {
            wallet: Some(wallet),
            ..Default::default()
        }
    }

    pub fn with_transactions(mut self, transactions: TransactionList) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn with_tokens(mut self, tokens: TokenHoldingList) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_enhanced(mut self, enhanced: EnhancedData) -> Self {
        self.enhanced = enhanced;
        self
    }

    /// Decodifica a entrada a partir de um documento JSON agregado
    pub fn from_value(value: serde_json::Value) -> ethernity_core::error::Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            ethernity_core::Error::DecodeError(format!("Entrada de reputação inválida: {}", e))
        })
    }
}
