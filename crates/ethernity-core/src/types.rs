/*!
 * Ethernity Types
 *
 * Registros de carteira retornados por explorers (formato Blockscout v2).
 * Todos os campos são opcionais e decodificados de forma tolerante.
 */

use crate::decode::{self, RecordList};
use chrono::{DateTime, Utc};
use ethereum_types::{Address, H256, U256};
use serde::Deserialize;

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Resumo de uma conta (`/addresses/{address}`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WalletSnapshot {
    #[serde(rename = "hash", default, deserialize_with = "decode::address")]
    pub address: Option<Address>,
    #[serde(rename = "coin_balance", default, deserialize_with = "decode::amount")]
    pub balance: Option<U256>,
    #[serde(rename = "ens_domain_name", default, deserialize_with = "decode::text")]
    pub ens_name: Option<String>,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_contract: Option<bool>,
}

/// Contraparte de uma transação (`from`/`to`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Counterparty {
    #[serde(default, deserialize_with = "decode::address")]
    pub hash: Option<Address>,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_contract: Option<bool>,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: Option<String>,
}

impl Counterparty {
    /// Endereço da contraparte quando ela é um contrato
    pub fn contract_address(&self) -> Option<Address> {
        if self.is_contract.unwrap_or(false) {
            self.hash
        } else {
            None
        }
    }

    pub fn verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }
}

/// Taxa paga por uma transação
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fee {
    #[serde(rename = "type", default, deserialize_with = "decode::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
}

/// Transação externa da carteira
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "decode::tx_hash")]
    pub hash: Option<TransactionHash>,
    #[serde(default, deserialize_with = "decode::nested")]
    pub from: Option<Counterparty>,
    #[serde(default, deserialize_with = "decode::nested")]
    pub to: Option<Counterparty>,
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
    #[serde(default, deserialize_with = "decode::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "decode::nested")]
    pub fee: Option<Fee>,
    #[serde(default, deserialize_with = "decode::text")]
    pub method: Option<String>,
}

/// Transação interna (chamada entre contratos)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InternalCall {
    #[serde(default, deserialize_with = "decode::nested")]
    pub from: Option<Counterparty>,
    #[serde(default, deserialize_with = "decode::nested")]
    pub to: Option<Counterparty>,
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
    #[serde(default, deserialize_with = "decode::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Informações sobre um token
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenInfo {
    #[serde(alias = "address_hash", default, deserialize_with = "decode::address")]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "decode::decimals")]
    pub decimals: Option<u8>,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_verified: Option<bool>,
    #[serde(rename = "type", default, deserialize_with = "decode::text")]
    pub token_type: Option<String>,
}

/// Quantidade transferida em um token transfer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransferTotal {
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
    #[serde(default, deserialize_with = "decode::decimals")]
    pub decimals: Option<u8>,
}

/// Transferência de token (ERC-20/721/1155)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenTransfer {
    #[serde(default, deserialize_with = "decode::nested")]
    pub token: Option<TokenInfo>,
    #[serde(default, deserialize_with = "decode::nested")]
    pub total: Option<TransferTotal>,
    #[serde(default, deserialize_with = "decode::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TokenTransfer {
    pub fn token_address(&self) -> Option<Address> {
        self.token.as_ref().and_then(|t| t.address)
    }

    pub fn value(&self) -> Option<U256> {
        self.total.as_ref().and_then(|t| t.value)
    }
}

/// Saldo de token mantido pela carteira
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenHolding {
    #[serde(default, deserialize_with = "decode::nested")]
    pub token: Option<TokenInfo>,
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
}

/// Amostra do histórico de saldo nativo
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BalanceSample {
    #[serde(default, deserialize_with = "decode::amount")]
    pub value: Option<U256>,
    #[serde(alias = "block_timestamp", default, deserialize_with = "decode::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "decode::count")]
    pub block_number: Option<u64>,
}

/// Contadores agregados do endereço (`/addresses/{address}/counters`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Counters {
    #[serde(default, deserialize_with = "decode::count")]
    pub transactions_count: Option<u64>,
    #[serde(default, deserialize_with = "decode::count")]
    pub gas_usage_count: Option<u64>,
    #[serde(default, deserialize_with = "decode::count")]
    pub validations_count: Option<u64>,
    #[serde(default, deserialize_with = "decode::count")]
    pub token_transfers_count: Option<u64>,
}

pub type TransactionList = RecordList<Transaction>;
pub type InternalCallList = RecordList<InternalCall>;
pub type TokenTransferList = RecordList<TokenTransfer>;
pub type TokenHoldingList = RecordList<TokenHolding>;
pub type BalanceHistory = RecordList<BalanceSample>;
