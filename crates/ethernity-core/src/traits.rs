/*!
 * Ethernity Traits
 *
 * Fronteira entre a coleta de dados de explorer e quem os consome
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::TransactionHash;
use ethereum_types::Address;
use serde_json::Value;

/// Trait para provedores de dados de explorer (API REST estilo Blockscout).
///
/// Cada método retorna o JSON bruto do endpoint; a decodificação fica a cargo
/// de quem consome.
#[async_trait]
pub trait ExplorerProvider: Send + Sync {
    /// Obtém o resumo do endereço (saldo, flags de verificação)
    async fn get_wallet_info(&self, address: Address) -> Result<Value>;

    /// Obtém a lista de transações do endereço
    async fn get_transactions(&self, address: Address, limit: usize) -> Result<Value>;

    /// Obtém os tokens mantidos pelo endereço
    async fn get_token_holdings(&self, address: Address, limit: usize) -> Result<Value>;

    /// Obtém as transações internas do endereço
    async fn get_internal_transactions(&self, address: Address, limit: usize) -> Result<Value>;

    /// Obtém as transferências de token do endereço
    async fn get_token_transfers(&self, address: Address, limit: usize) -> Result<Value>;

    /// Obtém o histórico de saldo nativo
    async fn get_balance_history(&self, address: Address, limit: usize) -> Result<Value>;

    /// Obtém os contadores agregados do endereço
    async fn get_counters(&self, address: Address) -> Result<Value>;

    /// Obtém os detalhes de uma transação
    async fn get_transaction(&self, tx_hash: TransactionHash) -> Result<Value>;
}
