use crate::config::ReputationConfig;
use crate::input::{EnhancedData, ReputationInput};
use crate::result::ReputationResult;
use crate::rules::{AddressLists, RuleContext, RulePipeline, ScoreAccumulator};
use chrono::{DateTime, Utc};
use ethernity_core::types::{TokenHoldingList, TransactionList, WalletSnapshot};
use ethereum_types::Address;
use ethernity_core::utils::hex_to_address;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::{debug, warn};

static DEFAULT_ENGINE: Lazy<ReputationEngine> = Lazy::new(ReputationEngine::default);

/// Constrói os conjuntos de endereços a partir da configuração
pub(crate) fn build_lists(config: &ReputationConfig) -> AddressLists {
    fn parse(entries: &[String], kind: &str) -> HashSet<Address> {
        entries
            .iter()
            .filter_map(|entry| {
                let parsed = hex_to_address(entry.trim());
                if parsed.is_none() {
                    warn!(entry = %entry, kind, "endereço inválido ignorado na lista estática");
                }
                parsed
            })
            .collect()
    }

    AddressLists {
        risky: parse(&config.contracts.risky_contracts, "risky"),
        verified: parse(&config.contracts.verified_contracts, "verified"),
    }
}

/// Motor de reputação sem estado entre chamadas
pub struct ReputationEngine {
    config: ReputationConfig,
    lists: AddressLists,
    pipeline: RulePipeline,
}

impl Default for ReputationEngine {
    fn default() -> Self {
        Self::new(ReputationConfig::default())
    }
}

impl ReputationEngine {
    /// Cria um motor com o pipeline padrão
    pub fn new(config: ReputationConfig) -> Self {
        Self::with_pipeline(config, RulePipeline::standard())
    }

    /// Cria um motor com um pipeline customizado
    pub fn with_pipeline(config: ReputationConfig, pipeline: RulePipeline) -> Self {
        let lists = build_lists(&config);
        Self { config, lists, pipeline }
    }

    /// Instância compartilhada com a configuração padrão
    pub fn shared() -> &'static ReputationEngine {
        &DEFAULT_ENGINE
    }

    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Calcula a reputação usando o instante atual como referência
    pub fn compute(&self, input: &ReputationInput) -> ReputationResult {
        self.compute_at(input, Utc::now())
    }

    /// Calcula a reputação com instante de referência explícito
    pub fn compute_at(&self, input: &ReputationInput, as_of: DateTime<Utc>) -> ReputationResult {
        self.evaluate(
            input.wallet.as_ref(),
            input.transactions.as_ref(),
            input.tokens.as_ref(),
            &input.enhanced,
            as_of,
        )
    }

    /// Executa o pipeline sobre entradas emprestadas
    pub fn evaluate(
        &self,
        wallet: Option<&WalletSnapshot>,
        transactions: Option<&TransactionList>,
        tokens: Option<&TokenHoldingList>,
        enhanced: &EnhancedData,
        as_of: DateTime<Utc>,
    ) -> ReputationResult {
        let Some(wallet) = wallet else {
            warn!("nenhum dado de carteira fornecido ao motor de reputação");
            return ReputationResult::insufficient_data(self.config.default_score);
        };

        let ctx = RuleContext {
            wallet,
            transactions,
            tokens,
            enhanced,
            config: &self.config,
            lists: &self.lists,
            as_of,
        };

        let mut acc = ScoreAccumulator::new(self.config.base_score);
        self.pipeline.run(&ctx, &mut acc);

        let (score, metrics) = acc.finish();
        debug!(
            score,
            flags = metrics.risk_flags.len(),
            merits = metrics.merits.len(),
            "reputação calculada"
        );
        ReputationResult::from_score(score, metrics)
    }
}

/// Calcula a reputação de uma carteira com a configuração padrão.
///
/// Nunca falha: entradas ausentes são ignoradas e carteira ausente resulta no
/// resultado padrão.
pub fn compute_reputation(
    wallet: Option<&WalletSnapshot>,
    transactions: Option<&TransactionList>,
    tokens: Option<&TokenHoldingList>,
    enhanced: &EnhancedData,
) -> ReputationResult {
    ReputationEngine::shared().evaluate(wallet, transactions, tokens, enhanced, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractRules;

    #[test]
    fn invalid_list_entries_are_skipped() {
        let config = ReputationConfig {
            contracts: ContractRules {
                risky_contracts: vec!["0x123".into(), "0x47CE0C6ED5B0CE3D3A51FDB1C52DC66A7C3C2B63".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let lists = build_lists(&config);
        assert_eq!(lists.risky.len(), 1);
        assert_eq!(lists.verified.len(), config.contracts.verified_contracts.len());
    }

    #[test]
    fn custom_pipeline_only_applies_base_score() {
        let engine = ReputationEngine::with_pipeline(ReputationConfig::default(), RulePipeline::new());
        let result = engine.compute_at(&ReputationInput::new(WalletSnapshot::default()), Utc::now());
        assert_eq!(result.score, 40);
        assert!(result.metrics.risk_flags.is_empty());
    }
}
