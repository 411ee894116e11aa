//! Regras de pontuação encadeadas em um pipeline.
//!
//! Cada regra recebe o contexto imutável da análise e aplica deltas em um
//! acumulador que pertence a uma única chamada do motor.

mod activity;
mod enhanced;
mod holdings;
mod transactions;

pub use activity::{DiversityRule, RecencyRule};
pub use enhanced::{BalanceHistoryRule, CountersRule, InternalCallRule, TokenTransferRule};
pub use holdings::{BalanceRule, TokenHoldingRule};
pub use transactions::{ActivityPatternRule, TransactionPassRule, TransactionStats};

use crate::config::ReputationConfig;
use crate::input::EnhancedData;
use crate::result::ReputationMetrics;
use chrono::{DateTime, Utc};
use ethereum_types::Address;
use ethernity_core::types::{TokenHoldingList, TransactionList, WalletSnapshot};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Falha de uma regra. O motor registra a falha e segue com as demais regras.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("{count} registro(s) malformado(s) em {subject}")]
    MalformedRecords { subject: &'static str, count: usize },
}

impl RuleError {
    /// Assunto usado na flag `Error analyzing <assunto>`
    pub fn subject(&self) -> &'static str {
        match self {
            RuleError::MalformedRecords { subject, .. } => subject,
        }
    }

    pub(crate) fn check_rejected(subject: &'static str, rejected: usize) -> Result<(), RuleError> {
        if rejected > 0 {
            Err(RuleError::MalformedRecords { subject, count: rejected })
        } else {
            Ok(())
        }
    }
}

/// Listas estáticas de contratos indexadas por endereço canônico
#[derive(Debug, Clone, Default)]
pub struct AddressLists {
    pub risky: HashSet<Address>,
    pub verified: HashSet<Address>,
}

/// Contexto imutável de uma análise
pub struct RuleContext<'a> {
    pub wallet: &'a WalletSnapshot,
    pub transactions: Option<&'a TransactionList>,
    pub tokens: Option<&'a TokenHoldingList>,
    pub enhanced: &'a EnhancedData,
    pub config: &'a ReputationConfig,
    pub lists: &'a AddressLists,
    /// Instante de referência para a janela de recência
    pub as_of: DateTime<Utc>,
}

/// Acumulador de pontuação e métricas de uma chamada
#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    score: f64,
    metrics: ReputationMetrics,
    unique_contracts: HashSet<Address>,
    transaction_stats: Option<TransactionStats>,
}

impl ScoreAccumulator {
    pub fn new(base_score: f64) -> Self {
        Self {
            score: sanitize(base_score),
            metrics: ReputationMetrics::default(),
            unique_contracts: HashSet::new(),
            transaction_stats: None,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Soma um delta à pontuação; valores não finitos contam como zero.
    /// Retorna o delta efetivamente aplicado.
    pub fn adjust(&mut self, delta: f64) -> f64 {
        let delta = sanitize(delta);
        self.score += delta;
        delta
    }

    /// Aplica bônus e registra o mérito correspondente
    pub fn reward(&mut self, points: f64, merit: impl Into<String>) -> f64 {
        let merit = merit.into();
        let applied = self.adjust(points.abs());
        debug!(points = applied, merit = %merit, "bônus de reputação");
        self.metrics.merits.push(merit);
        applied
    }

    /// Aplica penalidade e registra a flag de risco correspondente
    pub fn penalize(&mut self, points: f64, flag: impl Into<String>) -> f64 {
        let flag = flag.into();
        let applied = self.adjust(-points.abs());
        debug!(points = applied, flag = %flag, "penalidade de reputação");
        self.metrics.risk_flags.push(flag);
        applied
    }

    pub fn add_merit(&mut self, merit: impl Into<String>) {
        self.metrics.merits.push(merit.into());
    }

    pub fn add_risk_flag(&mut self, flag: impl Into<String>) {
        self.metrics.risk_flags.push(flag.into());
    }

    /// Registra um contrato; retorna `true` se for inédito
    pub fn record_contract(&mut self, address: Address) -> bool {
        self.unique_contracts.insert(address)
    }

    pub fn unique_contract_count(&self) -> usize {
        self.unique_contracts.len()
    }

    pub fn metrics(&self) -> &ReputationMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut ReputationMetrics {
        &mut self.metrics
    }

    pub fn transaction_stats(&self) -> Option<&TransactionStats> {
        self.transaction_stats.as_ref()
    }

    pub fn set_transaction_stats(&mut self, stats: TransactionStats) {
        self.transaction_stats = Some(stats);
    }

    /// Finaliza o acumulador: pontuação limitada a `[0, 100]` e arredondada
    pub fn finish(mut self) -> (u8, ReputationMetrics) {
        self.metrics.unique_contract_count = self.unique_contracts.len();
        let score = sanitize(self.score).clamp(0.0, 100.0).round() as u8;
        (score, self.metrics)
    }
}

/// Divisão que retorna zero quando o denominador é zero
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        sanitize(numerator / denominator)
    }
}

pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Regra de pontuação aplicada em ordem pelo pipeline
pub trait ScoringRule: Send + Sync {
    /// Nome da regra para logs
    fn name(&self) -> &'static str;

    /// Aplica a regra ao acumulador
    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError>;
}

/// Pipeline de regras executadas sequencialmente
#[derive(Default)]
pub struct RulePipeline {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl RulePipeline {
    /// Cria pipeline vazio
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Pipeline com todas as regras na ordem padrão
    pub fn standard() -> Self {
        Self::new()
            .push(TransactionPassRule)
            .push(ActivityPatternRule)
            .push(DiversityRule)
            .push(RecencyRule)
            .push(TokenHoldingRule)
            .push(BalanceRule)
            .push(InternalCallRule)
            .push(TokenTransferRule)
            .push(BalanceHistoryRule)
            .push(CountersRule)
    }

    /// Adiciona uma regra ao pipeline
    pub fn push<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Executa as regras em sequência.
    ///
    /// Uma regra que falha gera a flag `Error analyzing <assunto>` e mantém o
    /// que já havia sido acumulado.
    pub fn run(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) {
        for rule in &self.rules {
            let before = acc.score();
            match rule.apply(ctx, acc) {
                Ok(()) => debug!(rule = rule.name(), delta = acc.score() - before, "regra aplicada"),
                Err(err) => {
                    warn!(rule = rule.name(), error = %err, "falha ao aplicar regra");
                    acc.add_risk_flag(format!("Error analyzing {}", err.subject()));
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::engine::build_lists;
    use chrono::TimeZone;

    /// Instante fixo usado pelos testes de regra
    pub fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    pub struct Fixture {
        pub wallet: WalletSnapshot,
        pub transactions: Option<TransactionList>,
        pub tokens: Option<TokenHoldingList>,
        pub enhanced: EnhancedData,
        pub config: ReputationConfig,
        pub lists: AddressLists,
    }

    impl Default for Fixture {
        fn default() -> Self {
            let config = ReputationConfig::default();
            let lists = build_lists(&config);
            Self {
                wallet: WalletSnapshot::default(),
                transactions: None,
                tokens: None,
                enhanced: EnhancedData::default(),
                config,
                lists,
            }
        }
    }

    impl Fixture {
        pub fn ctx(&self) -> RuleContext<'_> {
            RuleContext {
                wallet: &self.wallet,
                transactions: self.transactions.as_ref(),
                tokens: self.tokens.as_ref(),
                enhanced: &self.enhanced,
                config: &self.config,
                lists: &self.lists,
                as_of: as_of(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Fixture;
    use super::*;

    struct Failing;

    impl ScoringRule for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(&self, _ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
            acc.adjust(5.0);
            Err(RuleError::MalformedRecords { subject: "test data", count: 1 })
        }
    }

    struct Bonus;

    impl ScoringRule for Bonus {
        fn name(&self) -> &'static str {
            "bonus"
        }

        fn apply(&self, _ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
            acc.reward(2.0, "bonus");
            Ok(())
        }
    }

    #[test]
    fn failing_rule_keeps_partial_work_and_continues() {
        let fixture = Fixture::default();
        let mut acc = ScoreAccumulator::new(10.0);
        RulePipeline::new().push(Failing).push(Bonus).run(&fixture.ctx(), &mut acc);
        assert_eq!(acc.score(), 17.0);
        assert_eq!(acc.metrics().risk_flags, vec!["Error analyzing test data".to_string()]);
        assert_eq!(acc.metrics().merits, vec!["bonus".to_string()]);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut acc = ScoreAccumulator::new(40.0);
        assert_eq!(acc.adjust(f64::NAN), 0.0);
        assert_eq!(acc.adjust(f64::INFINITY), 0.0);
        assert_eq!(acc.score(), 40.0);
    }

    #[test]
    fn finish_clamps_and_rounds() {
        let mut acc = ScoreAccumulator::new(40.0);
        acc.adjust(500.0);
        assert_eq!(acc.finish().0, 100);

        let mut acc = ScoreAccumulator::new(40.0);
        acc.adjust(-500.0);
        assert_eq!(acc.finish().0, 0);

        let mut acc = ScoreAccumulator::new(40.0);
        acc.adjust(2.5);
        assert_eq!(acc.finish().0, 43);
    }

    #[test]
    fn ratio_with_zero_denominator_is_zero() {
        assert_eq!(ratio(3.0, 0.0), 0.0);
        assert_eq!(ratio(1.0, 4.0), 0.25);
    }

    #[test]
    fn standard_pipeline_has_every_rule() {
        assert_eq!(RulePipeline::standard().len(), 10);
    }
}
