use crate::grade::{Badge, Grade, RiskLevel};
use serde::{Deserialize, Serialize};

/// Flag registrada quando não há dados da carteira
pub const INSUFFICIENT_DATA_FLAG: &str = "Insufficient wallet data for reputation analysis";

/// Métricas agregadas durante a análise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationMetrics {
    /// Volume total em ether
    pub total_volume: f64,
    pub transaction_count: usize,
    pub average_transaction_value: f64,
    pub unique_contract_count: usize,
    pub risk_flags: Vec<String>,
    pub merits: Vec<String>,
    pub diversity_score: f64,
    pub frequency_score: f64,
    pub balance_stability: f64,
    pub internal_tx_count: usize,
    pub token_transfer_count: usize,
    pub contract_interaction_depth: usize,
    /// Interações com contratos verificados / interações com contratos
    pub verified_contract_ratio: f64,
    pub dust_transaction_count: usize,
    pub max_daily_transactions: usize,
    pub recent_transaction_count: usize,
}

/// Resultado final da análise de reputação
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationResult {
    /// Pontuação entre 0 e 100
    pub score: u8,
    pub grade: Grade,
    pub badge: Badge,
    pub risk_level: RiskLevel,
    pub metrics: ReputationMetrics,
}

impl ReputationResult {
    /// Monta o resultado a partir de uma pontuação já limitada
    pub fn from_score(score: u8, metrics: ReputationMetrics) -> Self {
        let badge = Badge::from_score(score);
        Self {
            score,
            grade: Grade::from_score(score),
            risk_level: badge.risk_level(),
            badge,
            metrics,
        }
    }

    /// Resultado para carteira desconhecida.
    ///
    /// A nota é fixa em `D`, independente da tabela de notas.
    pub fn insufficient_data(score: u8) -> Self {
        let metrics = ReputationMetrics {
            risk_flags: vec![INSUFFICIENT_DATA_FLAG.to_string()],
            ..Default::default()
        };
        let badge = Badge::from_score(score);
        Self {
            score,
            grade: Grade::D,
            risk_level: RiskLevel::Medium,
            badge,
            metrics,
        }
    }

    pub fn unique_contract_count(&self) -> usize {
        self.metrics.unique_contract_count
    }

    pub fn risk_flags(&self) -> &[String] {
        &self.metrics.risk_flags
    }

    pub fn merits(&self) -> &[String] {
        &self.metrics.merits
    }
}
