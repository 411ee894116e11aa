use ethernity_core::{error::Result, Error};
use serde::{Deserialize, Serialize};

/// Endereços de mixers e contratos associados a golpes
pub const DEFAULT_RISKY_CONTRACTS: &[&str] = &[
    "0x47ce0c6ed5b0ce3d3a51fdb1c52dc66a7c3c2b63", // Tornado Cash 1 ETH
    "0x12d66f87a04a9e220743712ce6d9bb1b5616b8fc", // Tornado Cash 0.1 ETH
    "0x910cbd523d972eb0a6f4cae4618ad62622b39dbf", // Tornado Cash 10 ETH
    "0xa160cdab225685da1d56aa342ad8841c3b53f291", // Tornado Cash 100 ETH
    "0x722122df12d4e14e13ac3b6895a86e84145b6967", // Tornado Cash Router
];

/// Endereços de protocolos conhecidos
pub const DEFAULT_VERIFIED_CONTRACTS: &[&str] = &[
    "0xa0b86a33e6c741a05a2a2c9b823c72bf23a46104",
    "0x7a250d5630b4cf539739df2c5dacb4c659f2488d", // Uniswap V2 Router
    "0xe592427a0aece92de3edee1f18e0157c05861564", // Uniswap V3 Router
    "0x3fc91a3afd70395cd496c647d5a6cc9d4b2b7fad", // Uniswap Universal Router
    "0x87870bca3f3fd6335c3f4ce8392d69350b4fa4e2", // Aave V3 Pool
    "0x1111111254eeb25477b68fb85ed929f73a960582", // 1inch V5 Router
];

/// Configuração completa do motor de reputação
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Pontuação inicial antes de qualquer regra
    pub base_score: f64,
    /// Pontuação do resultado padrão (carteira desconhecida)
    pub default_score: u8,
    pub contracts: ContractRules,
    pub patterns: PatternThresholds,
    pub diversity: DiversityThresholds,
    pub recency: RecencyThresholds,
    pub tokens: TokenThresholds,
    pub balance: BalanceThresholds,
    pub internal_calls: InternalCallThresholds,
    pub token_transfers: TokenTransferThresholds,
    pub stability: StabilityThresholds,
    pub counters: CounterThresholds,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            base_score: 40.0,
            default_score: 30,
            contracts: ContractRules::default(),
            patterns: PatternThresholds::default(),
            diversity: DiversityThresholds::default(),
            recency: RecencyThresholds::default(),
            tokens: TokenThresholds::default(),
            balance: BalanceThresholds::default(),
            internal_calls: InternalCallThresholds::default(),
            token_transfers: TokenTransferThresholds::default(),
            stability: StabilityThresholds::default(),
            counters: CounterThresholds::default(),
        }
    }
}

impl ReputationConfig {
    /// Carrega a configuração de um documento JSON; campos ausentes usam o padrão
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::DecodeError(format!("Configuração de reputação inválida: {}", e)))
    }
}

/// Listas estáticas de contratos e seus pesos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRules {
    pub risky_contracts: Vec<String>,
    pub verified_contracts: Vec<String>,
    /// Penalidade por transação para contrato de risco
    pub risky_penalty: f64,
    /// Bônus por transação para contrato verificado
    pub verified_bonus: f64,
}

impl Default for ContractRules {
    fn default() -> Self {
        Self {
            risky_contracts: DEFAULT_RISKY_CONTRACTS.iter().map(|s| s.to_string()).collect(),
            verified_contracts: DEFAULT_VERIFIED_CONTRACTS.iter().map(|s| s.to_string()).collect(),
            risky_penalty: 15.0,
            verified_bonus: 3.0,
        }
    }
}

/// Limiares para detecção de padrões suspeitos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternThresholds {
    pub burst_heavy_per_day: usize,
    pub burst_light_per_day: usize,
    pub burst_heavy_penalty: f64,
    pub burst_light_penalty: f64,

    /// Valor (em ether) abaixo do qual uma transação não nula é poeira
    pub dust_value: f64,
    pub dust_min_sample: usize,
    pub dust_heavy_ratio: f64,
    pub dust_light_ratio: f64,
    pub dust_heavy_penalty: f64,
    pub dust_light_penalty: f64,

    /// Casas decimais usadas para agrupar valores repetidos
    pub repeat_rounding_decimals: i32,
    pub repeat_min_sample: usize,
    pub repeat_heavy_ratio: f64,
    pub repeat_light_ratio: f64,
    pub repeat_heavy_penalty: f64,
    pub repeat_light_penalty: f64,

    pub wash_min_transactions: usize,
    pub wash_max_volume: f64,
    pub wash_penalty: f64,

    pub activity_severe_floor: usize,
    pub activity_floor: usize,
    pub activity_severe_penalty: f64,
    pub activity_penalty: f64,

    pub volume_severe_floor: f64,
    pub volume_floor: f64,
    pub volume_severe_penalty: f64,
    pub volume_penalty: f64,
}

impl Default for PatternThresholds {
    fn default() -> Self {
        Self {
            burst_heavy_per_day: 50,
            burst_light_per_day: 20,
            burst_heavy_penalty: 15.0,
            burst_light_penalty: 8.0,

            dust_value: 0.0001,
            dust_min_sample: 5,
            dust_heavy_ratio: 0.5,
            dust_light_ratio: 0.25,
            dust_heavy_penalty: 15.0,
            dust_light_penalty: 7.0,

            repeat_rounding_decimals: 4,
            repeat_min_sample: 5,
            repeat_heavy_ratio: 0.7,
            repeat_light_ratio: 0.4,
            repeat_heavy_penalty: 12.0,
            repeat_light_penalty: 6.0,

            wash_min_transactions: 20,
            wash_max_volume: 0.01,
            wash_penalty: 15.0,

            activity_severe_floor: 2,
            activity_floor: 5,
            activity_severe_penalty: 10.0,
            activity_penalty: 5.0,

            volume_severe_floor: 0.01,
            volume_floor: 0.1,
            volume_severe_penalty: 8.0,
            volume_penalty: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityThresholds {
    pub min_contracts: usize,
    /// Multiplicador aplicado a `sqrt(contratos únicos)`
    pub bonus_factor: f64,
    pub max_bonus: f64,
    /// Penalidade por contrato faltante abaixo do mínimo
    pub penalty_per_missing: f64,
}

impl Default for DiversityThresholds {
    fn default() -> Self {
        Self {
            min_contracts: 3,
            bonus_factor: 4.0,
            max_bonus: 15.0,
            penalty_per_missing: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyThresholds {
    pub window_days: i64,
    pub bot_threshold: usize,
    pub bot_penalty: f64,
    pub low_threshold: usize,
    pub low_penalty: f64,
    pub bonus_per_transaction: f64,
    pub max_bonus: f64,
}

impl Default for RecencyThresholds {
    fn default() -> Self {
        Self {
            window_days: 30,
            bot_threshold: 100,
            bot_penalty: 10.0,
            low_threshold: 2,
            low_penalty: 5.0,
            bonus_per_transaction: 0.5,
            max_bonus: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenThresholds {
    pub min_tokens: usize,
    pub bonus_per_token: f64,
    pub max_bonus: f64,
    pub empty_penalty: f64,
}

impl Default for TokenThresholds {
    fn default() -> Self {
        Self {
            min_tokens: 3,
            bonus_per_token: 1.5,
            max_bonus: 10.0,
            empty_penalty: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceThresholds {
    /// Saldo (ether) acima do qual há bônus logarítmico
    pub bonus_threshold: f64,
    pub log_factor: f64,
    pub max_bonus: f64,
    /// Saldo (ether) abaixo do qual a carteira é considerada vazia
    pub dust_threshold: f64,
    pub dust_penalty: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            bonus_threshold: 0.1,
            log_factor: 4.0,
            max_bonus: 10.0,
            dust_threshold: 0.001,
            dust_penalty: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalCallThresholds {
    pub sophisticated_depth: usize,
    pub bonus_per_call: f64,
    pub max_bonus: f64,
    pub shallow_depth: usize,
    pub shallow_penalty: f64,
}

impl Default for InternalCallThresholds {
    fn default() -> Self {
        Self {
            sophisticated_depth: 10,
            bonus_per_call: 0.8,
            max_bonus: 12.0,
            shallow_depth: 2,
            shallow_penalty: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenTransferThresholds {
    pub diverse_tokens: usize,
    pub bonus_per_token: f64,
    pub max_bonus: f64,
    pub narrow_tokens: usize,
    pub narrow_penalty: f64,
}

impl Default for TokenTransferThresholds {
    fn default() -> Self {
        Self {
            diverse_tokens: 5,
            bonus_per_token: 1.0,
            max_bonus: 10.0,
            narrow_tokens: 2,
            narrow_penalty: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityThresholds {
    pub stable_volatility: f64,
    pub moderate_volatility: f64,
    pub volatile_volatility: f64,
    pub stable_bonus: f64,
    pub moderate_bonus: f64,
    pub volatile_penalty: f64,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            stable_volatility: 0.05,
            moderate_volatility: 0.15,
            volatile_volatility: 0.5,
            stable_bonus: 8.0,
            moderate_bonus: 4.0,
            volatile_penalty: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterThresholds {
    pub validator_bonus: f64,
    pub efficient_gas: f64,
    pub efficient_gas_bonus: f64,
    pub acceptable_gas: f64,
    pub acceptable_gas_bonus: f64,
    pub excessive_gas: f64,
    pub excessive_gas_penalty: f64,
}

impl Default for CounterThresholds {
    fn default() -> Self {
        Self {
            validator_bonus: 20.0,
            efficient_gas: 50_000.0,
            efficient_gas_bonus: 5.0,
            acceptable_gas: 100_000.0,
            acceptable_gas_bonus: 3.0,
            excessive_gas: 500_000.0,
            excessive_gas_penalty: 5.0,
        }
    }
}
