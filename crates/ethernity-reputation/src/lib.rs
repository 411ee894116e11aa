/*!
 * Ethernity Reputation
 *
 * Motor de reputação de carteiras. Combina histórico de transações, tokens,
 * transações internas, histórico de saldo e contadores on-chain em uma
 * pontuação de 0 a 100, uma nota, um selo e listas de flags e méritos.
 *
 * O motor é puro e síncrono: não faz I/O e não guarda estado entre chamadas.
 */

pub mod config;
pub mod engine;
pub mod grade;
pub mod input;
pub mod result;
pub mod rules;

// Re-exportações públicas
pub use config::ReputationConfig;
pub use engine::{compute_reputation, ReputationEngine};
pub use grade::{Badge, BadgeTier, Grade, RiskLevel};
pub use input::{EnhancedData, ReputationInput};
pub use result::{ReputationMetrics, ReputationResult, INSUFFICIENT_DATA_FLAG};
pub use rules::{RuleError, RulePipeline, ScoringRule};
