use super::{ratio, RuleContext, RuleError, ScoreAccumulator, ScoringRule};
use chrono::NaiveDate;
use ethernity_core::utils::{format_address, wei_to_ether};
use std::collections::{BTreeMap, HashMap};

/// Estatísticas coletadas na passagem pelas transações
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStats {
    pub count: usize,
    pub total_volume: f64,
    /// Valor de cada transação em ether, na ordem de entrada
    pub values: Vec<f64>,
    pub daily_counts: BTreeMap<NaiveDate, usize>,
    pub dust_count: usize,
    pub contract_interactions: usize,
    pub verified_interactions: usize,
}

impl TransactionStats {
    pub fn max_daily(&self) -> usize {
        self.daily_counts.values().copied().max().unwrap_or(0)
    }

    /// Fração de transações com valor de poeira
    pub fn dust_ratio(&self) -> f64 {
        ratio(self.dust_count as f64, self.count as f64)
    }

    pub fn nonzero_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| *v > 0.0)
    }

    /// Razão entre a frequência do valor mais repetido e o total de valores
    /// não nulos, agrupando por `decimals` casas decimais
    pub fn repeated_value_ratio(&self, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        let mut buckets: HashMap<u128, usize> = HashMap::new();
        let mut nonzero = 0usize;
        for value in self.nonzero_values() {
            nonzero += 1;
            *buckets.entry((value * scale).round() as u128).or_insert(0) += 1;
        }
        let top = buckets.values().copied().max().unwrap_or(0);
        ratio(top as f64, nonzero as f64)
    }
}

/// Passagem principal pelas transações: volume, contratos, listas estáticas,
/// distribuição diária e poeira
pub struct TransactionPassRule;

impl ScoringRule for TransactionPassRule {
    fn name(&self) -> &'static str {
        "transaction-pass"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(transactions) = ctx.transactions else {
            return Ok(());
        };
        let rules = &ctx.config.contracts;
        let mut stats = TransactionStats {
            count: transactions.len(),
            ..Default::default()
        };

        for tx in transactions {
            let value = tx.value.as_ref().map(wei_to_ether).unwrap_or(0.0);
            stats.total_volume += value;
            stats.values.push(value);

            if value > 0.0 && value < ctx.config.patterns.dust_value {
                stats.dust_count += 1;
            }

            if let Some(ts) = tx.timestamp {
                *stats.daily_counts.entry(ts.date_naive()).or_insert(0) += 1;
            }

            let Some(to) = tx.to.as_ref() else { continue };
            let Some(contract) = to.contract_address() else { continue };

            acc.record_contract(contract);
            stats.contract_interactions += 1;

            if ctx.lists.risky.contains(&contract) {
                acc.penalize(
                    rules.risky_penalty,
                    format!("Interaction with risky contract: {}", format_address(&contract)),
                );
            }

            if ctx.lists.verified.contains(&contract) || to.verified() {
                stats.verified_interactions += 1;
                acc.reward(
                    rules.verified_bonus,
                    format!("Interaction with verified contract: {}", format_address(&contract)),
                );
            }
        }

        let metrics = acc.metrics_mut();
        metrics.transaction_count = stats.count;
        metrics.total_volume = stats.total_volume;
        metrics.average_transaction_value = stats.total_volume / stats.count.max(1) as f64;
        metrics.dust_transaction_count = stats.dust_count;
        metrics.max_daily_transactions = stats.max_daily();
        metrics.verified_contract_ratio = ratio(
            stats.verified_interactions as f64,
            stats.contract_interactions as f64,
        );

        acc.set_transaction_stats(stats);
        RuleError::check_rejected("transaction data", transactions.rejected())
    }
}

/// Penalidades por padrões de atividade: rajadas diárias, poeira, valores
/// repetidos, wash trading e pisos de atividade e volume
pub struct ActivityPatternRule;

impl ScoringRule for ActivityPatternRule {
    fn name(&self) -> &'static str {
        "activity-patterns"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(stats) = acc.transaction_stats().cloned() else {
            return Ok(());
        };
        let p = &ctx.config.patterns;

        let max_daily = stats.max_daily();
        if max_daily > p.burst_heavy_per_day {
            acc.penalize(
                p.burst_heavy_penalty,
                format!("Burst activity: {} transactions in a single day", max_daily),
            );
        } else if max_daily > p.burst_light_per_day {
            acc.penalize(
                p.burst_light_penalty,
                format!("Elevated daily activity: {} transactions in a single day", max_daily),
            );
        }

        if stats.count >= p.dust_min_sample {
            let dust = stats.dust_ratio();
            if dust > p.dust_heavy_ratio {
                acc.penalize(
                    p.dust_heavy_penalty,
                    format!("Dust transaction pattern: {:.0}% of transactions", dust * 100.0),
                );
            } else if dust > p.dust_light_ratio {
                acc.penalize(
                    p.dust_light_penalty,
                    format!("Frequent dust transactions: {:.0}% of transactions", dust * 100.0),
                );
            }
        }

        if stats.nonzero_values().count() >= p.repeat_min_sample {
            let repeated = stats.repeated_value_ratio(p.repeat_rounding_decimals);
            if repeated > p.repeat_heavy_ratio {
                acc.penalize(
                    p.repeat_heavy_penalty,
                    format!("Bot-like uniform payments: {:.0}% identical values", repeated * 100.0),
                );
            } else if repeated > p.repeat_light_ratio {
                acc.penalize(
                    p.repeat_light_penalty,
                    format!("Repetitive payment values: {:.0}% identical values", repeated * 100.0),
                );
            }
        }

        if stats.count >= p.wash_min_transactions && stats.total_volume < p.wash_max_volume {
            acc.penalize(
                p.wash_penalty,
                "High transaction count with negligible volume - possible wash or spam activity",
            );
        }

        if stats.count < p.activity_severe_floor {
            acc.penalize(p.activity_severe_penalty, "Very limited transaction history");
        } else if stats.count < p.activity_floor {
            acc.penalize(p.activity_penalty, "Limited transaction history");
        }

        if stats.total_volume < p.volume_severe_floor {
            acc.penalize(p.volume_severe_penalty, "Negligible transaction volume");
        } else if stats.total_volume < p.volume_floor {
            acc.penalize(p.volume_penalty, "Low transaction volume");
        }

        Ok(())
    }
}
