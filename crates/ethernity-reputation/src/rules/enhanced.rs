use super::{ratio, RuleContext, RuleError, ScoreAccumulator, ScoringRule};
use ethernity_core::types::BalanceSample;
use ethernity_core::utils::u256_to_f64_lossy;
use std::collections::HashSet;

/// Profundidade de interação com contratos via transações internas
pub struct InternalCallRule;

impl ScoringRule for InternalCallRule {
    fn name(&self) -> &'static str {
        "internal-calls"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(calls) = ctx.enhanced.internal_transactions.as_ref() else {
            return Ok(());
        };
        if calls.is_empty() && calls.rejected() == 0 {
            return Ok(());
        }
        let t = &ctx.config.internal_calls;

        let mut depth = 0usize;
        for call in calls {
            if let Some(contract) = call.to.as_ref().and_then(|to| to.contract_address()) {
                depth += 1;
                acc.record_contract(contract);
            }
        }

        let metrics = acc.metrics_mut();
        metrics.internal_tx_count = calls.len();
        metrics.contract_interaction_depth = depth;

        if depth > t.sophisticated_depth {
            acc.reward(
                (depth as f64 * t.bonus_per_call).min(t.max_bonus),
                "Sophisticated user - deep contract interaction",
            );
        } else if depth < t.shallow_depth {
            acc.penalize(t.shallow_penalty, "Minimal contract interaction depth");
        }

        RuleError::check_rejected("internal transactions", calls.rejected())
    }
}

/// Diversidade de tokens transferidos
pub struct TokenTransferRule;

impl ScoringRule for TokenTransferRule {
    fn name(&self) -> &'static str {
        "token-transfers"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(transfers) = ctx.enhanced.token_transfers.as_ref() else {
            return Ok(());
        };
        if transfers.is_empty() && transfers.rejected() == 0 {
            return Ok(());
        }
        let t = &ctx.config.token_transfers;

        let distinct: HashSet<_> = transfers.iter().filter_map(|tr| tr.token_address()).collect();
        acc.metrics_mut().token_transfer_count = transfers.len();

        if distinct.len() >= t.diverse_tokens {
            acc.reward(
                (distinct.len() as f64 * t.bonus_per_token).min(t.max_bonus),
                format!("Diverse token activity - {} distinct tokens transferred", distinct.len()),
            );
        } else if distinct.len() < t.narrow_tokens {
            acc.penalize(t.narrow_penalty, "Narrow token transfer activity");
        }

        RuleError::check_rejected("token transfers", transfers.rejected())
    }
}

/// Volatilidade média do histórico de saldo: média de `|Δ| / anterior` entre
/// amostras consecutivas em ordem cronológica
pub fn average_volatility(samples: &[BalanceSample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mut ordered: Vec<&BalanceSample> = samples.iter().collect();
    // amostras sem data vão para o fim, mantendo a ordem original (sort estável)
    ordered.sort_by_key(|s| (s.timestamp.is_none(), s.timestamp));

    let values: Vec<f64> = ordered
        .iter()
        .map(|s| s.value.as_ref().map(u256_to_f64_lossy).unwrap_or(0.0))
        .collect();

    let total: f64 = values
        .windows(2)
        .map(|pair| ratio((pair[1] - pair[0]).abs(), pair[0]))
        .sum();
    ratio(total, (values.len() - 1) as f64)
}

/// Estabilidade do saldo ao longo do tempo
pub struct BalanceHistoryRule;

impl ScoringRule for BalanceHistoryRule {
    fn name(&self) -> &'static str {
        "balance-history"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(history) = ctx.enhanced.balance_history.as_ref() else {
            return Ok(());
        };
        let s = &ctx.config.stability;

        if history.len() >= 2 {
            let volatility = average_volatility(history.items());
            let delta = if volatility <= s.stable_volatility {
                acc.reward(s.stable_bonus, "Stable balance management")
            } else if volatility < s.moderate_volatility {
                acc.reward(s.moderate_bonus, "Moderately stable balance")
            } else if volatility > s.volatile_volatility {
                acc.penalize(s.volatile_penalty, "Highly volatile balance")
            } else {
                0.0
            };
            acc.metrics_mut().balance_stability = delta;
        }

        RuleError::check_rejected("balance history", history.rejected())
    }
}

/// Contadores do endereço: validação e eficiência de gas
pub struct CountersRule;

impl ScoringRule for CountersRule {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(counters) = ctx.enhanced.counters.as_ref() else {
            return Ok(());
        };
        let c = &ctx.config.counters;

        if counters.validations_count.unwrap_or(0) > 0 {
            acc.reward(c.validator_bonus, "Network validator - contributes to security");
        }

        let tx_count = counters.transactions_count.unwrap_or(0);
        let gas = counters.gas_usage_count.filter(|gas| *gas > 0 && tx_count > 0);
        if let Some(gas) = gas {
            let avg_gas = ratio(gas as f64, tx_count as f64);
            if avg_gas < c.efficient_gas {
                acc.reward(c.efficient_gas_bonus, "Highly efficient gas usage");
            } else if avg_gas < c.acceptable_gas {
                acc.reward(c.acceptable_gas_bonus, "Efficient gas usage");
            } else if avg_gas > c.excessive_gas {
                acc.penalize(c.excessive_gas_penalty, "Unusually high gas usage per transaction");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Fixture;
    use super::*;
    use crate::input::EnhancedData;
    use chrono::{Duration, TimeZone, Utc};
    use ethereum_types::{Address, U256};
    use ethernity_core::types::{Counterparty, Counters, InternalCall, TokenInfo, TokenTransfer};
    use ethernity_core::RecordList;

    fn internal_call(n: u64, contract: bool) -> InternalCall {
        InternalCall {
            to: Some(Counterparty {
                hash: Some(Address::from_low_u64_be(n)),
                is_contract: Some(contract),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn apply_rule<R: ScoringRule>(rule: R, enhanced: EnhancedData) -> ScoreAccumulator {
        let fixture = Fixture {
            enhanced,
            ..Default::default()
        };
        let mut acc = ScoreAccumulator::new(0.0);
        rule.apply(&fixture.ctx(), &mut acc).unwrap();
        acc
    }

    #[test]
    fn deep_internal_interaction_is_rewarded() {
        let calls = (0..12).map(|n| internal_call(n % 4, true)).collect();
        let acc = apply_rule(
            InternalCallRule,
            EnhancedData {
                internal_transactions: Some(calls),
                ..Default::default()
            },
        );
        assert!((acc.score() - 9.6).abs() < 1e-9);
        assert_eq!(acc.metrics().contract_interaction_depth, 12);
        assert_eq!(acc.unique_contract_count(), 4);
        assert_eq!(acc.metrics().merits, vec!["Sophisticated user - deep contract interaction".to_string()]);
    }

    #[test]
    fn shallow_internal_interaction_is_penalized() {
        let calls = vec![internal_call(1, false), internal_call(2, true)];
        let acc = apply_rule(
            InternalCallRule,
            EnhancedData {
                internal_transactions: Some(RecordList::new(calls)),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), -3.0);
        assert_eq!(acc.metrics().internal_tx_count, 2);
    }

    #[test]
    fn empty_enhanced_lists_are_no_signal() {
        let acc = apply_rule(
            InternalCallRule,
            EnhancedData {
                internal_transactions: Some(RecordList::default()),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 0.0);

        let acc = apply_rule(
            TokenTransferRule,
            EnhancedData {
                token_transfers: Some(RecordList::default()),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 0.0);
        assert!(acc.metrics().risk_flags.is_empty());
    }

    fn transfer(token: u64) -> TokenTransfer {
        TokenTransfer {
            token: Some(TokenInfo {
                address: Some(Address::from_low_u64_be(token)),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn token_transfer_diversity() {
        let transfers = (0..14).map(|n| transfer(n % 7)).collect();
        let acc = apply_rule(
            TokenTransferRule,
            EnhancedData {
                token_transfers: Some(transfers),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 7.0);
        assert_eq!(acc.metrics().token_transfer_count, 14);
        assert_eq!(
            acc.metrics().merits,
            vec!["Diverse token activity - 7 distinct tokens transferred".to_string()]
        );

        let narrow = (0..5).map(|_| transfer(1)).collect();
        let acc = apply_rule(
            TokenTransferRule,
            EnhancedData {
                token_transfers: Some(narrow),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), -3.0);
    }

    fn sample(value: u64, hour: i64) -> BalanceSample {
        BalanceSample {
            value: Some(U256::from(value)),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)),
            block_number: None,
        }
    }

    #[test]
    fn volatility_uses_chronological_order() {
        // fora de ordem na entrada; em ordem cronológica: 100 -> 110 -> 121
        let samples = vec![sample(121, 2), sample(100, 0), sample(110, 1)];
        assert!((average_volatility(&samples) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_previous_balance_contributes_nothing() {
        let samples = vec![sample(0, 0), sample(100, 1), sample(100, 2)];
        assert_eq!(average_volatility(&samples), 0.0);
    }

    #[test]
    fn stable_history_grants_single_bonus() {
        let samples = (0..10).map(|i| sample(1_000 + i as u64 * 10, i)).collect();
        let acc = apply_rule(
            BalanceHistoryRule,
            EnhancedData {
                balance_history: Some(samples),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 8.0);
        assert_eq!(acc.metrics().balance_stability, 8.0);
        assert_eq!(acc.metrics().merits, vec!["Stable balance management".to_string()]);
    }

    #[test]
    fn volatility_at_stable_threshold_counts_as_stable() {
        let samples = vec![sample(100, 0), sample(105, 1)];
        assert_eq!(average_volatility(&samples), 0.05);
        let acc = apply_rule(
            BalanceHistoryRule,
            EnhancedData {
                balance_history: Some(RecordList::new(samples)),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 8.0);
        assert_eq!(acc.metrics().merits, vec!["Stable balance management".to_string()]);
    }

    #[test]
    fn moderate_volatility_earns_smaller_bonus() {
        let samples = vec![sample(100, 0), sample(110, 1)];
        let acc = apply_rule(
            BalanceHistoryRule,
            EnhancedData {
                balance_history: Some(RecordList::new(samples)),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 4.0);
        assert_eq!(acc.metrics().balance_stability, 4.0);
        assert_eq!(acc.metrics().merits, vec!["Moderately stable balance".to_string()]);
    }

    #[test]
    fn volatile_history_is_penalized() {
        let samples = vec![sample(100, 0), sample(300, 1), sample(50, 2)];
        let acc = apply_rule(
            BalanceHistoryRule,
            EnhancedData {
                balance_history: Some(RecordList::new(samples)),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), -6.0);
        assert_eq!(acc.metrics().risk_flags, vec!["Highly volatile balance".to_string()]);
    }

    #[test]
    fn single_sample_is_ignored() {
        let acc = apply_rule(
            BalanceHistoryRule,
            EnhancedData {
                balance_history: Some(RecordList::new(vec![sample(5, 0)])),
                ..Default::default()
            },
        );
        assert_eq!(acc.score(), 0.0);
    }

    fn counters(tx: Option<u64>, gas: Option<u64>, validations: Option<u64>) -> EnhancedData {
        EnhancedData {
            counters: Some(Counters {
                transactions_count: tx,
                gas_usage_count: gas,
                validations_count: validations,
                token_transfers_count: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn validator_and_gas_tiers() {
        let acc = apply_rule(CountersRule, counters(Some(10), Some(400_000), Some(3)));
        assert_eq!(acc.score(), 25.0);
        assert_eq!(acc.metrics().merits.len(), 2);

        let acc = apply_rule(CountersRule, counters(Some(10), Some(800_000), None));
        assert_eq!(acc.score(), 3.0);

        let acc = apply_rule(CountersRule, counters(Some(10), Some(6_000_000), None));
        assert_eq!(acc.score(), -5.0);

        // entre 100k e 500k: neutro
        let acc = apply_rule(CountersRule, counters(Some(10), Some(2_000_000), None));
        assert_eq!(acc.score(), 0.0);
    }

    #[test]
    fn zero_transactions_skip_gas_analysis() {
        let acc = apply_rule(CountersRule, counters(Some(0), Some(1_000), None));
        assert_eq!(acc.score(), 0.0);
        let acc = apply_rule(CountersRule, counters(None, Some(1_000), Some(0)));
        assert_eq!(acc.score(), 0.0);
        // gas zerado com transações não é sinal de eficiência
        let acc = apply_rule(CountersRule, counters(Some(10), Some(0), None));
        assert_eq!(acc.score(), 0.0);
        assert!(acc.metrics().merits.is_empty());
    }
}
