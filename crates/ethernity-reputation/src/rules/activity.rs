use super::{RuleContext, RuleError, ScoreAccumulator, ScoringRule};
use chrono::Duration;

/// Diversidade de contratos: bônus não linear acima do mínimo, penalidade
/// proporcional abaixo dele
pub struct DiversityRule;

impl ScoringRule for DiversityRule {
    fn name(&self) -> &'static str {
        "contract-diversity"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        if ctx.transactions.is_none() {
            return Ok(());
        }
        let d = &ctx.config.diversity;
        let unique = acc.unique_contract_count();

        let delta = if unique >= d.min_contracts {
            let bonus = (d.bonus_factor * (unique as f64).sqrt()).min(d.max_bonus);
            acc.adjust(bonus)
        } else {
            let missing = (d.min_contracts - unique) as f64;
            acc.penalize(
                d.penalty_per_missing * missing,
                format!(
                    "Low contract diversity: {} unique contract{}",
                    unique,
                    if unique == 1 { "" } else { "s" }
                ),
            )
        };
        acc.metrics_mut().diversity_score = delta;
        Ok(())
    }
}

/// Frequência recente: bônus para atividade moderada, penalidade para
/// atividade excessiva (bot) ou quase nula
pub struct RecencyRule;

impl ScoringRule for RecencyRule {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(transactions) = ctx.transactions else {
            return Ok(());
        };
        let r = &ctx.config.recency;
        let window = Duration::days(r.window_days);

        let recent = transactions
            .iter()
            .filter_map(|tx| tx.timestamp)
            .filter(|ts| ctx.as_of.signed_duration_since(*ts) <= window)
            .count();

        let delta = if recent >= r.bot_threshold {
            acc.penalize(r.bot_penalty, "High frequency activity detected - possible bot")
        } else if recent < r.low_threshold {
            acc.penalize(r.low_penalty, "Low recent activity")
        } else {
            acc.adjust((recent as f64 * r.bonus_per_transaction).min(r.max_bonus))
        };

        let metrics = acc.metrics_mut();
        metrics.recent_transaction_count = recent;
        metrics.frequency_score = delta;
        Ok(())
    }
}
