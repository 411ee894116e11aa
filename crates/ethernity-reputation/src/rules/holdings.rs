use super::{RuleContext, RuleError, ScoreAccumulator, ScoringRule};
use ethernity_core::utils::wei_to_ether;

/// Quantidade de tokens mantidos pela carteira
pub struct TokenHoldingRule;

impl ScoringRule for TokenHoldingRule {
    fn name(&self) -> &'static str {
        "token-holdings"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(tokens) = ctx.tokens else {
            return Ok(());
        };
        let t = &ctx.config.tokens;
        let count = tokens.len();

        if count == 0 {
            acc.penalize(t.empty_penalty, "No token holdings");
        } else if count >= t.min_tokens {
            let above = (count - t.min_tokens + 1) as f64;
            acc.reward(
                (t.bonus_per_token * above).min(t.max_bonus),
                format!("Holds {} different tokens", count),
            );
        }

        RuleError::check_rejected("token holdings", tokens.rejected())
    }
}

/// Saldo nativo atual: bônus logarítmico ou penalidade por saldo de poeira
pub struct BalanceRule;

impl ScoringRule for BalanceRule {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn apply(&self, ctx: &RuleContext<'_>, acc: &mut ScoreAccumulator) -> Result<(), RuleError> {
        let Some(wei) = ctx.wallet.balance.as_ref() else {
            return Ok(());
        };
        let b = &ctx.config.balance;
        let balance = wei_to_ether(wei);

        if balance > b.bonus_threshold {
            // log10(saldo / limiar) cresce uma unidade a cada ordem de grandeza
            let bonus = (b.log_factor * (balance / b.bonus_threshold).log10()).clamp(0.0, b.max_bonus);
            acc.reward(bonus, format!("Maintains balance of {:.4} ETH", balance));
        } else if balance < b.dust_threshold {
            acc.penalize(b.dust_penalty, "Dust-level balance");
        }
        Ok(())
    }
}
