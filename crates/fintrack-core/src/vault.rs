use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FintrackError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FintrackResult;

/// Whether a contribution may push the saved amount past the target.
///
/// Capping at the target is the application's embedded policy: it keeps
/// "goal reached" handling a plain equality and the progress bar at 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapPolicy {
    #[default]
    CapAtTarget,
    AllowOverflow,
}

/// Input for funding one savings-vault item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultFundingInput {
    /// Amount saved so far.
    pub current_amount: Money,
    /// Savings goal for the item.
    pub target_amount: Money,
    /// Contribution to apply.
    pub amount: Money,
    #[serde(default)]
    pub cap_policy: CapPolicy,
}

/// Output of [`fund_vault_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultFundingOutput {
    pub new_amount: Money,
    /// Portion of the contribution trimmed by the cap.
    pub capped_amount: Money,
    /// Fraction of the target saved; stays at most 1 under the cap.
    pub progress: Decimal,
    pub goal_reached: bool,
}

/// Apply a contribution to a goal-tracked vault item.
///
/// Pure math over the caller's snapshot; the caller persists `new_amount`.
pub fn fund_vault_item(
    input: &VaultFundingInput,
) -> FintrackResult<ComputationOutput<VaultFundingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.target_amount <= Decimal::ZERO {
        return Err(FintrackError::InvalidAmount {
            context: "target_amount".into(),
            reason: "must be > 0".into(),
        });
    }
    if input.amount <= Decimal::ZERO {
        return Err(FintrackError::InvalidAmount {
            context: "amount".into(),
            reason: "must be > 0".into(),
        });
    }
    if input.current_amount < Decimal::ZERO {
        return Err(FintrackError::InvalidAmount {
            context: "current_amount".into(),
            reason: "must be >= 0".into(),
        });
    }

    let raw = input.current_amount + input.amount;
    let (new_amount, capped_amount) = match input.cap_policy {
        CapPolicy::CapAtTarget if raw > input.target_amount => {
            (input.target_amount, raw - input.target_amount)
        }
        _ => (raw, Decimal::ZERO),
    };

    if capped_amount > Decimal::ZERO {
        warnings.push(format!(
            "Contribution overshoots the target; {} trimmed by the cap policy",
            capped_amount
        ));
    }

    let result = VaultFundingOutput {
        new_amount,
        capped_amount,
        progress: new_amount / input.target_amount,
        goal_reached: new_amount >= input.target_amount,
    };

    Ok(with_metadata(
        "Goal funding with cap-at-target policy",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}
