use std::collections::VecDeque;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FintrackError;
use crate::types::{with_metadata, ComputationOutput, Currency, MemberId, Money};
use crate::FintrackResult;

/// Net balances within this many currency units of zero count as settled,
/// and no transfer at or below it is ever generated. Absorbs rounding noise
/// on uneven splits; a business policy, not floating-point slop.
pub const DEFAULT_SETTLEMENT_TOLERANCE: Decimal = dec!(0.5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One shared expense inside a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub amount: Money,
    pub paid_by: MemberId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Input for a group settlement computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    /// Members in stable application order; drives output ordering and
    /// tie-breaks, so identical input always yields identical transfers.
    pub members: Vec<MemberId>,
    pub expenses: Vec<Expense>,
    /// Group currency; carried through for the caller, never converted.
    #[serde(default)]
    pub currency: Currency,
    /// Override for [`DEFAULT_SETTLEMENT_TOLERANCE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Money>,
}

/// Per-member view of the settled group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member: MemberId,
    /// Sum of expense amounts this member paid.
    pub paid: Money,
    /// Paid minus the equal share; negative means the member owes.
    pub net_balance: Money,
}

/// A single settling payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Output of [`compute_settlement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementOutput {
    pub total_expenses: Money,
    pub share_per_person: Money,
    /// One entry per member, in input member order.
    pub balances: Vec<MemberBalance>,
    /// Settling payments, in generation order.
    pub transfers: Vec<Transfer>,
}

/// An unsettled side of the netting; `remaining` is kept positive for both
/// debtors and creditors.
#[derive(Debug, Clone)]
struct OpenBalance {
    member: MemberId,
    remaining: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute per-member net balances for an equal-share group and a small,
/// deterministic set of transfers that settles all debts.
///
/// Non-positive expense amounts are rejected, not skipped: the engine treats
/// them as a storage inconsistency upstream. Greedy matching yields at most
/// `debtors + creditors - 1` transfers; true minimum-transaction netting is
/// NP-hard and out of scope.
pub fn compute_settlement(
    input: &SettlementInput,
) -> FintrackResult<ComputationOutput<SettlementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.members.is_empty() {
        return Err(FintrackError::EmptyGroup);
    }
    for expense in &input.expenses {
        if expense.amount <= Decimal::ZERO {
            return Err(FintrackError::InvalidAmount {
                context: format!("expense paid by '{}'", expense.paid_by),
                reason: "amount must be > 0".into(),
            });
        }
        if !input.members.contains(&expense.paid_by) {
            return Err(FintrackError::InvalidExpenseOwner {
                payer: expense.paid_by.clone(),
            });
        }
    }
    let tolerance = input.tolerance.unwrap_or(DEFAULT_SETTLEMENT_TOLERANCE);
    if tolerance < Decimal::ZERO {
        return Err(FintrackError::InvalidInput {
            field: "tolerance".into(),
            reason: "must be >= 0".into(),
        });
    }

    if input.expenses.is_empty() {
        warnings.push("Group has no expenses; every member is already settled".into());
    }

    // --- Balances ---
    let total_expenses: Money = input.expenses.iter().map(|e| e.amount).sum();
    let share_per_person = total_expenses / Decimal::from(input.members.len() as u64);

    let balances: Vec<MemberBalance> = input
        .members
        .iter()
        .map(|member| {
            let paid: Money = input
                .expenses
                .iter()
                .filter(|e| &e.paid_by == member)
                .map(|e| e.amount)
                .sum();
            MemberBalance {
                member: member.clone(),
                paid,
                net_balance: paid - share_per_person,
            }
        })
        .collect();

    // --- Classification ---
    let mut debtors: Vec<OpenBalance> = balances
        .iter()
        .filter(|b| b.net_balance < -tolerance)
        .map(|b| OpenBalance {
            member: b.member.clone(),
            remaining: -b.net_balance,
        })
        .collect();
    let mut creditors: Vec<OpenBalance> = balances
        .iter()
        .filter(|b| b.net_balance > tolerance)
        .map(|b| OpenBalance {
            member: b.member.clone(),
            remaining: b.net_balance,
        })
        .collect();

    // Largest debt and largest credit first. sort_by is stable, so exact
    // ties keep the input member order and the transfer plan reproducible.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let transfers = net_transfers(debtors.into(), creditors.into(), tolerance);

    let result = SettlementOutput {
        total_expenses,
        share_per_person,
        balances,
        transfers,
    };

    Ok(with_metadata(
        "Equal-share greedy netting with tolerance banding",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

/// Greedy matching over two queues ordered by descending open amount.
///
/// Each round settles the head debtor against the head creditor for
/// `min(debt, credit)` and reinserts whichever side still carries a residual
/// beyond the tolerance. The minimum side always drops to zero, so every
/// round retires at least one queue entry and the loop is bounded by
/// `debtors + creditors`.
fn net_transfers(
    mut debtors: VecDeque<OpenBalance>,
    mut creditors: VecDeque<OpenBalance>,
    tolerance: Money,
) -> Vec<Transfer> {
    let mut transfers = Vec::new();

    while let (Some(mut debtor), Some(mut creditor)) =
        (debtors.pop_front(), creditors.pop_front())
    {
        let amount = debtor.remaining.min(creditor.remaining);

        if amount > tolerance {
            transfers.push(Transfer {
                from: debtor.member.clone(),
                to: creditor.member.clone(),
                amount,
            });
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining > tolerance {
            debtors.push_front(debtor);
        }
        if creditor.remaining > tolerance {
            creditors.push_front(creditor);
        }
    }

    transfers
}
