//! Coalescing of unlock events across schedules

use super::UnlockEvent;
use crate::valuation::ValuationError;

/// Sort events by (date, token) and sum the amounts of events sharing both.
///
/// The sort is stable, so pricing inputs of a coalesced event come from the first
/// event encountered for that pair. The input is left untouched. Fails if a summed
/// amount overflows.
pub fn merge_events(events: &[UnlockEvent]) -> Result<Vec<UnlockEvent>, ValuationError> {
    let mut sorted: Vec<&UnlockEvent> = events.iter().collect();
    sorted.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.token_id.cmp(&b.token_id))
    });

    let mut merged: Vec<UnlockEvent> = Vec::with_capacity(sorted.len());
    for event in sorted {
        if let Some(last) = merged.last_mut() {
            if last.date == event.date && last.token_id == event.token_id {
                if last.pricing != event.pricing {
                    tracing::warn!(
                        token_id = %event.token_id,
                        date = %event.date,
                        "Divergent pricing inputs for the same unlock, keeping the first"
                    );
                }
                last.amount = last.amount.checked_add(event.amount).ok_or(
                    ValuationError::Overflow {
                        quantity: "merged unlock amount",
                    },
                )?;
                continue;
            }
        }
        merged.push(event.clone());
    }

    Ok(merged)
}
