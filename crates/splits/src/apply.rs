use crate::types::{FundsSplit, SplitLeg, SplitRecipients, Transfer};

/// Produce the value transfers to execute for this split, in order.
///
/// Legs with a zero amount are omitted. The order is fixed: refund, platform,
/// secondary payee, artist.
pub fn transfer_plan(split: &FundsSplit, recipients: &SplitRecipients) -> Vec<Transfer> {
    let legs = [
        (SplitLeg::Refund, recipients.payer, split.refund),
        (SplitLeg::Platform, recipients.platform, split.platform_share),
        (SplitLeg::SecondaryPayee, recipients.secondary_payee, split.secondary_payee_share),
        (SplitLeg::Artist, recipients.artist, split.creator_share),
    ];
    legs.into_iter()
        .filter(|(_, _, amount)| !amount.is_zero())
        .map(|(leg, to, amount)| Transfer { leg, to, amount })
        .collect()
}
