use crate::types::*;
use alloy_primitives::U256;
use artmint_common::PERCENTAGE_DENOMINATOR;

/// Floor of `amount * percentage / 100`.
#[inline]
pub fn percentage_of(amount: U256, percentage: u8) -> Result<U256, SplitError> {
    amount
        .checked_mul(U256::from(percentage))
        .map(|scaled| scaled / U256::from(PERCENTAGE_DENOMINATOR))
        .ok_or(SplitError::Overflow)
}

fn check_percentage(leg: SplitLeg, percentage: u8) -> Result<(), SplitError> {
    if u64::from(percentage) > PERCENTAGE_DENOMINATOR {
        return Err(SplitError::InvalidPercentage { leg, percentage });
    }
    Ok(())
}

/// Splits `payment` for a sale at `params.price`.
///
/// Shares are computed from the configured price, never from the payment:
/// - refund: `payment - price`
/// - platform: `floor(price * platform% / 100)`
/// - secondary payee: `floor((price - platform) * secondary% / 100)`
/// - creator: whatever is left, so rounding remainders always land here.
pub fn compute_split(payment: U256, params: &SplitParams) -> Result<FundsSplit, SplitError> {
    check_percentage(SplitLeg::Platform, params.platform_percentage)?;
    check_percentage(SplitLeg::SecondaryPayee, params.secondary_payee_percentage)?;

    let refund = payment
        .checked_sub(params.price)
        .ok_or(SplitError::PaymentBelowPrice { payment, price: params.price })?;

    let platform_share = percentage_of(params.price, params.platform_percentage)?;
    let remaining = params.price - platform_share;

    let secondary_payee_share = if params.secondary_payee_percentage > 0 {
        percentage_of(remaining, params.secondary_payee_percentage)?
    } else {
        U256::ZERO
    };
    let creator_share = remaining - secondary_payee_share;

    Ok(FundsSplit { refund, platform_share, secondary_payee_share, creator_share })
}
