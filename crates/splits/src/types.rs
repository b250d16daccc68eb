use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Price and percentages a sale is split by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParams {
    /// Configured price per token, in the smallest value unit.
    pub price: U256,
    /// Share of the price owed to the platform, in percent.
    pub platform_percentage: u8,
    /// Share of the post-platform remainder owed to the secondary payee, in percent.
    /// Zero disables the secondary payee leg entirely.
    #[serde(default)]
    pub secondary_payee_percentage: u8,
}

/// Addresses receiving each leg of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecipients {
    /// Account that paid for the mint; receives any excess payment.
    pub payer: Address,
    /// Platform fee recipient.
    pub platform: Address,
    /// Secondary payee of the project.
    pub secondary_payee: Address,
    /// Artist of the project; receives the creator share.
    pub artist: Address,
}

/// Amounts owed to each leg of a split.
///
/// `refund + platform_share + secondary_payee_share + creator_share` always
/// equals the payment, and the last three always add up to the price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundsSplit {
    /// Payment in excess of the price, returned to the payer.
    pub refund: U256,
    /// Platform fee.
    pub platform_share: U256,
    /// Share of what the platform leaves, owed to the secondary payee.
    pub secondary_payee_share: U256,
    /// Everything else, including rounding remainders.
    pub creator_share: U256,
}

impl FundsSplit {
    /// Sum of the proceeds legs, excluding the refund.
    pub fn proceeds(&self) -> U256 {
        self.platform_share + self.secondary_payee_share + self.creator_share
    }

    /// Sum of all legs including the refund.
    pub fn total(&self) -> U256 {
        self.refund + self.proceeds()
    }
}

/// One leg of a funds distribution, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SplitLeg {
    /// Excess payment returned to the payer.
    Refund,
    /// Platform fee.
    Platform,
    /// Additional payee of the project.
    SecondaryPayee,
    /// Remaining proceeds for the artist.
    Artist,
}

impl fmt::Display for SplitLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Refund => "refund",
            Self::Platform => "platform payment",
            Self::SecondaryPayee => "secondary payee payment",
            Self::Artist => "artist payment",
        })
    }
}

/// A single value transfer produced by [`crate::transfer_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Leg this transfer pays out.
    pub leg: SplitLeg,
    /// Recipient.
    pub to: Address,
    /// Amount to send, never zero.
    pub amount: U256,
}

/// Invalid inputs to a split.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SplitError {
    /// The payment does not cover the price.
    #[error("payment {payment} is below price {price}")]
    PaymentBelowPrice {
        /// Amount paid.
        payment: U256,
        /// Configured price.
        price: U256,
    },
    /// A percentage is above 100.
    #[error("{leg} percentage {percentage} exceeds 100")]
    InvalidPercentage {
        /// Leg the percentage applies to.
        leg: SplitLeg,
        /// Rejected percentage.
        percentage: u8,
    },
    /// A share did not fit in 256 bits.
    #[error("split arithmetic overflow")]
    Overflow,
}
