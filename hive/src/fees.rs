//! Share validation and basis-point splitting.
//!
//! Fee and shares are both basis points of the full released amount and
//! together make up 10000. Each leg is floored on its own; whatever the
//! truncation leaves over stays with the hive as the remainder, so
//! `fee + Σ payouts + remainder == amount` always holds.

use crate::HiveError;
use hive_types::{Amount, BasisPoints, MemberId};

/// Result of splitting one amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: Amount,
    /// Parallel to the share list.
    pub payouts: Vec<Amount>,
    pub remainder: Amount,
}

impl FeeSplit {
    pub fn paid_out(&self) -> Amount {
        self.payouts.iter().sum()
    }

    /// Fee plus remainder: what stays with the hive.
    pub fn retained(&self) -> Amount {
        self.fee.saturating_add(self.remainder)
    }
}

/// Validate a beneficiary/share list for a new proposal request in a hive
/// charging `fee_rate`.
pub fn validate_shares(
    beneficiaries: &[MemberId],
    shares: &[BasisPoints],
    fee_rate: BasisPoints,
    max_beneficiaries: usize,
) -> Result<(), HiveError> {
    if beneficiaries.len() != shares.len() {
        return Err(HiveError::BeneficiaryShareMismatch {
            beneficiaries: beneficiaries.len(),
            shares: shares.len(),
        });
    }
    if beneficiaries.len() > max_beneficiaries {
        return Err(HiveError::TooManyBeneficiaries {
            count: beneficiaries.len(),
            max: max_beneficiaries,
        });
    }
    let total = BasisPoints::total(shares) + fee_rate.get() as u64;
    if shares.is_empty() || total != BasisPoints::DIVIDER as u64 {
        return Err(HiveError::SharesNotComplete { total });
    }
    Ok(())
}

/// Split `amount` into the fee and one payout per share, each taken from the
/// full amount.
pub fn split(amount: Amount, fee_rate: BasisPoints, shares: &[BasisPoints]) -> FeeSplit {
    let fee = fee_rate.apply(amount);
    let payouts: Vec<Amount> = shares.iter().map(|share| share.apply(amount)).collect();
    let remainder = amount
        .saturating_sub(fee)
        .saturating_sub(payouts.iter().sum());
    FeeSplit {
        fee,
        payouts,
        remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bps(values: &[u32]) -> Vec<BasisPoints> {
        values.iter().copied().map(BasisPoints::new).collect()
    }

    fn members(n: u64) -> Vec<MemberId> {
        (1..=n).map(MemberId::new).collect()
    }

    #[test]
    fn shares_short_of_fee_complement_rejected() {
        let err = validate_shares(&members(2), &bps(&[4000, 4000]), BasisPoints::new(1000), 64)
            .unwrap_err();
        assert!(matches!(err, HiveError::SharesNotComplete { total: 9000 }));
    }

    #[test]
    fn shares_plus_fee_of_full_accepted() {
        let fee = BasisPoints::new(1000);
        assert!(validate_shares(&members(2), &bps(&[4000, 5000]), fee, 64).is_ok());
    }

    #[test]
    fn full_shares_on_top_of_fee_rejected() {
        let err = validate_shares(&members(2), &bps(&[4000, 6000]), BasisPoints::new(1000), 64)
            .unwrap_err();
        assert!(matches!(err, HiveError::SharesNotComplete { total: 11000 }));
    }

    #[test]
    fn zero_fee_needs_full_shares() {
        assert!(validate_shares(&members(2), &bps(&[4000, 6000]), BasisPoints::ZERO, 64).is_ok());
        let err = validate_shares(&members(2), &bps(&[5000, 5001]), BasisPoints::ZERO, 64)
            .unwrap_err();
        assert!(matches!(err, HiveError::SharesNotComplete { total: 10001 }));
    }

    #[test]
    fn empty_list_rejected_even_with_full_fee() {
        let err = validate_shares(&[], &[], BasisPoints::ZERO, 64).unwrap_err();
        assert!(matches!(err, HiveError::SharesNotComplete { total: 0 }));
        let err = validate_shares(&[], &[], BasisPoints::FULL, 64).unwrap_err();
        assert!(matches!(err, HiveError::SharesNotComplete { total: 10000 }));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = validate_shares(&members(3), &bps(&[4500, 4500]), BasisPoints::new(1000), 64)
            .unwrap_err();
        assert!(matches!(
            err,
            HiveError::BeneficiaryShareMismatch {
                beneficiaries: 3,
                shares: 2
            }
        ));
    }

    #[test]
    fn beneficiary_cap_enforced() {
        let err = validate_shares(&members(3), &bps(&[3000, 3000, 4000]), BasisPoints::ZERO, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            HiveError::TooManyBeneficiaries { count: 3, max: 2 }
        ));
    }

    #[test]
    fn split_six_hundred_with_ten_percent_fee() {
        let s = split(Amount::new(600), BasisPoints::new(1000), &bps(&[4000, 5000]));
        assert_eq!(s.fee, Amount::new(60));
        assert_eq!(s.payouts, vec![Amount::new(240), Amount::new(300)]);
        assert_eq!(s.remainder, Amount::ZERO);
        assert_eq!(s.paid_out(), Amount::new(540));
    }

    #[test]
    fn split_keeps_rounding_remainder() {
        let s = split(Amount::new(101), BasisPoints::ZERO, &bps(&[3333, 3333, 3334]));
        assert_eq!(s.payouts, vec![Amount::new(33), Amount::new(33), Amount::new(33)]);
        assert_eq!(s.remainder, Amount::new(2));
        assert_eq!(s.retained(), Amount::new(2));
    }

    #[test]
    fn split_floors_fee_and_shares_separately() {
        let s = split(Amount::new(7), BasisPoints::new(1000), &bps(&[4000, 5000]));
        assert_eq!(s.fee, Amount::ZERO);
        assert_eq!(s.payouts, vec![Amount::new(2), Amount::new(3)]);
        assert_eq!(s.remainder, Amount::new(2));
    }

    #[test]
    fn split_of_dust_is_all_retained() {
        let s = split(Amount::new(1), BasisPoints::new(1000), &bps(&[4500, 4500]));
        assert_eq!(s.fee, Amount::ZERO);
        assert_eq!(s.paid_out(), Amount::ZERO);
        assert_eq!(s.remainder, Amount::new(1));
    }
}
