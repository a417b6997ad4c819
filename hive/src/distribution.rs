//! Incremental, watermark-based fund distribution.
//!
//! Each executed request carries `shared_amount`, the cumulative released
//! amount already distributed. A distribution pays out only
//! `released - shared_amount`, so calling it again before new funds arrive
//! fails with `NoFundsToShare` and previously distributed funds are never
//! paid twice.

use crate::fees::{self, FeeSplit};
use crate::request::ProposalRequest;
use crate::HiveError;
use hive_types::{Amount, BasisPoints, MemberId, RequestId, Token};
use serde::{Deserialize, Serialize};

/// One beneficiary's cut of a distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub beneficiary: MemberId,
    pub share: BasisPoints,
    pub amount: Amount,
}

/// Outcome of one `share_funds` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub request_id: RequestId,
    pub token: Token,
    /// Escrow's cumulative release figure at distribution time.
    pub released_total: Amount,
    /// Newly released delta distributed by this call.
    pub amount: Amount,
    pub fee: Amount,
    pub payouts: Vec<Payout>,
    /// Rounding leftover kept by the hive.
    pub remainder: Amount,
}

impl Distribution {
    pub fn paid_out(&self) -> Amount {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    pub fn retained(&self) -> Amount {
        self.fee.saturating_add(self.remainder)
    }

    /// Watermark the request should carry after this distribution.
    pub fn new_watermark(&self) -> Amount {
        self.released_total
    }
}

/// Pure planning half of `share_funds`; never touches collaborators.
pub struct DistributionEngine;

impl DistributionEngine {
    /// Plan the distribution of everything released beyond the watermark.
    pub fn plan(
        request: &ProposalRequest,
        released_total: Amount,
        fee_rate: BasisPoints,
    ) -> Result<Distribution, HiveError> {
        let amount = released_total
            .checked_sub(request.shared_amount)
            .filter(|delta| !delta.is_zero())
            .ok_or(HiveError::NoFundsToShare(request.id))?;

        let FeeSplit {
            fee,
            payouts,
            remainder,
        } = fees::split(amount, fee_rate, &request.shares);

        let payouts = request
            .split_entries()
            .zip(payouts)
            .map(|((beneficiary, share), amount)| Payout {
                beneficiary,
                share,
                amount,
            })
            .collect();

        Ok(Distribution {
            request_id: request.id,
            token: request.rate_token.clone(),
            released_total,
            amount,
            fee,
            payouts,
            remainder,
        })
    }

    /// Advance the request's watermark and retained total.
    pub fn apply(request: &mut ProposalRequest, distribution: &Distribution) -> Result<(), HiveError> {
        let shared = request
            .shared_amount
            .checked_add(distribution.amount)
            .ok_or(HiveError::Overflow)?;
        let retained = request
            .retained_amount
            .checked_add(distribution.retained())
            .ok_or(HiveError::Overflow)?;
        request.shared_amount = shared;
        request.retained_amount = retained;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ProposalRequestParams, RequestLedger, RequestStatus};
    use hive_types::{JobId, PlatformId, Timestamp};

    fn executed_request(shares: &[u32]) -> ProposalRequest {
        let mut ledger = RequestLedger::new();
        let beneficiaries = (0..shares.len() as u64).map(|i| MemberId::new(i + 2)).collect();
        let id = ledger.insert(
            MemberId::new(4),
            ProposalRequestParams {
                job_id: JobId::new(1),
                rate_token: Token::Native,
                rate_amount: Amount::new(1_000),
                platform_id: PlatformId::new(1),
                data_uri: String::new(),
                expiration_date: Timestamp::EPOCH,
                beneficiaries,
                shares: shares.iter().copied().map(BasisPoints::new).collect(),
            },
        );
        let mut request = ledger.get(id).cloned().unwrap();
        request.status = RequestStatus::Executed;
        request
    }

    #[test]
    fn first_release_distributed_in_full() {
        let request = executed_request(&[4000, 5000]);
        let d = DistributionEngine::plan(&request, Amount::new(600), BasisPoints::new(1000)).unwrap();
        assert_eq!(d.amount, Amount::new(600));
        assert_eq!(d.fee, Amount::new(60));
        assert_eq!(d.payouts[0].amount, Amount::new(240));
        assert_eq!(d.payouts[1].amount, Amount::new(300));
        assert_eq!(d.remainder, Amount::ZERO);
        assert_eq!(d.paid_out().saturating_add(d.retained()), d.amount);
    }

    #[test]
    fn nothing_new_is_rejected() {
        let mut request = executed_request(&[10_000]);
        let d = DistributionEngine::plan(&request, Amount::new(600), BasisPoints::ZERO).unwrap();
        DistributionEngine::apply(&mut request, &d).unwrap();
        assert_eq!(request.shared_amount, Amount::new(600));

        let again = DistributionEngine::plan(&request, Amount::new(600), BasisPoints::ZERO);
        assert!(matches!(again, Err(HiveError::NoFundsToShare(_))));
    }

    #[test]
    fn second_release_distributes_only_delta() {
        let mut request = executed_request(&[4500, 4500]);
        let first = DistributionEngine::plan(&request, Amount::new(60), BasisPoints::new(1000)).unwrap();
        DistributionEngine::apply(&mut request, &first).unwrap();

        let second = DistributionEngine::plan(&request, Amount::new(100), BasisPoints::new(1000)).unwrap();
        assert_eq!(second.amount, Amount::new(40));
        assert_eq!(second.fee, Amount::new(4));
        assert_eq!(second.payouts[0].amount, Amount::new(18));
        DistributionEngine::apply(&mut request, &second).unwrap();
        assert_eq!(request.shared_amount, Amount::new(100));
        assert_eq!(request.retained_amount, Amount::new(10));
    }

    #[test]
    fn zero_release_is_rejected() {
        let request = executed_request(&[10_000]);
        let result = DistributionEngine::plan(&request, Amount::ZERO, BasisPoints::ZERO);
        assert!(matches!(result, Err(HiveError::NoFundsToShare(_))));
    }

    #[test]
    fn watermark_is_released_total() {
        let request = executed_request(&[10_000]);
        let d = DistributionEngine::plan(&request, Amount::new(77), BasisPoints::ZERO).unwrap();
        assert_eq!(d.new_watermark(), Amount::new(77));
    }
}
