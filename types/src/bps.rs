//! Basis-point fractions (parts per 10000).

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-point fraction where 10000 = 100%.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// The divider every fraction is expressed against.
    pub const DIVIDER: u32 = 10_000;

    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(Self::DIVIDER);

    pub const fn new(bps: u32) -> Self {
        Self(bps)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Whether this fraction is at most 100%.
    pub fn is_valid_fraction(&self) -> bool {
        self.0 <= Self::DIVIDER
    }

    /// `floor(amount * self / 10000)`, computed without intermediate overflow.
    ///
    /// Splitting `amount` into quotient and remainder by the divider keeps every
    /// product below `amount` as long as the fraction is at most 100%.
    pub fn apply(&self, amount: Amount) -> Amount {
        let divider = Self::DIVIDER as u128;
        let bps = self.0 as u128;
        let raw = amount.raw();
        let whole = (raw / divider).saturating_mul(bps);
        let part = (raw % divider) * bps / divider;
        Amount::new(whole.saturating_add(part))
    }

    /// Sum a sequence of fractions, widening so the total cannot overflow.
    pub fn total<'a>(parts: impl IntoIterator<Item = &'a BasisPoints>) -> u64 {
        parts.into_iter().map(|b| b.0 as u64).sum()
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}
