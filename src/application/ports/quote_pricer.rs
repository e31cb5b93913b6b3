use rand::Rng;

use crate::domain::entities::quote::{MAX_QUOTE_CENTS, MIN_QUOTE_CENTS};

/// Prices a quote request. Returns the amount in cents.
pub trait QuotePricer: Send + Sync {
    fn price_cents(&self) -> i64;
}

/// Stub pricing: uniform over every cent in [100.00, 1000.00].
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformQuotePricer;

impl QuotePricer for UniformQuotePricer {
    fn price_cents(&self) -> i64 {
        rand::thread_rng().gen_range(MIN_QUOTE_CENTS..=MAX_QUOTE_CENTS)
    }
}
