use crate::domain::{Money, PatronId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Gateway answer to a charge.
///
/// `Err` from the port means the gateway could not be reached or faulted;
/// a declined card is `Ok` with `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub success: bool,
    /// Present only when `success` is true
    pub transaction_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundOutcome {
    pub success: bool,
    pub message: String,
}

/// Payment gateway port
///
/// Implementations talk to an external processor and may fail or stall;
/// callers bound every call with a timeout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_payment(
        &self,
        patron_id: &PatronId,
        amount: Money,
        description: &str,
    ) -> Result<PaymentOutcome>;

    async fn refund_payment(&self, transaction_id: &str, amount: Money) -> Result<RefundOutcome>;
}
