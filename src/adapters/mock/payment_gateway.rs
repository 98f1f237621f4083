use crate::domain::{Money, PatronId};
use crate::ports::payment_gateway::{
    PaymentGateway as PaymentGatewayTrait, PaymentOutcome, RefundOutcome, Result,
};
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

/// How the mock gateway answers the next calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayBehavior {
    /// Approve with a generated `txn_` id
    Approve,
    /// Approve with a fixed transaction id and message
    ApproveWith {
        transaction_id: String,
        message: String,
    },
    /// Answer with `success == false` and this reason
    Decline(String),
    /// Fail the call itself, as a network error would
    Fault(String),
    /// Never answer
    Hang,
}

/// A charge the gateway received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeCall {
    pub patron_id: String,
    pub amount: Money,
    pub description: String,
}

/// A refund the gateway received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundCall {
    pub transaction_id: String,
    pub amount: Money,
}

/// Mock implementation of PaymentGateway
///
/// Does not move money. Answers according to the configured behavior
/// (approve by default). Gateways built with `new` or `with_behavior` record
/// every call so tests can check whether the gateway was contacted.
pub struct PaymentGateway {
    behavior: Mutex<GatewayBehavior>,
    record_calls: bool,
    charges: Mutex<Vec<ChargeCall>>,
    refunds: Mutex<Vec<RefundCall>>,
}

impl PaymentGateway {
    pub fn new() -> Self {
        Self::with_behavior(GatewayBehavior::Approve)
    }

    pub fn with_behavior(behavior: GatewayBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            record_calls: true,
            charges: Mutex::new(Vec::new()),
            refunds: Mutex::new(Vec::new()),
        }
    }

    /// Approves everything and keeps no call log, for a long-running server
    /// without a payment processor.
    pub fn approving() -> Self {
        Self {
            record_calls: false,
            ..Self::new()
        }
    }

    pub fn set_behavior(&self, behavior: GatewayBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn charges(&self) -> Vec<ChargeCall> {
        self.charges.lock().unwrap().clone()
    }

    pub fn refunds(&self) -> Vec<RefundCall> {
        self.refunds.lock().unwrap().clone()
    }

    fn behavior(&self) -> GatewayBehavior {
        self.behavior.lock().unwrap().clone()
    }
}

impl Default for PaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGatewayTrait for PaymentGateway {
    async fn process_payment(
        &self,
        patron_id: &PatronId,
        amount: Money,
        description: &str,
    ) -> Result<PaymentOutcome> {
        if self.record_calls {
            self.charges.lock().unwrap().push(ChargeCall {
                patron_id: patron_id.to_string(),
                amount,
                description: description.to_string(),
            });
        }

        match self.behavior() {
            GatewayBehavior::Approve => Ok(PaymentOutcome {
                success: true,
                transaction_id: Some(format!("txn_{}", Uuid::new_v4().simple())),
                message: "Payment processed".to_string(),
            }),
            GatewayBehavior::ApproveWith {
                transaction_id,
                message,
            } => Ok(PaymentOutcome {
                success: true,
                transaction_id: Some(transaction_id),
                message,
            }),
            GatewayBehavior::Decline(reason) => Ok(PaymentOutcome {
                success: false,
                transaction_id: None,
                message: reason,
            }),
            GatewayBehavior::Fault(message) => Err(message.into()),
            GatewayBehavior::Hang => futures::future::pending().await,
        }
    }

    async fn refund_payment(&self, transaction_id: &str, amount: Money) -> Result<RefundOutcome> {
        if self.record_calls {
            self.refunds.lock().unwrap().push(RefundCall {
                transaction_id: transaction_id.to_string(),
                amount,
            });
        }

        match self.behavior() {
            GatewayBehavior::Approve | GatewayBehavior::ApproveWith { .. } => Ok(RefundOutcome {
                success: true,
                message: "Refund successful".to_string(),
            }),
            GatewayBehavior::Decline(reason) => Ok(RefundOutcome {
                success: false,
                message: reason,
            }),
            GatewayBehavior::Fault(message) => Err(message.into()),
            GatewayBehavior::Hang => futures::future::pending().await,
        }
    }
}
