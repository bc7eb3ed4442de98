pub mod smtp;

/// A fully addressed message handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Opaque proof of acceptance returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Outbound mail capability. Implementations must be safe to share between
/// concurrent dispatches and must bound every call with a timeout.
#[rocket::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, TransportError>;

    /// Check that the relay is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
