pub mod metrics;
pub mod paypal;

pub use metrics::{get_metrics, init_metrics};
pub use paypal::{PayPalClient, PayPalError};
