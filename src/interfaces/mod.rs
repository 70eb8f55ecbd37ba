pub mod twilio;

pub use twilio::{DeliveryError, MessageReceipt, MessageSender, TwilioClient};
