//! Fan a text message out to every configured recipient.

use std::io::{self, Write};

use thiserror::Error;

use crate::config::{ConfigError, Credentials};
use crate::helpers::expand_newlines;
use crate::interfaces::{DeliveryError, MessageReceipt, MessageSender};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("could not write pretend output: {0}")]
    Io(#[from] io::Error),
}

pub struct Notifier<S> {
    sender: S,
    from_phone: String,
    to_phones: Vec<String>,
    pretend: bool,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S, credentials: &Credentials, pretend: bool) -> Self {
        Notifier {
            sender,
            from_phone: credentials.from_phone.clone(),
            to_phones: credentials.to_phones.clone(),
            pretend,
        }
    }

    /// Send `message` to every recipient, in order, stopping at the first failure.
    ///
    /// In pretend mode nothing is sent; the text is written to `out` instead and
    /// no receipts are returned.
    pub fn notify(
        &self,
        message: &str,
        out: &mut impl Write,
    ) -> Result<Vec<MessageReceipt>, NotifyError> {
        if message.trim().is_empty() {
            return Err(ConfigError::EmptyMessage.into());
        }
        if self.to_phones.is_empty() {
            return Err(ConfigError::MissingField("twilio.to_phones").into());
        }
        let message = expand_newlines(message);

        if self.pretend {
            write!(out, "\n\nTEXT that would be sent:\n{message}\n")?;
            out.flush()?;
            return Ok(Vec::new());
        }

        log::info!("\n\nTEXT that will be sent:\n{message}");
        let mut receipts = Vec::with_capacity(self.to_phones.len());
        for to_phone in &self.to_phones {
            log::info!("Text to {to_phone}");
            receipts.push(self.sender.send(to_phone, &self.from_phone, &message)?);
        }
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct SentText {
        to: String,
        from: String,
        body: String,
    }

    #[derive(Default)]
    struct RecordingSender {
        sent: RefCell<Vec<SentText>>,
        reject: Option<&'static str>,
    }

    impl MessageSender for &RecordingSender {
        fn send(&self, to: &str, from: &str, body: &str) -> Result<MessageReceipt, DeliveryError> {
            if self.reject == Some(to) {
                return Err(DeliveryError::Rejected {
                    to: to.to_string(),
                    status: 400,
                    code: Some(21211),
                    message: "invalid number".to_string(),
                });
            }
            let mut sent = self.sent.borrow_mut();
            sent.push(SentText {
                to: to.to_string(),
                from: from.to_string(),
                body: body.to_string(),
            });
            Ok(MessageReceipt {
                to: to.to_string(),
                sid: format!("SM{}", sent.len()),
            })
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            account_sid: "AC1".to_string(),
            auth_token: "token".to_string(),
            from_phone: "+15550000000".to_string(),
            to_phones: vec!["+15551111111".to_string(), "+15552222222".to_string()],
        }
    }

    #[test]
    fn test_one_send_per_recipient() {
        let sender = RecordingSender::default();
        let notifier = Notifier::new(&sender, &credentials(), false);
        let mut out = Vec::new();

        let receipts = notifier.notify(r"Motion\ndetected", &mut out).unwrap();

        assert_eq!(receipts.len(), 2);
        assert!(out.is_empty());
        let sent = sender.sent.borrow();
        assert_eq!(
            *sent,
            vec![
                SentText {
                    to: "+15551111111".to_string(),
                    from: "+15550000000".to_string(),
                    body: "Motion\ndetected".to_string(),
                },
                SentText {
                    to: "+15552222222".to_string(),
                    from: "+15550000000".to_string(),
                    body: "Motion\ndetected".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_pretend_sends_nothing() {
        let sender = RecordingSender::default();
        let notifier = Notifier::new(&sender, &credentials(), true);
        let mut out = Vec::new();

        let receipts = notifier.notify(r"line1\nline2 \\n", &mut out).unwrap();

        assert!(receipts.is_empty());
        assert!(sender.sent.borrow().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n\nTEXT that would be sent:\nline1\nline2 \\\\n\n"
        );
    }

    #[test]
    fn test_empty_message_fails_before_sending() {
        let sender = RecordingSender::default();
        let notifier = Notifier::new(&sender, &credentials(), false);

        let err = notifier.notify("  ", &mut io::sink()).unwrap_err();

        assert!(matches!(err, NotifyError::Config(ConfigError::EmptyMessage)));
        assert!(sender.sent.borrow().is_empty());
    }

    #[test]
    fn test_rejection_stops_delivery() {
        let sender = RecordingSender {
            reject: Some("+15551111111"),
            ..Default::default()
        };
        let notifier = Notifier::new(&sender, &credentials(), false);

        let err = notifier.notify("hello", &mut io::sink()).unwrap_err();

        assert!(matches!(err, NotifyError::Delivery(DeliveryError::Rejected { .. })));
        assert!(sender.sent.borrow().is_empty());
    }
}
