//! SMTP implementation of [`Mailer`] backed by `lettre`.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::MailError;
use crate::{Mailer, OutboundEmail};

/// Mailer that relays through an authenticated SMTP server.
///
/// Cheap to clone; the underlying transport keeps a connection pool.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    sender: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a mailer from configuration. Does not connect.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.app_password.as_str().to_owned(),
            ))
            .build();

        Ok(Self {
            transport,
            from: parse_mailbox(&config.username)?,
            sender: config.username,
        })
    }

    /// Assemble the `lettre` message for an [`OutboundEmail`].
    pub fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        Ok(builder.body(email.html_body.clone())?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            let detail = response
                .message()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(MailError::Rejected(format!("{} {detail}", response.code())));
        }

        tracing::debug!(to = %email.to, subject = %email.subject, "email relayed");
        Ok(())
    }

    fn sender(&self) -> &str {
        &self.sender
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}
