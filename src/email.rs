//! Gestion des fonctionnalités liées aux emails : composition de l'email d'entretien
//! et envoi via l'API transactionnelle (SendGrid v3).

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde_json::json;

use crate::config::{Config, Signature};
use crate::consts::EMAIL_ACCEPTED;
use crate::utils::error_messages::IntakeError;
use crate::HBS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Réponse brute du fournisseur d'emails.
#[derive(Clone, Debug, Default)]
pub struct SendResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl SendResponse {
    /// Seul un `202 Accepted` compte comme un envoi réussi.
    pub fn is_accepted(&self) -> bool {
        self.status_code == EMAIL_ACCEPTED
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Envoie un email. Une erreur n'est renvoyée que pour un problème de transport.
    async fn send(&self, message: &EmailMessage) -> Result<SendResponse, IntakeError>;
}

#[derive(Serialize)]
struct InterviewEmail<'a> {
    first_name: &'a str,
    sender_email: &'a str,
    signature: SignatureContext<'a>,
}

#[derive(Serialize)]
struct SignatureContext<'a> {
    name: &'a str,
    title: &'a str,
    phone: &'a str,
    booking_url: &'a str,
    logo_src: &'a str,
}

impl<'a> From<&'a Signature> for SignatureContext<'a> {
    fn from(s: &'a Signature) -> Self {
        Self {
            name: &s.name,
            title: &s.title,
            phone: &s.phone,
            booking_url: &s.booking_url,
            logo_src: &s.logo_src,
        }
    }
}

/// Compose l'email d'invitation à l'entretien pour un lead.
pub fn interview_email(config: &Config, first_name: &str, to: &str) -> Result<EmailMessage, IntakeError> {
    let context = InterviewEmail {
        first_name,
        sender_email: &config.sender_email,
        signature: SignatureContext::from(&config.signature),
    };

    let html_body = HBS
        .render("interview_email", &context)
        .map_err(|e| IntakeError::Notification(e.to_string()))?;

    Ok(EmailMessage {
        from: config.sender_email.clone(),
        to: to.to_string(),
        subject: format!("{first_name} Virtual USAA Interview!"),
        html_body,
    })
}

/// Client de l'API `mail/send` de SendGrid.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SendGridMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.email_api_url.clone(),
            api_key: config.email_api_key.clone(),
        }
    }

    fn payload(message: &EmailMessage) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [{ "type": "text/html", "value": message.html_body }],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendResponse, IntakeError> {
        info!("Sending an email");
        debug!("Email provider endpoint: {}", self.api_url);

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&Self::payload(message))
            .send()
            .await
            .map_err(|e| IntakeError::Notification(e.to_string()))?;

        let status_code = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = resp
            .text()
            .await
            .map_err(|e| IntakeError::Notification(e.to_string()))?;

        Ok(SendResponse {
            status_code,
            body,
            headers,
        })
    }
}
