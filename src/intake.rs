//! Traitement d'une soumission : validation, persistance du lead, puis envoi de l'email.
//! Chaque soumission est traitée du début à la fin, sans reprise ni nouvelle tentative.

use std::sync::Arc;

use log::{error, info, warn};
use serde_json::Value;

use crate::backend::models::{Banner, RegistrationForm};
use crate::config::Config;
use crate::database::{Lead, LeadStore};
use crate::email::{interview_email, Mailer, SendResponse};
use crate::utils::error_messages::IntakeError;

/// Résultat de l'étape d'envoi d'email, une fois le lead enregistré.
#[derive(Debug)]
pub enum Notification {
    Sent,
    /// Le fournisseur a répondu avec un autre code que 202.
    Refused(SendResponse),
    /// Échec de transport ou de composition.
    Failed(IntakeError),
}

/// Issue terminale d'une soumission.
#[derive(Debug)]
pub enum Outcome {
    /// Validation ou persistance en échec. Aucun email n'a été envoyé.
    Rejected(IntakeError),
    /// Le lead est enregistré, quel que soit le sort de l'email.
    Accepted {
        lead: Lead,
        table: String,
        inserted: Vec<Value>,
        notification: Notification,
    },
}

impl Outcome {
    /// Messages à afficher dans l'ordre où les étapes se sont déroulées.
    pub fn banners(&self) -> Vec<Banner> {
        match self {
            Outcome::Rejected(IntakeError::Validation(msg)) => vec![Banner::warning(msg)],
            Outcome::Rejected(err) => vec![Banner::error(&err.to_string())],
            Outcome::Accepted {
                lead,
                table,
                notification,
                ..
            } => {
                let mut banners = vec![Banner::success(&format!(
                    "Successfully added {} {} to {}!",
                    lead.first_name, lead.last_name, table
                ))];
                match notification {
                    Notification::Sent => banners.push(Banner::success(&format!(
                        "Confirmation email sent to {}!",
                        lead.email
                    ))),
                    Notification::Refused(resp) => {
                        let headers = resp
                            .headers
                            .iter()
                            .map(|(k, v)| format!("{k}: {v}"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        banners.push(Banner::warning(&format!(
                            "Failed to send email. Status Code: {}",
                            resp.status_code
                        )));
                        banners.push(Banner::warning(&format!(
                            "Email provider response body: {}",
                            resp.body
                        )));
                        banners.push(Banner::warning(&format!(
                            "Email provider response headers: {headers}"
                        )));
                    }
                    Notification::Failed(err) => banners.push(Banner::warning(&format!(
                        "An error occurred while sending the email: {err}"
                    ))),
                }
                banners
            }
        }
    }

    /// Lignes renvoyées par la table, formatées pour l'affichage.
    pub fn inserted_json(&self) -> Option<String> {
        match self {
            Outcome::Accepted { inserted, .. } => serde_json::to_string_pretty(inserted).ok(),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Gestionnaire d'inscription, construit une fois au démarrage.
pub struct IntakeHandler {
    config: Arc<Config>,
    store: Arc<dyn LeadStore>,
    mailer: Arc<dyn Mailer>,
}

impl IntakeHandler {
    pub fn new(config: Arc<Config>, store: Arc<dyn LeadStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            store,
            mailer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn submit(&self, form: &RegistrationForm) -> Outcome {
        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(e) => {
                warn!("Submission rejected: {}", e);
                return Outcome::Rejected(e);
            }
        };

        // 1. Enregistrement du lead
        let lead = Lead::new(
            registration.first_name.as_str(),
            registration.last_name.as_str(),
            registration.email.as_str(),
        );
        let table = self.config.table_name.clone();

        let inserted = match self.store.insert(&table, &lead).await {
            Ok(resp) if resp.is_success() => resp.data,
            Ok(resp) => {
                error!("Insert into {} refused with status {}", table, resp.status_code);
                return Outcome::Rejected(IntakeError::Persistence(format!(
                    "Failed to add data to the database. Response: {} - {}",
                    resp.status_code, resp.text
                )));
            }
            Err(e) => {
                error!("Insert into {} failed: {}", table, e);
                return Outcome::Rejected(IntakeError::Persistence(format!(
                    "An error occurred while adding data to the database: {e}"
                )));
            }
        };
        info!("Lead stored in {}", table);

        // 2. Envoi de l'email, sans retour arrière sur le lead en cas d'échec
        let notification = match interview_email(&self.config, &lead.first_name, &lead.email) {
            Ok(message) => match self.mailer.send(&message).await {
                Ok(resp) if resp.is_accepted() => Notification::Sent,
                Ok(resp) => Notification::Refused(resp),
                Err(e) => Notification::Failed(e),
            },
            Err(e) => Notification::Failed(e),
        };

        match &notification {
            Notification::Sent => info!("Confirmation email accepted by provider"),
            Notification::Refused(resp) => warn!(
                "Email provider answered {}; lead keeps status \"{}\"",
                resp.status_code, lead.status
            ),
            Notification::Failed(e) => warn!(
                "Email not sent ({}); lead keeps status \"{}\"",
                e, lead.status
            ),
        }

        Outcome::Accepted {
            lead,
            table,
            inserted,
            notification,
        }
    }
}
