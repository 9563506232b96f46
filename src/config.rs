//! Configuration de l'application, construite une seule fois au démarrage.
//! Les valeurs proviennent de l'environnement (après chargement d'un `.env` optionnel).

use crate::consts;
use crate::utils::error_messages::ConfigError;

/// Identité affichée dans le bloc de signature de l'email.
#[derive(Clone, Debug)]
pub struct Signature {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub booking_url: String,
    pub logo_src: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub db_url: String,
    pub db_api_key: String,
    pub email_api_key: String,
    pub email_api_url: String,
    pub sender_email: String,
    pub table_name: String,
    pub http_port: u16,
    pub signature: Signature,
}

impl Config {
    /// Lit la configuration depuis les variables d'environnement du processus.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture de clés.
    /// Une valeur vide est considérée comme absente.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let db_url = required("DB_URL");
        let db_api_key = required("DB_API_KEY");
        let email_api_key = required("EMAIL_API_KEY");
        let sender_email = required("SENDER_EMAIL");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let http_port = match get("HTTP_PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Invalid {
                key: "HTTP_PORT",
                value: port,
            })?,
            None => consts::HTTP_PORT,
        };

        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            db_url,
            db_api_key,
            email_api_key,
            email_api_url: or("EMAIL_API_URL", consts::EMAIL_API_URL),
            sender_email,
            table_name: or("LEADS_TABLE", consts::DEFAULT_TABLE),
            http_port,
            signature: Signature {
                name: or("SIGNATURE_NAME", consts::DEFAULT_SIGNATURE_NAME),
                title: or("SIGNATURE_TITLE", consts::DEFAULT_SIGNATURE_TITLE),
                phone: or("SIGNATURE_PHONE", consts::DEFAULT_SIGNATURE_PHONE),
                booking_url: or("BOOKING_URL", consts::DEFAULT_BOOKING_URL),
                logo_src: or("LOGO_SRC", consts::DEFAULT_LOGO_SRC),
            },
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        db_url: "http://127.0.0.1:1".to_string(),
        db_api_key: "db-key".to_string(),
        email_api_key: "mail-key".to_string(),
        email_api_url: "http://127.0.0.1:1/v3/mail/send".to_string(),
        sender_email: "recruiter@example.com".to_string(),
        table_name: "leads".to_string(),
        http_port: consts::HTTP_PORT,
        signature: Signature {
            name: "Jane Recruiter".to_string(),
            title: "IT Analyst".to_string(),
            phone: "555-0100".to_string(),
            booking_url: "https://example.com/book".to_string(),
            logo_src: "https://example.com/logo.png".to_string(),
        },
    }
}
