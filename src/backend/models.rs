//! Définitions des structures pour les interactions avec la page.
//! Contient le formulaire d'inscription, les bannières de statut et le contexte de rendu.

use serde::{Deserialize, Serialize};

use crate::utils::error_messages::IntakeError;
use crate::utils::validation::{EmailInput, TextInput};

/// Champs bruts du formulaire, tels que soumis.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Formulaire dont chaque champ a passé la validation.
#[derive(Clone, Debug)]
pub struct ValidatedRegistration {
    pub first_name: TextInput,
    pub last_name: TextInput,
    pub email: EmailInput,
}

impl RegistrationForm {
    /// Vérifie d'abord que tous les champs sont remplis, puis le format de l'email.
    pub fn validate(&self) -> Result<ValidatedRegistration, IntakeError> {
        let first_name = TextInput::new_required(&self.first_name)?;
        let last_name = TextInput::new_required(&self.last_name)?;
        let email = EmailInput::new(&self.email)?;

        Ok(ValidatedRegistration {
            first_name,
            last_name,
            email,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

/// Message de statut affiché sous le formulaire
#[derive(Clone, Debug, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn success(message: &str) -> Self {
        Self { level: BannerLevel::Success, message: message.to_string() }
    }

    pub fn warning(message: &str) -> Self {
        Self { level: BannerLevel::Warning, message: message.to_string() }
    }

    pub fn error(message: &str) -> Self {
        Self { level: BannerLevel::Error, message: message.to_string() }
    }
}

/// Contexte Handlebars de la page `index`.
#[derive(Serialize, Default)]
pub struct PageContext {
    pub form: RegistrationForm,
    pub banners: Vec<Banner>,
    pub inserted: Option<String>,
    pub port: u16,
}
