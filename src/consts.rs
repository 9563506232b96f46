//! Définition des constantes globales pour l'application.

pub const HTTP_PORT: u16 = 8080; // Port par défaut pour le serveur HTTP.
pub const DEFAULT_TABLE: &str = "leads"; // Table des leads par défaut.
pub const EMAIL_API_URL: &str = "https://api.sendgrid.com/v3/mail/send"; // Endpoint SendGrid v3.
pub const LEAD_STATUS: &str = "Email Sent"; // Statut écrit à chaque soumission.
pub const EMAIL_ACCEPTED: u16 = 202; // Seul code considéré comme un envoi réussi.

// Bloc de signature de l'email, surchargeable par la configuration.
pub const DEFAULT_LOGO_SRC: &str = "suryl_logo_rgb.png";
pub const DEFAULT_SIGNATURE_NAME: &str = "Callaway Crenshaw";
pub const DEFAULT_SIGNATURE_TITLE: &str = "IT Analyst, Suryl";
pub const DEFAULT_SIGNATURE_PHONE: &str = "405-403-9513";
pub const DEFAULT_BOOKING_URL: &str = "https://outlook.office.com/bookwithme/user/e04031b927fb422fb39dbab02a827171@suryl.com/meetingtype/V5A9uUz5REmI_1DSxJ_lgQ2?anonymous&ep=mLinkFromTile";
