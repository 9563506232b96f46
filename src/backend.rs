//! Module principal pour le backend de l'application.
//! Contient les gestionnaires pour les routes, les modèles de la page
//! et le routeur.
pub mod handlers;
pub mod models;
pub mod router;
