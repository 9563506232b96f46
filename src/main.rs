//! Point d'entrée principal de l'application.
//! Charge la configuration, prépare les clients de la base et de l'email,
//! configure Handlebars pour le rendu des templates, et démarre le serveur web avec Axum.

mod backend;
mod config;
mod consts;
mod database;
mod email;
mod intake;
mod utils;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use dotenv::dotenv;
use handlebars::Handlebars;
use log::{error, info};
use once_cell::sync::Lazy;
use crate::{
    config::Config,
    database::SupabaseStore,
    email::SendGridMailer,
    intake::IntakeHandler,
};

// Initialisation de Handlebars pour le rendu des templates
static HBS: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut hbs = Handlebars::new();
    hbs.register_template_string("index", include_str!("../templates/index.hbs"))
        .expect("Could not register index template");
    hbs.register_template_string("interview_email", include_str!("../templates/interview_email.hbs"))
        .expect("Could not register email template");
    hbs
});

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Arrêt immédiat si la configuration est incomplète
    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let store = SupabaseStore::new(&config).map_err(|e| {
        error!("{}", e);
        anyhow::anyhow!(e)
    })?;
    let mailer = SendGridMailer::new(&config);
    let handler = Arc::new(IntakeHandler::new(config.clone(), Arc::new(store), Arc::new(mailer)));

    let app = backend::router::get_router(handler);

    // Démarrer le serveur web
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!("Listening on {} (table \"{}\")", addr, config.table_name);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to open web server listener")?;

    axum::serve(listener, app)
        .await
        .context("Failed to bind Axum to listener")?;

    Ok(())
}
