//! Persistance des leads dans une table hébergée exposée en REST (Supabase / PostgREST).

use async_trait::async_trait;
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::consts::LEAD_STATUS;
use crate::utils::error_messages::IntakeError;

/// Un enregistrement créé à chaque soumission du formulaire.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Lead {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Email Date")]
    pub email_date: String,
}

impl Lead {
    /// Construit un lead horodaté maintenant (horloge locale, ISO-8601 sans fuseau).
    /// Le statut est fixé avant l'envoi de l'email et n'est jamais corrigé ensuite.
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            status: LEAD_STATUS.to_string(),
            email_date: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

/// Réponse brute du service de persistance.
#[derive(Clone, Debug, Default)]
pub struct InsertResponse {
    pub data: Vec<Value>,
    pub status_code: u16,
    pub text: String,
}

impl InsertResponse {
    /// L'insertion n'est réussie que si des lignes ont été renvoyées.
    pub fn is_success(&self) -> bool {
        !self.data.is_empty()
    }
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insère un lead dans la table donnée.
    /// Une erreur n'est renvoyée que pour un problème de transport.
    async fn insert(&self, table_name: &str, lead: &Lead) -> Result<InsertResponse, IntakeError>;
}

/// Client REST pour une table Supabase.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(config: &Config) -> Result<Self, IntakeError> {
        let base_url = Url::parse(&config.db_url)
            .map_err(|e| IntakeError::Persistence(format!("Error initializing database client: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(IntakeError::Persistence(format!(
                "Error initializing database client: {} cannot be a base URL",
                config.db_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config.db_api_key.clone(),
        })
    }

    /// `{base}/rest/v1/{table}` avec le nom de table encodé comme segment.
    fn table_url(&self, table_name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["rest", "v1", table_name]);
        }
        url
    }
}

#[async_trait]
impl LeadStore for SupabaseStore {
    async fn insert(&self, table_name: &str, lead: &Lead) -> Result<InsertResponse, IntakeError> {
        let url = self.table_url(table_name);
        debug!("Inserting lead into {}", url);

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[lead])
            .send()
            .await
            .map_err(|e| IntakeError::Persistence(e.to_string()))?;

        let status_code = resp.status().as_u16();
        let success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| IntakeError::Persistence(e.to_string()))?;

        let data = if success {
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(rows)) => rows,
                Ok(Value::Null) | Err(_) => Vec::new(),
                Ok(row) => vec![row],
            }
        } else {
            Vec::new()
        };

        Ok(InsertResponse {
            data,
            status_code,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use axum::{extract::Path, http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use chrono::NaiveDateTime;
    use std::net::SocketAddr;

    async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    fn store_for(addr: SocketAddr) -> SupabaseStore {
        let mut config = test_config();
        config.db_url = format!("http://{addr}");
        SupabaseStore::new(&config).unwrap()
    }

    #[test]
    fn test_lead_fields_and_timestamp() {
        let lead = Lead::new("John", "Doe", "john.doe@example.com");
        assert_eq!(lead.status, "Email Sent");
        assert!(NaiveDateTime::parse_from_str(&lead.email_date, "%Y-%m-%dT%H:%M:%S%.f").is_ok());

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["First Name"], "John");
        assert_eq!(json["Last Name"], "Doe");
        assert_eq!(json["Email"], "john.doe@example.com");
        assert_eq!(json["Status"], "Email Sent");
        assert!(json.get("Email Date").is_some());
    }

    #[test]
    fn test_invalid_db_url_fails_at_startup() {
        let mut config = test_config();
        config.db_url = "not a url".to_string();
        assert!(matches!(SupabaseStore::new(&config), Err(IntakeError::Persistence(_))));
    }

    #[test]
    fn test_table_name_is_encoded() {
        let mut config = test_config();
        config.db_url = "https://project.supabase.co/".to_string();
        let store = SupabaseStore::new(&config).unwrap();
        assert_eq!(
            store.table_url("Email Database").as_str(),
            "https://project.supabase.co/rest/v1/Email%20Database"
        );
    }

    #[tokio::test]
    async fn test_insert_returns_rows() {
        let app = Router::new().route(
            "/rest/v1/:table",
            post(|Path(table): Path<String>, headers: HeaderMap, Json(rows): Json<Vec<Value>>| async move {
                assert_eq!(table, "leads");
                assert_eq!(headers["apikey"], "db-key");
                assert_eq!(headers["authorization"], "Bearer db-key");
                assert_eq!(headers["prefer"], "return=representation");
                (StatusCode::CREATED, Json(rows))
            }),
        );
        let store = store_for(spawn(app).await);

        let lead = Lead::new("John", "Doe", "john.doe@example.com");
        let resp = store.insert("leads", &lead).await.unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.data[0]["Email"], "john.doe@example.com");
    }

    #[tokio::test]
    async fn test_insert_rejected_by_server() {
        let app = Router::new().route(
            "/rest/v1/:table",
            post(|| async { (StatusCode::UNAUTHORIZED, r#"{"message":"Invalid API key"}"#) }),
        );
        let store = store_for(spawn(app).await);

        let resp = store
            .insert("leads", &Lead::new("John", "Doe", "john.doe@example.com"))
            .await
            .unwrap();

        assert!(!resp.is_success());
        assert_eq!(resp.status_code, 401);
        assert!(resp.text.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_insert_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = store_for(addr)
            .insert("leads", &Lead::new("John", "Doe", "john.doe@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::Persistence(_)));
    }
}
