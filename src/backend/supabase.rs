//! Supabase integration: PostgREST insert and edge-function invoke.

use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::backend::{BackendError, NotificationDispatcher, RecordStore};
use crate::config::BackendConfig;
use crate::domain::{LeadSubmission, LoanEmail};

pub const SUBMISSIONS_TABLE: &str = "loan_submissions";
pub const EMAIL_FUNCTION: &str = "send-loan-email";

pub struct SupabaseClient {
    client: Client,
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    pub fn function_url(&self, function: &str) -> String {
        format!("{}/functions/v1/{function}", self.config.url)
    }

    fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        url: &str,
        body: &T,
        prefer: Option<&str>,
    ) -> Result<Response, BackendError> {
        let mut req = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(body);
        if let Some(prefer) = prefer {
            req = req.header("Prefer", prefer);
        }

        let resp = req.send().map_err(|source| BackendError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(BackendError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        Ok(resp)
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

impl RecordStore for SupabaseClient {
    fn insert_lead(&self, record: &LeadSubmission) -> Result<(), BackendError> {
        let url = self.table_url(SUBMISSIONS_TABLE);
        tracing::debug!(%url, "inserting lead");
        self.post_json(
            SUBMISSIONS_TABLE,
            &url,
            std::slice::from_ref(record),
            Some("return=minimal"),
        )?;
        Ok(())
    }
}

impl NotificationDispatcher for SupabaseClient {
    fn send_loan_email(&self, payload: &LoanEmail) -> Result<(), BackendError> {
        let url = self.function_url(EMAIL_FUNCTION);
        tracing::debug!(%url, "invoking e-mail function");
        self.post_json(EMAIL_FUNCTION, &url, payload, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(BackendConfig::new("https://demo.supabase.co/", "anon-key"))
    }

    #[test]
    fn endpoint_urls() {
        let c = client();
        assert_eq!(
            c.table_url(SUBMISSIONS_TABLE),
            "https://demo.supabase.co/rest/v1/loan_submissions"
        );
        assert_eq!(
            c.function_url(EMAIL_FUNCTION),
            "https://demo.supabase.co/functions/v1/send-loan-email"
        );
    }

    #[test]
    fn debug_does_not_leak_key() {
        let rendered = format!("{:?}", client());
        assert!(rendered.contains("demo.supabase.co"));
        assert!(!rendered.contains("anon-key"));
    }

    #[test]
    fn insert_body_is_a_one_row_array() {
        let lead = LeadSubmission::new("A", "a@b.c", 5_000.0, "Crédit auto", 12);
        let body = serde_json::to_value(std::slice::from_ref(&lead)).unwrap();
        assert_eq!(body.as_array().map(|rows| rows.len()), Some(1));
        assert_eq!(body[0]["loan_type"], "Crédit auto");
    }
}
