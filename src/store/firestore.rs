//! Firestore REST client.
//!
//! Talks to the Firestore v1 REST API with an OAuth2 access token minted from
//! a Google service account (JWT bearer grant, RS256). Firestore wraps every
//! field in a typed value (`{"stringValue": "..."}`); this module converts those
//! to and from plain JSON so the rest of the crate only sees [`Fields`].

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use url::Url;

use super::{Document, DocumentStore, Fields, StoreError};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1/";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Documents requested per page when listing a collection.
const PAGE_SIZE: u32 = 300;

/// Lifetime requested for the signed assertion, in seconds (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// A cached token is replaced this many seconds before it expires.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// The parts of a Google service account key file the client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    /// Decode a base64 encoded service account JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Credentials` if the blob is not base64, not JSON,
    /// or lacks a project id or client email.
    pub fn from_base64(encoded: &str) -> Result<Self, StoreError> {
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| StoreError::Credentials(format!("not valid base64: {e}")))?;

        let account: ServiceAccount = serde_json::from_slice(&decoded)
            .map_err(|e| StoreError::Credentials(format!("not a service account JSON: {e}")))?;

        if account.project_id.trim().is_empty() {
            return Err(StoreError::Credentials("project_id is empty".to_string()));
        }
        if account.client_email.trim().is_empty() {
            return Err(StoreError::Credentials("client_email is empty".to_string()));
        }

        Ok(account)
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Claims of the self-signed assertion exchanged for an access token.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) > now
    }
}

/// A document as returned by the Firestore REST API.
#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreDocument {
    fn into_document(self) -> Result<Document, StoreError> {
        let id = document_id(&self.name)
            .ok_or_else(|| StoreError::Decode(format!("invalid document name `{}`", self.name)))?
            .to_string();

        Ok(Document {
            id,
            fields: decode_fields(&self.fields)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

/// One element of a `runQuery` response stream. Elements without a document
/// only carry progress metadata.
#[derive(Debug, Deserialize)]
struct RunQueryResponse {
    document: Option<FirestoreDocument>,
}

/// Document store backed by Cloud Firestore.
pub struct FirestoreStore {
    client: reqwest::Client,
    account: ServiceAccount,
    signing_key: EncodingKey,
    documents_url: Url,
    token: Mutex<Option<AccessToken>>,
}

impl FirestoreStore {
    /// Create a client for the service account's project.
    ///
    /// No network call is made until the first store operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Credentials` if the private key is not an RSA PEM
    /// key, or `StoreError::Transport` if the HTTP client cannot be built.
    pub fn new(account: ServiceAccount) -> Result<Self, StoreError> {
        let signing_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| StoreError::Credentials(format!("unusable private key: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let documents_url = documents_url(&account.project_id)?;

        Ok(Self {
            client,
            account,
            signing_key,
            documents_url,
            token: Mutex::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.account.project_id
    }

    /// Return a valid access token, minting a new one when the cached token
    /// is missing or about to expire.
    async fn access_token(&self) -> Result<String, StoreError> {
        let mut slot = self.token.lock().await;

        if let Some(token) = slot.as_ref().filter(|token| token.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *slot = Some(token);

        Ok(value)
    }

    async fn fetch_token(&self) -> Result<AccessToken, StoreError> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| StoreError::Auth(format!("could not sign assertion: {e}")))?;

        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("token response: {e}")))?;

        tracing::debug!(expires_in = token.expires_in, "Obtained Firestore access token");

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        })
    }

    /// Send an authorised request and decode its JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let token = self.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Decode("documents URL cannot be a base".to_string()))?
            .push(collection);
        Ok(url)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    fn backend(&self) -> &'static str {
        "firestore"
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.collection_url(collection)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &PAGE_SIZE.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let page: ListDocumentsResponse = self.send(self.client.get(url)).await?;
            for document in page.documents {
                documents.push(document.into_document()?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(collection, count = documents.len(), "Listed Firestore collection");

        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let url = self.collection_url(collection)?;
        let body = json!({ "fields": encode_fields(&fields) });

        let created: FirestoreDocument = self.send(self.client.post(url).json(&body)).await?;

        created.into_document()
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let url = run_query_url(&self.documents_url)?;
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": encode_value(value),
                    }
                }
            }
        });

        let results: Vec<RunQueryResponse> = self.send(self.client.post(url).json(&body)).await?;

        results
            .into_iter()
            .filter_map(|result| result.document)
            .map(FirestoreDocument::into_document)
            .collect()
    }
}

/// `.../v1/projects/{project}/databases/(default)/documents`
fn documents_url(project_id: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(FIRESTORE_BASE_URL)
        .map_err(|e| StoreError::Decode(format!("invalid Firestore base URL: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| StoreError::Decode("Firestore base URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["projects", project_id, "databases", "(default)", "documents"]);

    Ok(url)
}

/// `.../databases/(default)/documents:runQuery`
fn run_query_url(documents_url: &Url) -> Result<Url, StoreError> {
    let mut url = documents_url.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::Decode("documents URL cannot be a base".to_string()))?
        .pop()
        .push("documents:runQuery");
    Ok(url)
}

/// The key of a document is the last segment of its resource name.
fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

fn decode_fields(fields: &Map<String, Value>) -> Result<Fields, StoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Convert a Firestore typed value into plain JSON.
fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let (kind, inner) = value
        .as_object()
        .and_then(|typed| typed.iter().next())
        .ok_or_else(|| StoreError::Decode(format!("not a Firestore value: {value}")))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue"
        | "bytesValue" | "geoPointValue" => Ok(inner.clone()),
        // int64 values travel as decimal strings
        "integerValue" => match inner {
            Value::String(digits) => digits
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| StoreError::Decode(format!("bad integerValue `{digits}`: {e}"))),
            Value::Number(_) => Ok(inner.clone()),
            other => Err(StoreError::Decode(format!("bad integerValue {other}"))),
        },
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Object(fields))
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        other => Err(StoreError::Decode(format!(
            "unsupported Firestore value type `{other}`"
        ))),
    }
}

fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Convert plain JSON into a Firestore typed value.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            json!({ "integerValue": number.to_string() })
        }
        Value::Number(number) => json!({ "doubleValue": number }),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(values) => json!({
            "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}
