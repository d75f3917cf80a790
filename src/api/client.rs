use super::{ApiError, ApiRequest, ApiResponse, AuthContext, Transport, TransportError};
use reqwest::{header::ACCEPT, Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Reqwest-backed transport rooted at an API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method, &url).header(ACCEPT, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| TransportError(e.to_string()))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse { status, body })
    }
}

/// The single typed client shared by every component.
///
/// The credential is passed in explicitly and attached to every request made
/// through this client.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    auth: Option<AuthContext>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, auth: AuthContext) -> Self {
        Self {
            transport,
            auth: Some(auth),
        }
    }

    /// A client without a credential, for login and signup.
    pub fn anonymous(transport: T) -> Self {
        Self { transport, auth: None }
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: self.auth.as_ref().map(|auth| auth.token.clone()),
            body,
        };
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.send(request).await.map_err(|err| {
            debug!(path, error = %err, "transport failure");
            ApiError::from(err)
        })?;
        debug!(path, status = %response.status, "received response");
        Ok(response)
    }

    pub(crate) async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        self.send(Method::GET, path, None).await?.into_json()
    }

    pub(crate) async fn post_json<D: DeserializeOwned>(&self, path: &str, body: Value) -> Result<D, ApiError> {
        self.send(Method::POST, path, Some(body)).await?.into_json()
    }

    pub(crate) async fn post_unit(&self, path: &str, body: Value) -> Result<(), ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        if response.status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }
}

impl ApiResponse {
    /// Checks the status and decodes the body.
    pub fn into_json<D: DeserializeOwned>(self) -> Result<D, ApiError> {
        if !self.status.is_success() {
            return Err(ApiError::from_status(self.status, &self.body));
        }
        decode(self.body)
    }
}

/// Decodes a response body, unwrapping a `{ "data": ... }` envelope when
/// present.
pub fn decode<D: DeserializeOwned>(body: Value) -> Result<D, ApiError> {
    let body = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
