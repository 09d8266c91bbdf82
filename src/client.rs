//! Generic CRUD client over a single REST resource.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::state::{Category, RequestState};
use crate::transport::Transport;
use crate::types::{ApiRequest, ApiResponse, LD_JSON, MERGE_PATCH_JSON};

/// A stateful client bound to one resource collection.
///
/// Exposes six operations (list, find, create, replace, partial-update,
/// delete) and observable state for a UI layer: the current entity, the
/// current entity list, the last error, a write-success flag, and
/// per-category busy flags. Operations report exclusively through that
/// state; they return nothing.
///
/// # Example
///
/// ```ignore
/// use resource_client::ResourceClient;
///
/// let mut users: ResourceClient<User> =
///     ResourceClient::new("https://api.example.com", "users")?;
///
/// users.list().await;
/// for user in users.items() {
///     println!("{}", user.name);
/// }
///
/// users.find(42).await;
/// if let Some(error) = users.error() {
///     eprintln!("lookup failed: {error}");
/// }
/// ```
pub struct ResourceClient<T> {
    transport: Transport,
    base: Url,
    path: String,
    unwrap_key: Option<String>,

    data: Option<T>,
    items: Vec<T>,
    error: Option<Error>,
    success: bool,
    state: RequestState,
}

impl<T: DeserializeOwned> ResourceClient<T> {
    /// Create a client for the resource at `base_url` + `path`.
    ///
    /// The base URL is parsed eagerly so a malformed one fails here rather
    /// than on every operation.
    pub fn new(base_url: &str, path: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url)?;

        Ok(Self {
            transport: Transport::new(),
            base,
            path: path.trim_matches('/').to_string(),
            unwrap_key: None,
            data: None,
            items: Vec::new(),
            error: None,
            success: false,
            state: RequestState::default(),
        })
    }

    /// Unwrap list responses through the given key (e.g. `hydra:member`
    /// for JSON-LD collections).
    pub fn with_unwrap_key(mut self, key: impl Into<String>) -> Self {
        self.unwrap_key = Some(key.into());
        self
    }

    /// Use a custom transport (timeout, bearer credentials).
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    // Observable state

    /// The current single entity, committed by find/create/replace/
    /// partial-update and cleared by delete.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The current entity list, committed by list.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The last operation's error, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// True after a create/replace/partial-update/delete completed with its
    /// expected status code.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The per-category busy flags.
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Dismiss the current error without touching any other state.
    pub fn reset_error(&mut self) {
        self.error = None;
    }

    // Operations

    /// Fetch the collection.
    pub async fn list(&mut self) {
        self.list_with(&[]).await;
    }

    /// Fetch the collection with query parameters.
    pub async fn list_with(&mut self, params: &[(&str, &str)]) {
        self.begin(Category::Loading);
        let outcome = self.dispatch_list(params).await;
        self.settle(outcome);
    }

    /// Fetch a single entity by id.
    pub async fn find(&mut self, id: impl Display) {
        self.find_with(id, &[]).await;
    }

    /// Fetch a single entity by id, with query parameters.
    pub async fn find_with(&mut self, id: impl Display, params: &[(&str, &str)]) {
        self.begin(Category::Loading);
        let outcome = self.dispatch_find(&id.to_string(), params).await;
        self.settle(outcome);
    }

    /// Create an entity. The payload is the entity without its
    /// server-assigned id.
    pub async fn create<P: Serialize>(&mut self, data: &P) {
        self.begin(Category::Creating);
        let outcome = self.dispatch_create(data).await;
        self.settle(outcome);
    }

    /// Replace an entity wholesale.
    pub async fn replace<P: Serialize>(&mut self, id: impl Display, data: &P) {
        self.begin(Category::Updating);
        let outcome = self.dispatch_replace(&id.to_string(), data).await;
        self.settle(outcome);
    }

    /// Update only the supplied fields, relying on server-side merge-patch
    /// semantics.
    pub async fn partial_update<P: Serialize>(&mut self, id: impl Display, data: &P) {
        self.begin(Category::Updating);
        let outcome = self.dispatch_partial_update(&id.to_string(), data).await;
        self.settle(outcome);
    }

    /// Delete an entity by id.
    pub async fn delete(&mut self, id: impl Display) {
        self.begin(Category::Deleting);
        let outcome = self.dispatch_delete(&id.to_string()).await;
        self.settle(outcome);
    }

    // Transition plumbing

    /// Unconditional reset, then raise the category's busy flag.
    ///
    /// Clears the error, the success flag and the entity list regardless of
    /// which of them the operation will touch. The single entity is
    /// deliberately retained.
    fn begin(&mut self, category: Category) {
        self.error = None;
        self.success = false;
        self.items.clear();
        self.state.begin(category);
    }

    /// Record the outcome and return to idle.
    fn settle(&mut self, outcome: Result<(), Error>) {
        if let Err(error) = outcome {
            self.error = Some(error);
        }
        self.state.clear();
    }

    async fn dispatch_list(&mut self, params: &[(&str, &str)]) -> Result<(), Error> {
        let request = ApiRequest::get(self.collection_url()?).with_params(params);
        let response = self.transport.execute(&request).await?;

        if response.status != 200 {
            return Err(Error::from_status(&response));
        }

        let value = match &self.unwrap_key {
            Some(key) => response
                .body
                .get(key)
                .cloned()
                .unwrap_or(serde_json::Value::Null),
            None => response.body,
        };
        self.items = serde_json::from_value(value)?;
        Ok(())
    }

    async fn dispatch_find(&mut self, id: &str, params: &[(&str, &str)]) -> Result<(), Error> {
        let request = ApiRequest::get(self.item_url(id)?).with_params(params);
        let response = self.transport.execute(&request).await?;

        if response.status != 200 {
            return Err(Error::from_status(&response));
        }

        self.data = Some(response.json()?);
        Ok(())
    }

    async fn dispatch_create<P: Serialize>(&mut self, data: &P) -> Result<(), Error> {
        let request = ApiRequest::post(self.collection_url()?).with_body(LD_JSON, data)?;
        let response = self.transport.execute(&request).await?;
        self.commit_entity(response, 201)
    }

    async fn dispatch_replace<P: Serialize>(&mut self, id: &str, data: &P) -> Result<(), Error> {
        let request = ApiRequest::put(self.item_url(id)?).with_body(LD_JSON, data)?;
        let response = self.transport.execute(&request).await?;
        self.commit_entity(response, 200)
    }

    async fn dispatch_partial_update<P: Serialize>(
        &mut self,
        id: &str,
        data: &P,
    ) -> Result<(), Error> {
        let request = ApiRequest::patch(self.item_url(id)?).with_body(MERGE_PATCH_JSON, data)?;
        let response = self.transport.execute(&request).await?;
        self.commit_entity(response, 200)
    }

    async fn dispatch_delete(&mut self, id: &str) -> Result<(), Error> {
        let request = ApiRequest::delete(self.item_url(id)?);
        let response = self.transport.execute(&request).await?;

        if response.status != 204 {
            return Err(Error::from_status(&response));
        }

        self.data = None;
        self.success = true;
        Ok(())
    }

    /// Shared success path for the three write operations that return the
    /// committed entity.
    fn commit_entity(&mut self, response: ApiResponse, expected: u16) -> Result<(), Error> {
        if response.status != expected {
            return Err(Error::from_status(&response));
        }

        self.data = Some(response.json()?);
        self.success = true;
        Ok(())
    }

    // URL construction

    fn collection_url(&self) -> Result<Url, Error> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidUrl {
                message: format!("cannot append a resource path to {}", self.base),
            })?;
            segments.pop_if_empty();
            segments.extend(self.path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    fn item_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl {
                message: format!("cannot append an id to {}", self.base),
            })?
            .push(id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct User {
        #[allow(dead_code)]
        id: u64,
    }

    #[test]
    fn collection_url_joins_base_and_path() {
        let client: ResourceClient<User> =
            ResourceClient::new("https://api.example.com", "users").unwrap();
        assert_eq!(
            client.collection_url().unwrap().as_str(),
            "https://api.example.com/users"
        );
    }

    #[test]
    fn collection_url_handles_trailing_slashes() {
        let client: ResourceClient<User> =
            ResourceClient::new("https://api.example.com/v1/", "/users/").unwrap();
        assert_eq!(
            client.collection_url().unwrap().as_str(),
            "https://api.example.com/v1/users"
        );
    }

    #[test]
    fn item_url_appends_id() {
        let client: ResourceClient<User> =
            ResourceClient::new("https://api.example.com/v1", "users").unwrap();
        assert_eq!(
            client.item_url("123").unwrap().as_str(),
            "https://api.example.com/v1/users/123"
        );
    }

    #[test]
    fn item_url_encodes_id_segment() {
        let client: ResourceClient<User> =
            ResourceClient::new("https://api.example.com", "users").unwrap();
        assert_eq!(
            client.item_url("a b").unwrap().as_str(),
            "https://api.example.com/users/a%20b"
        );
    }

    #[test]
    fn new_rejects_malformed_base_url() {
        let client: Result<ResourceClient<User>, _> = ResourceClient::new("not a url", "users");
        assert!(client.is_err());
    }

    #[test]
    fn begin_resets_everything_but_data() {
        let mut client: ResourceClient<serde_json::Value> =
            ResourceClient::new("https://api.example.com", "users").unwrap();

        client.data = Some(serde_json::json!({"id": 1}));
        client.items = vec![serde_json::json!({"id": 2})];
        client.success = true;
        client.error = Some(Error::Protocol {
            status: 500,
            message: "Internal Server Error".to_string(),
        });

        client.begin(Category::Loading);

        assert!(client.data().is_some());
        assert!(client.items().is_empty());
        assert!(!client.success());
        assert!(client.error().is_none());
        assert!(client.state().loading);
    }

    #[test]
    fn settle_stores_error_and_clears_flags() {
        let mut client: ResourceClient<serde_json::Value> =
            ResourceClient::new("https://api.example.com", "users").unwrap();

        client.begin(Category::Updating);
        client.settle(Err(Error::Protocol {
            status: 404,
            message: "Not Found".to_string(),
        }));

        assert!(client.state().is_idle());
        assert_eq!(client.error().and_then(Error::status), Some(404));
    }
}
