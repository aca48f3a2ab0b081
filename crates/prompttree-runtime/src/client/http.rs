//! `reqwest` implementation of [`RemoteStore`].
//!
//! Every request goes to `<base_url>/<segments...>`; segments are appended
//! through the URL path API so names containing `/`, spaces or `%` are
//! percent-encoded rather than interpreted.

use std::time::Duration;

use prompttree_types::{
    ImportTreeRequest, Node, NodeDraft, NodeId, NodePatch, Note, NoteBody, NoteId, PromptDetail,
    PromptDraft, PromptId, PromptPatch, SaveTreeRequest, SavedTree, SavedTreeList, Tree,
    server_error_message,
};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::RemoteStore;
use crate::{Error, Result};

pub struct HttpStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        tracing::debug!(%method, %url, "remote request");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let text = String::from_utf8_lossy(&bytes);
        let mut message = server_error_message(&text);
        if message.is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
        }
        tracing::warn!(%method, %url, status = status.as_u16(), %message, "remote request failed");

        if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound(message))
        } else {
            Err(Error::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let bytes = self.execute(Method::GET, url, None).await?;
        decode(&bytes)
    }

    async fn send<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let bytes = self.execute(method, url, Some(encode(body)?)).await?;
        decode(&bytes)
    }

    async fn send_discarding<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let body = body.map(encode).transpose()?;
        self.execute(method, url, body).await?;
        Ok(())
    }
}

/// Accepts `host:port` as well as explicit `http://` / `https://` URLs
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| Error::Config(format!("invalid API URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("API URL cannot be a base: {}", raw)));
    }
    Ok(url)
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| Error::InvalidOperation(format!("cannot encode body: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::Protocol(e.to_string()))
}

const NO_BODY: Option<&()> = None;

impl RemoteStore for HttpStore {
    async fn health(&self) -> Result<()> {
        self.send_discarding(Method::GET, &["health"], NO_BODY).await
    }

    async fn fetch_tree(&self) -> Result<Tree> {
        self.get(&["tree"]).await
    }

    async fn export_tree(&self) -> Result<Tree> {
        self.get(&["tree", "export"]).await
    }

    async fn import_tree(&self, tree: &Tree) -> Result<()> {
        let body = ImportTreeRequest { tree: tree.clone() };
        self.send_discarding(Method::POST, &["tree", "import"], Some(&body))
            .await
    }

    async fn save_tree(&self, name: &str) -> Result<()> {
        let body = SaveTreeRequest {
            name: name.to_string(),
        };
        self.send_discarding(Method::POST, &["tree", "save"], Some(&body))
            .await
    }

    async fn list_saves(&self) -> Result<Vec<SavedTree>> {
        let list: SavedTreeList = self.get(&["tree", "saves"]).await?;
        Ok(list.trees)
    }

    async fn load_save(&self, name: &str) -> Result<()> {
        self.send_discarding(Method::POST, &["tree", "load", name], NO_BODY)
            .await
    }

    async fn delete_save(&self, name: &str) -> Result<()> {
        self.send_discarding(Method::DELETE, &["tree", "saves", name], NO_BODY)
            .await
    }

    async fn get_prompt(&self, id: PromptId) -> Result<PromptDetail> {
        self.get(&["prompts", &id.to_string()]).await
    }

    async fn create_prompt(&self, draft: &PromptDraft) -> Result<PromptDetail> {
        let id = PromptId::CREATE.to_string();
        self.send(Method::POST, &["prompts", &id], draft).await
    }

    async fn update_prompt(&self, id: PromptId, patch: &PromptPatch) -> Result<PromptDetail> {
        self.send(Method::PUT, &["prompts", &id.to_string()], patch)
            .await
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<()> {
        self.send_discarding(Method::DELETE, &["prompts", &id.to_string()], NO_BODY)
            .await
    }

    async fn list_nodes(&self, prompt: PromptId) -> Result<Vec<Node>> {
        self.get(&["prompts", &prompt.to_string(), "nodes"]).await
    }

    async fn create_node(&self, prompt: PromptId, draft: &NodeDraft) -> Result<Node> {
        self.send(Method::POST, &["prompts", &prompt.to_string(), "nodes"], draft)
            .await
    }

    async fn update_node(
        &self,
        prompt: PromptId,
        node: NodeId,
        patch: &NodePatch,
    ) -> Result<Node> {
        let segments = ["prompts", &prompt.to_string(), "nodes", &node.to_string()];
        self.send(Method::PUT, &segments, patch).await
    }

    async fn delete_node(&self, prompt: PromptId, node: NodeId) -> Result<()> {
        let segments = ["prompts", &prompt.to_string(), "nodes", &node.to_string()];
        self.send_discarding(Method::DELETE, &segments, NO_BODY).await
    }

    async fn list_notes(&self, prompt: PromptId) -> Result<Vec<Note>> {
        // The server answers `null` for a prompt without notes.
        let notes: Option<Vec<Note>> = self.get(&["prompts", &prompt.to_string(), "notes"]).await?;
        Ok(notes.unwrap_or_default())
    }

    async fn create_note(&self, prompt: PromptId, content: &str) -> Result<Note> {
        let body = NoteBody {
            content: content.to_string(),
        };
        self.send(Method::POST, &["prompts", &prompt.to_string(), "notes"], &body)
            .await
    }

    async fn update_note(&self, prompt: PromptId, note: NoteId, content: &str) -> Result<Note> {
        let body = NoteBody {
            content: content.to_string(),
        };
        let segments = ["prompts", &prompt.to_string(), "notes", &note.to_string()];
        self.send(Method::PUT, &segments, &body).await
    }

    async fn delete_note(&self, prompt: PromptId, note: NoteId) -> Result<()> {
        let segments = ["prompts", &prompt.to_string(), "notes", &note.to_string()];
        self.send_discarding(Method::DELETE, &segments, NO_BODY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpStore {
        HttpStore::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_bare_host_gets_http_scheme() {
        let url = parse_base_url("localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_explicit_scheme_is_kept() {
        let url = parse_base_url("https://trees.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = store("http://localhost:8080")
            .endpoint(&["prompts", "3", "nodes", "7"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/prompts/3/nodes/7");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let url = store("http://localhost:8080/api/")
            .endpoint(&["tree", "saves"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/tree/saves");
    }

    #[test]
    fn test_save_names_are_percent_encoded() {
        let url = store("http://localhost:8080")
            .endpoint(&["tree", "load", "v1/final draft"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/tree/load/v1%2Ffinal%20draft");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = parse_base_url("http://[::1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
