//! Controlled clients (open pages).

use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use tracing::debug;
use url::Url;

use crate::worker::WorkerId;
use crate::SwError;

/// A client (open page).
#[derive(Debug, Clone)]
pub struct Client {
    /// Client ID.
    pub id: String,

    /// Client URL.
    pub url: Url,

    /// The worker currently controlling this client, if any.
    pub controller: Option<WorkerId>,
}

impl Client {
    /// Create an uncontrolled client.
    pub fn new(id: impl Into<String>, url: Url) -> Self {
        Self {
            id: id.into(),
            url,
            controller: None,
        }
    }

    /// Whether this worker controls the client.
    pub fn is_controlled_by(&self, worker: WorkerId) -> bool {
        self.controller == Some(worker)
    }
}

/// Registry of open clients.
#[derive(Debug, Default)]
pub struct Clients {
    clients: HashMap<String, Client>,
}

impl Clients {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a client by ID.
    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    /// All clients.
    pub fn match_all(&self) -> Vec<&Client> {
        self.clients.values().collect()
    }

    /// Add a client.
    pub fn add(&mut self, client: Client) {
        self.clients.insert(client.id.clone(), client);
    }

    /// Remove a client (page closed).
    pub fn remove(&mut self, id: &str) -> Option<Client> {
        self.clients.remove(id)
    }

    /// Claim every client for the given worker.
    ///
    /// Runs at activation so the new routing policy applies to already-open
    /// pages without a reload.
    pub fn claim(&mut self, worker: WorkerId) {
        for client in self.clients.values_mut() {
            client.controller = Some(worker);
        }
        debug!(count = self.clients.len(), "Clients claimed");
    }

    /// Open a new window at the given URL.
    pub fn open_window(&mut self, url: &str) -> Result<Client, SwError> {
        let url = Url::parse(url).map_err(|e| SwError::InvalidRequest(e.to_string()))?;

        let id = format!("client-{}", next_client_serial());
        let client = Client::new(id.clone(), url);
        self.clients.insert(id, client.clone());
        Ok(client)
    }
}

fn next_client_serial() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut clients = Clients::new();
        let url = Url::parse("https://music.example.com/").unwrap();
        clients.add(Client::new("page-1", url));

        assert!(clients.get("page-1").is_some());
        assert!(clients.get("page-2").is_none());
    }

    #[test]
    fn test_claim_sets_controller() {
        let mut clients = Clients::new();
        let url = Url::parse("https://music.example.com/").unwrap();
        clients.add(Client::new("page-1", url.clone()));
        clients.add(Client::new("page-2", url));

        let worker = WorkerId::new();
        clients.claim(worker);

        for client in clients.match_all() {
            assert!(client.is_controlled_by(worker));
        }
    }

    #[test]
    fn test_remove() {
        let mut clients = Clients::new();
        let url = Url::parse("https://music.example.com/").unwrap();
        clients.add(Client::new("page-1", url));

        assert!(clients.remove("page-1").is_some());
        assert!(clients.remove("page-1").is_none());
    }

    #[test]
    fn test_open_window() {
        let mut clients = Clients::new();
        let client = clients.open_window("https://music.example.com/").unwrap();

        assert!(client.controller.is_none());
        assert!(clients.get(&client.id).is_some());
    }

    #[test]
    fn test_open_window_invalid_url() {
        let mut clients = Clients::new();
        assert!(clients.open_window("not a url").is_err());
    }
}
