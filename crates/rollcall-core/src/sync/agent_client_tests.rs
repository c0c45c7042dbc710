//! Tests for agent_client against a mock sync agent.

#[cfg(test)]
mod tests {
    use super::super::agent_client::SyncAgentClient;
    use crate::sync::types::SyncError;
    use std::time::Duration;

    fn client_for(url: &str) -> SyncAgentClient {
        SyncAgentClient::new(url, "rollcall-test", Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_probe_success() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/v1/health").with_status(200).create();

        let client = client_for(&server.url());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        client.probe().unwrap();
        mock.assert();
    }

    #[test]
    fn test_probe_unhealthy_agent_is_an_error() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/v1/health").with_status(500).create();

        let client = client_for(&server.url());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let result = client.probe();
        assert!(matches!(result, Err(SyncError::AgentApi(_))));
    }

    #[test]
    fn test_probe_unreachable_agent_is_an_error() {
        // Nothing listens on port 1
        let client = client_for("http://127.0.0.1:1");
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let result = client.probe();
        assert!(matches!(result, Err(SyncError::Network(_))));
    }

    #[test]
    fn test_request_sync_posts_tag_and_installation() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/sync/requests")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "tag": "sync-attendance",
                "installation_id": "rollcall-test",
            })))
            .with_status(202)
            .create();

        let client = client_for(&server.url());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        client.request_sync("sync-attendance").unwrap();
        mock.assert();
    }

    #[test]
    fn test_request_sync_server_error_surfaces() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/sync/requests")
            .with_status(503)
            .create();

        let client = client_for(&server.url());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let result = client.request_sync("sync-attendance");
        assert!(matches!(result, Err(SyncError::AgentApi(_))));
    }
}
