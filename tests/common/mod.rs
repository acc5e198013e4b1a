//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use curious_facts_skill::config::SkillConfig;
use curious_facts_skill::lifecycle::{build_pipeline, Shutdown};
use curious_facts_skill::{HttpServer, RequestEnvelope, ResponseEnvelope};
use tokio::net::TcpListener;

/// A skill server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST an envelope to the skill and decode the answer.
    pub async fn invoke(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let res = self
            .client
            .post(self.url("/"))
            .json(envelope)
            .send()
            .await
            .expect("skill unreachable");
        assert_eq!(res.status(), 200);
        res.json().await.expect("response envelope")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the skill with `config`, bound to 127.0.0.1 on a free port.
pub async fn start_skill_server(mut config: SkillConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let pipeline = Arc::new(build_pipeline(&config).expect("pipeline"));
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, pipeline);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        shutdown,
        client,
    }
}
