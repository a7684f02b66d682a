//! The container-orchestration manifest (`docker-compose.yml`).

use serde::Serialize;

use tinydash_common::config::PROXY_CONTAINER_PORT;

use super::ConsoleProxy;
use super::document::OrderedMap;

const DASHBOARD_SERVICE: &str = "homepage";
const DASHBOARD_IMAGE: &str = "ghcr.io/gethomepage/homepage:latest";
const DASHBOARD_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize)]
pub struct ComposeFile {
    pub services: OrderedMap<ComposeService>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeService {
    pub image: String,
    pub container_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
    pub ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
}

impl ComposeService {
    /// The dashboard itself, with its config folder and the Docker socket mounted.
    fn dashboard() -> Self {
        Self {
            image: DASHBOARD_IMAGE.to_string(),
            container_name: DASHBOARD_SERVICE.to_string(),
            environment: Vec::new(),
            ports: vec![format!("{DASHBOARD_PORT}:{DASHBOARD_PORT}")],
            volumes: vec![
                "./config:/app/config".to_string(),
                "/var/run/docker.sock:/var/run/docker.sock".to_string(),
            ],
        }
    }

    /// A console proxy pointed at one controller's web interface.
    fn console_proxy(proxy: &ConsoleProxy<'_>, image: &str) -> Self {
        Self {
            image: image.to_string(),
            container_name: proxy.service_name.clone(),
            environment: vec![format!("start_url=https://{}", proxy.host.addr())],
            ports: vec![format!("{}:{PROXY_CONTAINER_PORT}", proxy.local_port)],
            volumes: Vec::new(),
        }
    }
}

pub fn build(proxies: &[ConsoleProxy<'_>], image: &str) -> ComposeFile {
    let mut services = OrderedMap::new();
    services.insert(DASHBOARD_SERVICE, ComposeService::dashboard());

    for proxy in proxies {
        services.insert(
            proxy.service_name.clone(),
            ComposeService::console_proxy(proxy, image),
        );
    }

    ComposeFile { services }
}
