//! One image's pipeline: refs to versions to config to ports

use charter_core::{
    CascadePatterns, Config, ContainerPort, VersionList, declared_ports, exposed_ports,
    resolve_versions,
};

use crate::client::RemoteClient;
use crate::error::Result;

const REGISTRY_PREFIX: &str = "lscr.io/linuxserver/";
const CONFIG_FILE: &str = "readme-vars.yml";
const BUILD_FILE: &str = "Dockerfile";

/// A published container image, identified by its short name
pub struct Image {
    name: String,
    versions: Option<VersionList>,
}

impl Image {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The image's pullable registry reference
    pub fn registry_url(&self) -> String {
        format!("{REGISTRY_PREFIX}{}", self.name)
    }

    /// Resolved versions, ascending; empty when no ref matched any tier
    ///
    /// The tag listing and resolution run once per Image and are cached.
    pub async fn versions(
        &mut self,
        client: &RemoteClient,
        patterns: &CascadePatterns,
    ) -> Result<VersionList> {
        if let Some(versions) = &self.versions {
            return Ok(versions.clone());
        }

        let refs = client.list_tag_refs(&self.name).await?;
        let resolved = resolve_versions(patterns, &refs)?;
        self.versions = Some(resolved.clone());
        Ok(resolved)
    }

    /// Fetch and decode the configuration document for one tag
    pub async fn config(&self, client: &RemoteClient, tag: &str) -> Result<Config> {
        let body = client.fetch_raw(&self.name, tag, CONFIG_FILE).await?;
        Ok(Config::parse(&body)?)
    }

    /// Ports for one tag: declared lists first, build-file scan as fallback
    ///
    /// The build file is only fetched when the config declares no ports.
    pub async fn ports(
        &self,
        client: &RemoteClient,
        tag: &str,
        config: &Config,
    ) -> Result<Vec<ContainerPort>> {
        if let Some(ports) = declared_ports(config)? {
            return Ok(ports);
        }

        let body = client.fetch_raw(&self.name, tag, BUILD_FILE).await?;
        let text = String::from_utf8_lossy(&body);
        Ok(exposed_ports(&text)?)
    }
}
