//! The per-version configuration document (`readme-vars.yml`)
//!
//! Decoding happens in two steps: a plain YAML decode against the fixed
//! schema, then an interpolation pass that re-renders the handful of fields
//! allowed to reference sibling fields of the same document. Which fields get
//! the second pass is declared right here in `interpolate`, not inferred.

use serde::{Deserialize, Serialize};
use tera::{Context as TeraContext, Tera};

use crate::error::{CoreError, Result};

/// Decoded configuration for one image version
///
/// Field names mirror the document's snake_case keys. Unknown keys are
/// ignored; missing keys take their zero value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_name: String,
    pub project_url: String,
    pub project_logo: String,
    pub project_blurb: String,
    pub project_repo_name: String,
    pub project_deprecation_status: bool,
    pub project_deprecation_message: String,

    pub project_blurb_optional_extras_enabled: bool,
    pub project_blurb_optional_extras: Vec<String>,
    pub available_architectures: Vec<Architecture>,
    pub development_versions: bool,
    pub development_versions_items: Vec<DevelopmentVersion>,

    pub common_param_env_vars_enabled: bool,
    pub param_container_name: String,
    pub param_usage_include_hostname: bool,
    pub param_hostname: String,
    pub param_hostname_desc: String,
    pub param_usage_include_mac_address: bool,
    pub param_mac_address: String,
    pub param_mac_address_desc: String,
    pub param_usage_include_net: bool,
    pub param_net: String,
    pub param_net_desc: String,
    pub param_usage_include_env: bool,
    pub param_env_vars: Vec<EnvVar>,
    pub param_usage_include_vols: bool,
    pub param_volumes: Vec<Volume>,
    pub param_usage_include_ports: bool,
    pub param_ports: Vec<Port>,
    pub param_device_map: bool,
    pub param_devices: Vec<Device>,
    pub cap_add_param: bool,
    pub cap_add_param_vars: Vec<CapAddVar>,
    pub security_opt_param: bool,
    pub security_opt_param_vars: Vec<SecurityOptVar>,

    pub opt_param_usage_include_env: bool,
    pub opt_param_env_vars: Vec<EnvVar>,
    pub opt_param_usage_include_vols: bool,
    pub opt_param_volumes: Vec<Volume>,
    pub opt_param_usage_include_ports: bool,
    pub opt_param_ports: Vec<Port>,
    pub opt_param_device_map: bool,
    pub opt_param_devices: Vec<Device>,
    pub opt_cap_add_param: bool,
    pub opt_cap_add_param_vars: Vec<CapAddVar>,
    pub opt_security_opt_param: bool,
    pub opt_security_opt_param_vars: Vec<SecurityOptVar>,

    pub unraid_template_sync: bool,
    pub unraid_template: bool,
    pub unraid_requirement: bool,
    pub optional_block_1: bool,
    pub optional_block_1_items: Vec<String>,
    pub app_setup_block_enabled: bool,
    pub app_setup_block: String,
    pub readme_hwaccel: bool,
    pub readme_keyboard: bool,
    pub readme_media: bool,
    pub readme_seccomp: bool,
    pub external_application_snippet_enabled: bool,
    pub external_application_cli_block: String,
    pub external_application_compose_block: String,
    pub external_application_unraid_block: String,
    pub changelogs: Vec<Changelog>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    pub arch: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DevelopmentVersion {
    pub tag: String,
    pub desc: String,
    pub extra: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    pub env_var: String,
    pub env_value: String,
    pub desc: String,
    pub env_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub vol_path: String,
    pub vol_host_path: String,
    pub desc: String,
    pub name: String,
    pub default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    pub external_port: String,
    pub internal_port: String,
    pub port_desc: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub device_path: String,
    pub device_host_path: String,
    pub desc: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapAddVar {
    pub cap_add_var: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityOptVar {
    pub run_var: String,
    pub compose_var: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Changelog {
    pub date: String,
    pub desc: String,
}

impl Config {
    /// Decode a configuration document and run the interpolation pass
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut config: Config = serde_yaml::from_slice(bytes)?;
        config.interpolate()?;
        Ok(config)
    }

    /// Re-render the template-eligible fields in place
    ///
    /// The context is fixed: the document's own `project_name`/`project_url`
    /// plus the three architecture display names. Every other field is left
    /// untouched. A template error in any eligible field fails the decode.
    fn interpolate(&mut self) -> Result<()> {
        let mut ctx = TeraContext::new();
        ctx.insert("project_name", &self.project_name);
        ctx.insert("project_url", &self.project_url);
        ctx.insert("arch_x86_64", "x86-64");
        ctx.insert("arch_arm64", "arm64");
        ctx.insert("arch_armhf", "armhf");

        render_in_place(&mut self.project_blurb, "project_blurb", &ctx)?;
        render_in_place(&mut self.project_repo_name, "project_repo_name", &ctx)?;
        render_in_place(&mut self.param_container_name, "param_container_name", &ctx)?;
        for architecture in &mut self.available_architectures {
            render_in_place(&mut architecture.arch, "available_architectures.arch", &ctx)?;
        }

        Ok(())
    }
}

fn render_in_place(field: &mut String, name: &'static str, ctx: &TeraContext) -> Result<()> {
    let rendered = Tera::one_off(field, ctx, false).map_err(|source| CoreError::Interpolation {
        field: name,
        source,
    })?;
    *field = rendered;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
project_name: radarr
project_url: "https://radarr.video"
project_blurb: "[{{ project_name | capitalize }}]({{ project_url }}) is a movie manager."
project_repo_name: "docker-{{ project_name }}"
param_container_name: "{{ project_name }}"
available_architectures:
  - { arch: "{{ arch_x86_64 }}", tag: "amd64-latest" }
  - { arch: "{{ arch_arm64 }}", tag: "arm64v8-latest" }
param_usage_include_ports: true
param_ports:
  - { external_port: "7878", internal_port: "7878", port_desc: "web ui", name: "webui" }
changelogs:
  - { date: "2024-01-05:", desc: "Rebase to Alpine 3.19." }
unknown_future_field: ignored
"#;

    #[test]
    fn test_parse_and_interpolate() {
        let config = Config::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(config.project_name, "radarr");
        assert_eq!(
            config.project_blurb,
            "[Radarr](https://radarr.video) is a movie manager."
        );
        assert_eq!(config.project_repo_name, "docker-radarr");
        assert_eq!(config.param_container_name, "radarr");
        assert_eq!(config.available_architectures[0].arch, "x86-64");
        assert_eq!(config.available_architectures[1].arch, "arm64");
    }

    #[test]
    fn test_non_eligible_fields_untouched() {
        let yaml = r#"
project_name: sonarr
project_url: "{{ project_name }}"
project_logo: "{{ project_name }}.png"
app_setup_block: "visit {{ project_url }} to finish setup"
changelogs:
  - { date: "2024-01-05:", desc: "keep {{ project_name }} literal" }
"#;
        let config = Config::parse(yaml.as_bytes()).unwrap();
        // Only the declared fields are rendered; placeholders elsewhere stay
        // byte-identical.
        assert_eq!(config.project_url, "{{ project_name }}");
        assert_eq!(config.project_logo, "{{ project_name }}.png");
        assert_eq!(config.app_setup_block, "visit {{ project_url }} to finish setup");
        assert_eq!(config.changelogs[0].desc, "keep {{ project_name }} literal");
    }

    #[test]
    fn test_missing_fields_default() {
        let config = Config::parse(b"project_name: minimal").unwrap();
        assert_eq!(config.project_url, "");
        assert!(config.param_ports.is_empty());
        assert!(!config.readme_media);
    }

    #[test]
    fn test_template_error_fails_decode() {
        let yaml = "project_blurb: \"{{ project_name \"";
        let err = Config::parse(yaml.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Interpolation { field: "project_blurb", .. }
        ));
    }

    #[test]
    fn test_unresolved_context_fails_decode() {
        let yaml = "project_blurb: \"{{ not_in_context }}\"";
        assert!(Config::parse(yaml.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_document_fails_decode() {
        let err = Config::parse(b"project_name: [not, a, string").unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}
