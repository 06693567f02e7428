//! Container port extraction
//!
//! Ports come from the config document's declared port lists when present,
//! otherwise from `EXPOSE` directives in the image's build file. Both paths
//! share one permissive token pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::Config;
use crate::error::{CoreError, Result};

static PORT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)(/tcp|/udp)?").unwrap());
static EXPOSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"EXPOSE (.+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

/// A declared network port of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerPort {
    pub number: u16,
    pub protocol: Protocol,
}

/// Parse a `digits[/tcp|/udp]` token found anywhere in `s`
///
/// No digits means no port (`Ok(None)`), not an error. The protocol defaults
/// to tcp when the suffix is absent. A number past the 16-bit range is fatal.
pub fn parse_port(s: &str) -> Result<Option<ContainerPort>> {
    let Some(caps) = PORT_REGEX.captures(s) else {
        return Ok(None);
    };

    let number: u16 = caps[1].parse().map_err(|_| CoreError::PortOverflow {
        token: s.to_string(),
    })?;

    let protocol = match caps.get(2).map(|m| m.as_str()) {
        Some("/udp") => Protocol::Udp,
        _ => Protocol::Tcp,
    };

    Ok(Some(ContainerPort { number, protocol }))
}

/// Ports declared in the config's required and optional port lists
///
/// Returns `None` when both lists are empty, signalling the caller to fall
/// back to the build-file scan. Order follows the lists (required first);
/// duplicates pass through untouched.
pub fn declared_ports(config: &Config) -> Result<Option<Vec<ContainerPort>>> {
    if config.param_ports.is_empty() && config.opt_param_ports.is_empty() {
        return Ok(None);
    }

    let mut ports = Vec::new();
    for port in config.param_ports.iter().chain(&config.opt_param_ports) {
        if let Some(parsed) = parse_port(&port.internal_port)? {
            ports.push(parsed);
        }
    }

    Ok(Some(ports))
}

/// Ports from every `EXPOSE` directive in a container build file
///
/// Tokens after `EXPOSE` are split on whitespace and parsed individually, in
/// encounter order, without deduplication.
pub fn exposed_ports(dockerfile: &str) -> Result<Vec<ContainerPort>> {
    let mut ports = Vec::new();
    for caps in EXPOSE_REGEX.captures_iter(dockerfile) {
        for token in caps[1].split_whitespace() {
            if let Some(parsed) = parse_port(token)? {
                ports.push(parsed);
            }
        }
    }
    Ok(ports)
}
