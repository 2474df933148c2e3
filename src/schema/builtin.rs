// Copyright (c) 2025 - Cowboy AI, Inc.
//! Built-in Resource and Provider Attributes

use std::collections::BTreeMap;

use super::AttributeSpec;
use crate::domain::{AttributeType, PowerState};

pub const NAME: &str = "name";
pub const STATE: &str = "state";

pub const CERTS_DIRECTORY: &str = "certs_directory";
pub const STORAGE_PATH: &str = "storage_path";
pub const STORAGE_PATH_COMPUTED: &str = "storage_path_computed";
pub const TLS_CA_CERT: &str = "tls_ca_cert";
pub const TLS_CA_KEY: &str = "tls_ca_key";
pub const TLS_CLIENT_CERT: &str = "tls_client_cert";
pub const TLS_CLIENT_KEY: &str = "tls_client_key";
pub const TLS_SERVER_CERT: &str = "tls_server_cert";
pub const TLS_SERVER_KEY: &str = "tls_server_key";
pub const TLS_SAN: &str = "tls_san";

pub const ENGINE_OPT: &str = "engine_opt";
pub const ENGINE_ENV: &str = "engine_env";
pub const ENGINE_INSECURE_REGISTRY: &str = "engine_insecure_registry";
pub const ENGINE_LABEL: &str = "engine_label";
pub const ENGINE_REGISTRY_MIRROR: &str = "engine_registry_mirror";
pub const ENGINE_STORAGE_DRIVER: &str = "engine_storage_driver";
pub const ENGINE_INSTALL_URL: &str = "engine_install_url";

pub const SWARM: &str = "swarm";
pub const SWARM_MASTER: &str = "swarm_master";
pub const SWARM_IMAGE: &str = "swarm_image";
pub const SWARM_DISCOVERY: &str = "swarm_discovery";
pub const SWARM_ADDR: &str = "swarm_addr";
pub const SWARM_HOST: &str = "swarm_host";
pub const SWARM_STRATEGY: &str = "swarm_strategy";
pub const SWARM_OPT: &str = "swarm_opt";
pub const SWARM_JOIN_OPT: &str = "swarm_join_opt";
pub const SWARM_EXPERIMENTAL: &str = "swarm_experimental";

pub const SSH_HOSTNAME: &str = "ssh_hostname";
pub const SSH_PORT: &str = "ssh_port";
pub const SSH_USERNAME: &str = "ssh_username";
pub const SSH_KEYPATH: &str = "ssh_keypath";
pub const ADDRESS: &str = "address";
pub const ENDPOINT_URL: &str = "endpoint_url";
pub const ENGINE_VERSION: &str = "engine_version";

/// Observed fields that are only meaningful while the machine runs
pub const CONNECTIVITY: [&str; 5] = [SSH_HOSTNAME, SSH_PORT, ADDRESS, ENDPOINT_URL, ENGINE_VERSION];

pub const PROVIDER_DEBUG: &str = "debug";

/// Attributes every machine resource has, whatever its driver
pub fn resource_attributes() -> BTreeMap<String, AttributeSpec> {
    use AttributeType::*;

    let string_option = || AttributeSpec::optional(String).force_new();
    let list_option = || AttributeSpec::optional(StringList).force_new();
    let bool_option = || AttributeSpec::optional(Boolean).force_new().with_default(false);

    [
        (NAME, AttributeSpec::required(String).force_new()),
        (CERTS_DIRECTORY, AttributeSpec::optional_computed(String).force_new()),
        (TLS_CA_CERT, string_option()),
        (TLS_CA_KEY, string_option()),
        (TLS_CLIENT_CERT, string_option()),
        (TLS_CLIENT_KEY, string_option()),
        (TLS_SERVER_CERT, AttributeSpec::computed(String)),
        (TLS_SERVER_KEY, AttributeSpec::computed(String)),
        (STORAGE_PATH, string_option()),
        (STORAGE_PATH_COMPUTED, AttributeSpec::computed(String)),
        (TLS_SAN, list_option()),
        (ENGINE_OPT, list_option()),
        (ENGINE_ENV, list_option()),
        (ENGINE_INSECURE_REGISTRY, list_option()),
        (ENGINE_LABEL, list_option()),
        (ENGINE_REGISTRY_MIRROR, list_option()),
        (ENGINE_STORAGE_DRIVER, string_option()),
        (ENGINE_INSTALL_URL, string_option()),
        (SWARM, bool_option()),
        (SWARM_MASTER, bool_option()),
        (SWARM_IMAGE, string_option()),
        (SWARM_DISCOVERY, string_option()),
        (SWARM_ADDR, string_option()),
        (SWARM_HOST, string_option()),
        (SWARM_STRATEGY, string_option()),
        (SWARM_OPT, list_option()),
        (SWARM_JOIN_OPT, list_option()),
        (SWARM_EXPERIMENTAL, bool_option()),
        (SSH_HOSTNAME, AttributeSpec::computed(String)),
        (SSH_PORT, AttributeSpec::computed(Integer)),
        (SSH_USERNAME, AttributeSpec::computed(String)),
        (SSH_KEYPATH, AttributeSpec::computed(String)),
        (ADDRESS, AttributeSpec::computed(String)),
        (ENDPOINT_URL, AttributeSpec::computed(String)),
        (ENGINE_VERSION, AttributeSpec::computed(String)),
        (
            STATE,
            AttributeSpec::optional(String)
                .with_default(PowerState::Running.as_str())
                .one_of(&PowerState::ALLOWED),
        ),
    ]
    .into_iter()
    .map(|(name, spec)| (name.to_string(), spec))
    .collect()
}

/// Provider-level configuration attributes
pub fn provider_attributes() -> BTreeMap<String, AttributeSpec> {
    use AttributeType::*;

    [
        (
            PROVIDER_DEBUG,
            AttributeSpec::optional(Boolean)
                .with_default(false)
                .describe("Verbose driver and reconciler output"),
        ),
        (
            STORAGE_PATH,
            AttributeSpec::optional(String).describe("Base directory for machine state"),
        ),
        (
            CERTS_DIRECTORY,
            AttributeSpec::optional(String)
                .describe("Directory holding the CA and client certificates"),
        ),
    ]
    .into_iter()
    .map(|(name, spec)| (name.to_string(), spec))
    .collect()
}
