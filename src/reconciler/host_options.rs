// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host option assembly
//!
//! Storage and certificate directories are resolved first; each TLS path is
//! then either the user's override or a fixed filename inside its directory.

use std::path::{Path, PathBuf};

use crate::domain::{
    AttributeError, AuthOptions, EngineOptions, HostOptions, ResourceDescriptor, SwarmOptions,
};
use crate::schema::builtin::*;

const CA_CERT_FILE: &str = "ca.pem";
const CA_KEY_FILE: &str = "ca-key.pem";
const CLIENT_CERT_FILE: &str = "cert.pem";
const CLIENT_KEY_FILE: &str = "key.pem";
const SERVER_CERT_FILE: &str = "server.pem";
const SERVER_KEY_FILE: &str = "server-key.pem";

/// Resolved directories for one machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    pub storage_path: PathBuf,
    pub certs_dir: PathBuf,
}

impl HostPaths {
    /// User overrides win; otherwise `<base>/machines/<name>` and the store's
    /// certificate directory
    pub fn resolve(
        descriptor: &ResourceDescriptor,
        name: &str,
        base_path: &Path,
        default_certs: &Path,
    ) -> Result<Self, AttributeError> {
        let storage_path = descriptor
            .non_empty_string(STORAGE_PATH)?
            .map(PathBuf::from)
            .unwrap_or_else(|| base_path.join("machines").join(name));
        let certs_dir = descriptor
            .non_empty_string(CERTS_DIRECTORY)?
            .map(PathBuf::from)
            .unwrap_or_else(|| default_certs.to_path_buf());

        Ok(Self {
            storage_path,
            certs_dir,
        })
    }

    pub fn server_cert(&self) -> PathBuf {
        self.storage_path.join(SERVER_CERT_FILE)
    }

    pub fn server_key(&self) -> PathBuf {
        self.storage_path.join(SERVER_KEY_FILE)
    }

    /// Write the computed path attributes back to the descriptor
    pub fn record(&self, descriptor: &mut ResourceDescriptor) {
        descriptor.set(STORAGE_PATH_COMPUTED, path_string(&self.storage_path));
        descriptor.set(CERTS_DIRECTORY, path_string(&self.certs_dir));
        descriptor.set(TLS_SERVER_CERT, path_string(&self.server_cert()));
        descriptor.set(TLS_SERVER_KEY, path_string(&self.server_key()));
    }

    fn tls_path(
        &self,
        descriptor: &ResourceDescriptor,
        key: &str,
        file: &str,
    ) -> Result<PathBuf, AttributeError> {
        Ok(descriptor
            .non_empty_string(key)?
            .map(PathBuf::from)
            .unwrap_or_else(|| self.certs_dir.join(file)))
    }
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

/// Build the host options from descriptor fields
pub fn assemble(
    descriptor: &ResourceDescriptor,
    paths: &HostPaths,
) -> Result<HostOptions, AttributeError> {
    let auth = AuthOptions {
        cert_dir: paths.certs_dir.clone(),
        store_path: paths.storage_path.clone(),
        ca_cert_path: paths.tls_path(descriptor, TLS_CA_CERT, CA_CERT_FILE)?,
        ca_private_key_path: paths.tls_path(descriptor, TLS_CA_KEY, CA_KEY_FILE)?,
        server_cert_path: paths.server_cert(),
        server_key_path: paths.server_key(),
        client_cert_path: paths.tls_path(descriptor, TLS_CLIENT_CERT, CLIENT_CERT_FILE)?,
        client_key_path: paths.tls_path(descriptor, TLS_CLIENT_KEY, CLIENT_KEY_FILE)?,
        server_cert_sans: descriptor.string_list(TLS_SAN)?,
    };

    let engine = EngineOptions {
        arbitrary_flags: descriptor.string_list(ENGINE_OPT)?,
        env: descriptor.string_list(ENGINE_ENV)?,
        insecure_registry: descriptor.string_list(ENGINE_INSECURE_REGISTRY)?,
        labels: descriptor.string_list(ENGINE_LABEL)?,
        registry_mirror: descriptor.string_list(ENGINE_REGISTRY_MIRROR)?,
        storage_driver: descriptor.non_empty_string(ENGINE_STORAGE_DRIVER)?,
        install_url: descriptor.non_empty_string(ENGINE_INSTALL_URL)?,
        tls_verify: true,
    };

    let agent = descriptor.boolean(SWARM)?;
    let master = descriptor.boolean(SWARM_MASTER)?;
    let swarm = SwarmOptions {
        is_swarm: agent || master,
        image: descriptor.non_empty_string(SWARM_IMAGE)?,
        agent,
        master,
        discovery: descriptor.non_empty_string(SWARM_DISCOVERY)?,
        address: descriptor.non_empty_string(SWARM_ADDR)?,
        host: descriptor.non_empty_string(SWARM_HOST)?,
        strategy: descriptor.non_empty_string(SWARM_STRATEGY)?,
        arbitrary_flags: descriptor.string_list(SWARM_OPT)?,
        arbitrary_join_flags: descriptor.string_list(SWARM_JOIN_OPT)?,
        is_experimental: descriptor.boolean(SWARM_EXPERIMENTAL)?,
    };

    Ok(HostOptions { auth, engine, swarm })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn descriptor(pairs: &[(&str, crate::domain::AttributeValue)]) -> ResourceDescriptor {
        ResourceDescriptor::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_default_paths() {
        let d = descriptor(&[]);
        let paths = HostPaths::resolve(&d, "vm1", Path::new("/m"), Path::new("/m/certs")).unwrap();
        let options = assemble(&d, &paths).unwrap();

        assert_eq!(options.auth.store_path, PathBuf::from("/m/machines/vm1"));
        assert_eq!(options.auth.cert_dir, PathBuf::from("/m/certs"));
        assert_eq!(options.auth.ca_cert_path, PathBuf::from("/m/certs/ca.pem"));
        assert_eq!(options.auth.ca_private_key_path, PathBuf::from("/m/certs/ca-key.pem"));
        assert_eq!(options.auth.client_cert_path, PathBuf::from("/m/certs/cert.pem"));
        assert_eq!(options.auth.client_key_path, PathBuf::from("/m/certs/key.pem"));
        assert_eq!(options.auth.server_cert_path, PathBuf::from("/m/machines/vm1/server.pem"));
        assert_eq!(options.auth.server_key_path, PathBuf::from("/m/machines/vm1/server-key.pem"));
        assert!(options.engine.tls_verify);
        assert!(!options.swarm.is_swarm);
    }

    #[test]
    fn test_overrides_and_derived_paths() {
        let d = descriptor(&[
            (CERTS_DIRECTORY, "/etc/docker-certs".into()),
            (TLS_CA_CERT, "/pki/root.pem".into()),
            (STORAGE_PATH, "".into()),
        ]);
        let paths = HostPaths::resolve(&d, "vm1", Path::new("/m"), Path::new("/m/certs")).unwrap();
        let options = assemble(&d, &paths).unwrap();

        assert_eq!(options.auth.ca_cert_path, PathBuf::from("/pki/root.pem"));
        assert_eq!(options.auth.ca_private_key_path, PathBuf::from("/etc/docker-certs/ca-key.pem"));
        assert_eq!(options.auth.store_path, PathBuf::from("/m/machines/vm1"));
    }

    #[test]
    fn test_swarm_enabled_by_master() {
        let d = descriptor(&[
            (SWARM_MASTER, true.into()),
            (SWARM_DISCOVERY, "token://abc".into()),
            (ENGINE_LABEL, vec!["zone=a".to_string()].into()),
        ]);
        let paths = HostPaths::resolve(&d, "vm1", Path::new("/m"), Path::new("/m/certs")).unwrap();
        let options = assemble(&d, &paths).unwrap();

        assert!(options.swarm.is_swarm);
        assert!(options.swarm.master);
        assert!(!options.swarm.agent);
        assert_eq!(options.swarm.discovery.as_deref(), Some("token://abc"));
        assert_eq!(options.engine.labels, vec!["zone=a".to_string()]);
    }

    #[test]
    fn test_record_writes_computed_paths() {
        let mut d = descriptor(&[]);
        let paths = HostPaths::resolve(&d, "vm1", Path::new("/m"), Path::new("/m/certs")).unwrap();
        paths.record(&mut d);

        assert_eq!(d.string(STORAGE_PATH_COMPUTED), Ok(Some("/m/machines/vm1")));
        assert_eq!(d.string(CERTS_DIRECTORY), Ok(Some("/m/certs")));
        assert_eq!(d.string(TLS_SERVER_KEY), Ok(Some("/m/machines/vm1/server-key.pem")));
    }
}
