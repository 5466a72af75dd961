use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use super::error::RestartError;

/// `$HOME/.kube/config`, the only credential source the tool reads.
pub fn kubeconfig_path() -> Result<PathBuf, RestartError> {
    let home = std::env::var_os("HOME").ok_or_else(|| RestartError::Kubeconfig {
        path: PathBuf::from("~/.kube/config"),
        reason: "HOME is not set".to_string(),
    })?;

    Ok(kubeconfig_path_in(&home))
}

fn kubeconfig_path_in(home: &OsStr) -> PathBuf {
    Path::new(home).join(".kube").join("config")
}

/// Load the default kubeconfig and build an authenticated client from its current context.
pub async fn connect() -> Result<Client, RestartError> {
    connect_from(&kubeconfig_path()?).await
}

async fn connect_from(path: &Path) -> Result<Client, RestartError> {
    tracing::debug!(path = %path.display(), "loading kubeconfig");
    let kubeconfig_err = |reason: String| RestartError::Kubeconfig {
        path: path.to_path_buf(),
        reason,
    };

    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| kubeconfig_err(e.to_string()))?;
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| kubeconfig_err(e.to_string()))?;
    tracing::info!(cluster = %config.cluster_url, "connecting");

    Client::try_from(config).map_err(RestartError::Client)
}
