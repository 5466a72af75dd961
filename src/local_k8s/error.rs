use std::path::PathBuf;

use thiserror::Error;

/// Every step of a restart run fails with one of these; all of them are fatal.
#[derive(Debug, Error)]
pub enum RestartError {
    #[error("error loading kubeconfig {}: {reason}", path.display())]
    Kubeconfig { path: PathBuf, reason: String },

    #[error("error creating client: {0}")]
    Client(#[source] kube::Error),

    #[error("error listing pods: {0}")]
    ListPods(#[source] kube::Error),

    /// The pod carries no label naming its deployment.
    #[error("error resolving deployment for pod {namespace}/{pod}: no \"{label}\" label")]
    OwnerLabelMissing {
        namespace: String,
        pod: String,
        label: &'static str,
    },

    #[error("error getting deployment {namespace}/{name}: {source}")]
    GetDeployment {
        namespace: String,
        name: String,
        source: kube::Error,
    },

    #[error("error updating deployment {namespace}/{name}: {source}")]
    UpdateDeployment {
        namespace: String,
        name: String,
        source: kube::Error,
    },

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}
