use tracing_subscriber::EnvFilter;

use crate::local_k8s::cluster::KubeCluster;
use crate::local_k8s::error::RestartError;
use crate::local_k8s::restart::exec_restart_database_pods;
use crate::local_k8s::session;

mod local_k8s;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let restarted = run().await?;
    tracing::info!(restarted, "done");

    Ok(())
}

async fn run() -> Result<usize, RestartError> {
    let kc = session::connect().await?;
    let cluster = KubeCluster::new(kc);

    let mut stdout = std::io::stdout().lock();
    exec_restart_database_pods(&cluster, &mut stdout).await
}
