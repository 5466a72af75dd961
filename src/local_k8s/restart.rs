use std::io::Write;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::chrono::{DateTime, Utc};
use kube::ResourceExt;

use super::cluster::Cluster;
use super::error::RestartError;

pub const MATCH_SUBSTRING: &str = "database";
pub const OWNER_LABEL: &str = "app";
pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Restart the deployment behind every pod whose name contains `database`.
///
/// Runs strictly in order and stops at the first error. Deployments updated
/// before the failure keep their new annotation. Returns the number of pods
/// whose deployment was restarted.
pub async fn exec_restart_database_pods<C, W>(
    cluster: &C,
    out: &mut W,
) -> Result<usize, RestartError>
where
    C: Cluster,
    W: Write,
{
    let pods = cluster.list_pods().await?;
    tracing::info!(pods = pods.len(), "listed pods in all namespaces");

    let mut restarted = 0;
    for pod in &pods {
        let pod_name = pod.name_any();
        if !is_database_pod(&pod_name) {
            tracing::debug!(pod = %pod_name, "skipping");
            continue;
        }

        writeln!(out, "Redeploying pod: {pod_name}")?;

        let ns = pod.namespace().unwrap_or_default();
        let deploy_name = owner_deployment_name(pod)?;
        restart_deployment(cluster, &ns, deploy_name).await?;

        writeln!(out, "Successfully restarted pod: {pod_name}")?;
        restarted += 1;
    }

    Ok(restarted)
}

pub fn is_database_pod(name: &str) -> bool {
    name.contains(MATCH_SUBSTRING)
}

/// The deployment is assumed to be named after the pod's `app` label.
pub fn owner_deployment_name(pod: &Pod) -> Result<&str, RestartError> {
    pod.labels()
        .get(OWNER_LABEL)
        .map(String::as_str)
        .ok_or_else(|| RestartError::OwnerLabelMissing {
            namespace: pod.namespace().unwrap_or_default(),
            pod: pod.name_any(),
            label: OWNER_LABEL,
        })
}

/// Set the restartedAt annotation on the pod template, creating the map if needed.
pub fn stamp_restart(deploy: &mut Deployment, at: DateTime<Utc>) {
    let template = &mut deploy.spec.get_or_insert_with(Default::default).template;
    template
        .metadata
        .get_or_insert_with(Default::default)
        .annotations
        .get_or_insert_with(Default::default)
        .insert(RESTARTED_AT_ANNOTATION.to_string(), at.to_rfc3339());
}

pub async fn restart_deployment<C: Cluster>(
    cluster: &C,
    namespace: &str,
    name: &str,
) -> Result<Deployment, RestartError> {
    let mut deploy = cluster.get_deployment(namespace, name).await?;
    stamp_restart(&mut deploy, Utc::now());

    let updated = cluster.replace_deployment(namespace, &deploy).await?;
    tracing::info!(deployment = %name, namespace = %namespace, "rollout requested");

    Ok(updated)
}
