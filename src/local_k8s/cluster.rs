use futures::TryFutureExt;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams, PostParams, ResourceExt};
use kube::Client;

use super::error::RestartError;

/// The control-plane calls a restart run needs, one at a time.
pub trait Cluster {
    /// Every pod in every namespace, unfiltered.
    async fn list_pods(&self) -> Result<Vec<Pod>, RestartError>;

    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, RestartError>;

    /// Submits `deploy` as a full update (replace), not a patch.
    async fn replace_deployment(
        &self,
        namespace: &str,
        deploy: &Deployment,
    ) -> Result<Deployment, RestartError>;
}

pub struct KubeCluster {
    client: Client,
    list_params: ListParams,
    post_params: PostParams,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            list_params: ListParams::default(),
            post_params: PostParams::default(),
        }
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        // deployments are namespace scoped, pods are listed cluster wide
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl Cluster for KubeCluster {
    async fn list_pods(&self) -> Result<Vec<Pod>, RestartError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        pods.list(&self.list_params)
            .map_ok(|list| list.items)
            .map_err(RestartError::ListPods)
            .await
    }

    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, RestartError> {
        self.deployments(namespace)
            .get(name)
            .map_err(|source| RestartError::GetDeployment {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            })
            .await
    }

    async fn replace_deployment(
        &self,
        namespace: &str,
        deploy: &Deployment,
    ) -> Result<Deployment, RestartError> {
        let name = deploy.name_any();
        self.deployments(namespace)
            .replace(&name, &self.post_params, deploy)
            .map_err(|source| RestartError::UpdateDeployment {
                namespace: namespace.to_string(),
                name: name.clone(),
                source,
            })
            .await
    }
}
