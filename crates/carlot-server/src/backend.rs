use std::sync::Arc;

use carlot_gate::UploadGate;
use carlot_service::CarService;
use carlot_store::aws::{self, AwsSettings, DynamoRecordStore, S3BlobStore};
use carlot_store::{BlobStore, InMemoryBlobStore, InMemoryRecordStore, RecordStore};

use crate::config::{AwsConfig, Backend, ServerConfig};
use crate::error::ServerResult;

/// Build the car service for `config`: connect the store clients once and
/// hand them to the service.
pub async fn connect(config: &ServerConfig) -> ServerResult<CarService> {
    let gate = UploadGate::with_default_stages(config.gate.clone());

    let (records, blobs): (Arc<dyn RecordStore>, Arc<dyn BlobStore>) = match config.backend {
        Backend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on exit");
            (
                Arc::new(InMemoryRecordStore::new()),
                Arc::new(InMemoryBlobStore::new()),
            )
        }
        Backend::Aws => connect_aws(&config.aws).await?,
    };

    Ok(CarService::new(records, blobs, gate))
}

async fn connect_aws(
    config: &AwsConfig,
) -> ServerResult<(Arc<dyn RecordStore>, Arc<dyn BlobStore>)> {
    let settings = AwsSettings {
        region: config.region.clone(),
        access_key_id: config.access_key_id.clone(),
        secret_access_key: config.secret_access_key.clone(),
    };
    let sdk_config = aws::load_sdk_config(&settings).await;

    let records = DynamoRecordStore::new(&sdk_config, &config.table)
        .with_attributes(config.attributes.clone());
    let blobs = S3BlobStore::new(
        &sdk_config,
        &config.bucket,
        &config.region,
        config.endpoint_url.as_deref(),
    )?;
    tracing::info!(
        table = %config.table,
        key = %config.attributes.key,
        bucket = %config.bucket,
        endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
        "Connected AWS backends"
    );

    Ok((Arc::new(records), Arc::new(blobs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_gate::GateConfig;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let config = ServerConfig {
            backend: Backend::Memory,
            gate: GateConfig {
                max_file_size: 42,
                ..GateConfig::default()
            },
            ..ServerConfig::default()
        };
        let service = connect(&config).await.unwrap();
        assert!(service.list_cars().await.unwrap().is_empty());
        assert_eq!(service.gate().config().max_file_size, 42);
        assert_eq!(service.gate().stage_count(), 3);
    }
}
