//! AWS backends: DynamoDB for records, S3 for images.
//!
//! Both clients are built from one [`SdkConfig`] loaded at process start and
//! shared for the life of the process. The shared config never carries a
//! custom endpoint; an S3 endpoint override is applied to the S3 client only
//! (see [`S3BlobStore::new`]), so DynamoDB always talks to AWS.

mod dynamo;
mod s3;

pub use dynamo::{AttributeNames, DynamoRecordStore};
pub use s3::S3BlobStore;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

/// Connection settings shared by the S3 and DynamoDB clients.
#[derive(Clone, Default)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl std::fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<redacted>"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Load the shared SDK configuration.
///
/// Static credentials are used when both keys are set; otherwise the default
/// provider chain (environment, profile, instance role) applies.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region.clone()));

    if let (Some(key), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key) {
        loader = loader.credentials_provider(Credentials::new(
            key.clone(),
            secret.clone(),
            None,
            None,
            "carlot-config",
        ));
    }

    let config = loader.load().await;
    tracing::info!(region = %settings.region, "Loaded AWS SDK config");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AwsSettings {
        AwsSettings {
            region: "ap-southeast-1".into(),
            access_key_id: Some("AKIAEXAMPLE".into()),
            secret_access_key: Some("top-secret".into()),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let dbg = format!("{:?}", settings());
        assert!(dbg.contains("ap-southeast-1"));
        assert!(!dbg.contains("AKIAEXAMPLE"));
        assert!(!dbg.contains("top-secret"));
    }

    #[tokio::test]
    async fn s3_endpoint_does_not_leak_into_dynamodb() {
        let sdk_config = load_sdk_config(&settings()).await;
        let blobs =
            S3BlobStore::new(&sdk_config, "cars", "ap-southeast-1", Some("http://127.0.0.1:9"))
                .unwrap();
        let records = DynamoRecordStore::new(&sdk_config, "Cars");

        assert_eq!(blobs.bucket(), "cars");
        assert_eq!(records.table(), "Cars");
        assert_eq!(sdk_config.endpoint_url(), None);
        assert_eq!(
            sdk_config.region().map(|r| r.to_string()).as_deref(),
            Some("ap-southeast-1")
        );
    }
}
