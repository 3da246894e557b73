use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use carlot_gate::GateConfig;
use carlot_store::aws::AttributeNames;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

const REDACTED: &str = "<redacted>";

/// Which storage backends to run against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Process-local maps; everything is lost on exit.
    Memory,
    /// DynamoDB for records, S3 for images.
    #[default]
    Aws,
}

impl FromStr for Backend {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "aws" => Ok(Self::Aws),
            other => Err(ServerError::Config(format!(
                "unknown backend '{other}' (expected 'memory' or 'aws')"
            ))),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Aws => f.write_str("aws"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: Backend,
    /// Directory served for any path that matches no route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    pub gate: GateConfig,
    pub aws: AwsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
            backend: Backend::default(),
            static_dir: None,
            gate: GateConfig::default(),
            aws: AwsConfig::default(),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: String,
    pub bucket: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    /// Custom S3 endpoint (MinIO, LocalStack). Applies to S3 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Attribute names of the DynamoDB table.
    pub attributes: AttributeNames,
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("table", &self.table)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| REDACTED))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| REDACTED))
            .field("endpoint_url", &self.endpoint_url)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl ServerConfig {
    /// Load the effective configuration: defaults, then the TOML file at
    /// `path` (if any), then environment variables. A `.env` file in the
    /// working directory is read into the environment first.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }
        let mut config = match path {
            Some(p) => Self::from_toml_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Override fields from environment variables, looked up through
    /// `lookup`. Empty values are ignored.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `ACCESS_KEY` | `aws.access_key_id` |
    /// | `SECRET_KEY` | `aws.secret_access_key` |
    /// | `REGION` | `aws.region` |
    /// | `BUCKET` | `aws.bucket` |
    /// | `DYNAMO` | `aws.table` |
    /// | `CARLOT_S3_ENDPOINT` | `aws.endpoint_url` |
    /// | `CARLOT_BIND` | `bind_addr` |
    /// | `CARLOT_BACKEND` | `backend` |
    /// | `CARLOT_STATIC_DIR` | `static_dir` |
    pub fn apply_env<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("ACCESS_KEY") {
            self.aws.access_key_id = Some(v);
        }
        if let Some(v) = get("SECRET_KEY") {
            self.aws.secret_access_key = Some(v);
        }
        if let Some(v) = get("REGION") {
            self.aws.region = v;
        }
        if let Some(v) = get("BUCKET") {
            self.aws.bucket = v;
        }
        if let Some(v) = get("DYNAMO") {
            self.aws.table = v;
        }
        if let Some(v) = get("CARLOT_S3_ENDPOINT") {
            self.aws.endpoint_url = Some(v);
        }
        if let Some(v) = get("CARLOT_BIND") {
            self.bind_addr = v
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("CARLOT_BIND={v}: {e}")))?;
        }
        if let Some(v) = get("CARLOT_BACKEND") {
            self.backend = v.parse()?;
        }
        if let Some(v) = get("CARLOT_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// Reject configurations that cannot start.
    pub fn validate(&self) -> ServerResult<()> {
        if self.gate.allowed_types.is_empty() {
            return Err(ServerError::Config("gate.allowed_types is empty".into()));
        }
        if self.backend == Backend::Aws {
            for (name, value) in [
                ("aws.region (REGION)", &self.aws.region),
                ("aws.bucket (BUCKET)", &self.aws.bucket),
                ("aws.table (DYNAMO)", &self.aws.table),
            ] {
                if value.trim().is_empty() {
                    return Err(ServerError::Config(format!(
                        "{name} is required for the aws backend"
                    )));
                }
            }
        }
        Ok(())
    }

    /// A copy safe to print: credentials replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.aws.access_key_id.is_some() {
            copy.aws.access_key_id = Some(REDACTED.into());
        }
        if copy.aws.secret_access_key.is_some() {
            copy.aws.secret_access_key = Some(REDACTED.into());
        }
        copy
    }

    /// Render as TOML, credentials redacted.
    pub fn to_toml_redacted(&self) -> ServerResult<String> {
        toml::to_string_pretty(&self.redacted()).map_err(|e| ServerError::Internal(e.to_string()))
    }
}
