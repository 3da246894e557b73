use serde::{Deserialize, Serialize};

/// Limits applied by the upload gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Accepted image types, matched against both the file extension and the
    /// declared MIME subtype. Compared case-insensitively.
    pub allowed_types: Vec<String>,
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
}

impl GateConfig {
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_000_000;

    /// Whether `kind` (an extension or MIME subtype) is on the allow-list.
    pub fn allows(&self, kind: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(kind))
    }

    /// The allow-list joined for error messages (`"jpeg/jpg/png/gif"`).
    pub fn allowed_display(&self) -> String {
        self.allowed_types.join("/")
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allowed_types: ["jpeg", "jpg", "png", "gif"].map(String::from).to_vec(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }
}
