use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage namespaces
///
/// Uploads land in `Incoming`; tagged copies are written to `Processed`.
/// Each namespace maps to its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageNamespace {
    Incoming,
    Processed,
}

impl Display for StorageNamespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageNamespace::Incoming => write!(f, "incoming"),
            StorageNamespace::Processed => write!(f, "processed"),
        }
    }
}
