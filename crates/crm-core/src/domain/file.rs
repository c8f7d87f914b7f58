//! Vault file metadata

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub id: u32,
    pub name: String,
    pub size: u64,
    pub uploaded_by: String,
    pub date: String,
    pub mimetype: Option<String>,
}

impl Entity for FileInfo {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_info_camel_case() {
        let info: FileInfo = serde_json::from_str(
            r#"{"id":2,"name":"a.pdf","size":10,"uploadedBy":"x@y.z","date":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(info.uploaded_by, "x@y.z");
        assert!(info.mimetype.is_none());
    }
}
