pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::render::{document_export_filename, DocTree};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize document tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("generator '{0}' failed: {1}")]
    Backend(&'static str, String),
}

/// Turns a document tree into a downloadable file.
///
/// Carried in `AppState` as `Arc<dyn DocumentGenerator>` so a real
/// word-processor writer can replace the bundled one without touching the
/// export handlers.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;

    async fn generate(&self, tree: &DocTree) -> Result<Bytes, GenerateError>;
}

/// Writes the tree as pretty JSON for an external converter.
pub struct JsonTreeGenerator;

#[async_trait]
impl DocumentGenerator for JsonTreeGenerator {
    fn name(&self) -> &'static str {
        "json-tree"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    async fn generate(&self, tree: &DocTree) -> Result<Bytes, GenerateError> {
        Ok(Bytes::from(serde_json::to_vec_pretty(tree)?))
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Runs `generator` and names the result after the profile. Nothing is
/// produced when generation fails.
pub async fn generate_document(
    generator: &dyn DocumentGenerator,
    tree: &DocTree,
    profile_name: &str,
) -> Result<GeneratedFile, GenerateError> {
    let bytes = generator.generate(tree).await?;
    Ok(GeneratedFile {
        filename: document_export_filename(profile_name, generator.extension()),
        content_type: generator.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use crate::render::{render_doc_tree, Template};

    struct FailingGenerator;

    #[async_trait]
    impl DocumentGenerator for FailingGenerator {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn extension(&self) -> &'static str {
            "docx"
        }

        fn content_type(&self) -> &'static str {
            "application/octet-stream"
        }

        async fn generate(&self, _tree: &DocTree) -> Result<Bytes, GenerateError> {
            Err(GenerateError::Backend(self.name(), "out of paper".to_string()))
        }
    }

    #[tokio::test]
    async fn test_json_generator_names_file_after_profile() {
        let doc = Document::sample();
        let tree = render_doc_tree(&doc, Template::Modern);
        let file = generate_document(&JsonTreeGenerator, &tree, &doc.profile.name)
            .await
            .unwrap();
        assert_eq!(file.filename, "Alex_Johnson_Resume.json");
        assert_eq!(file.content_type, "application/json");

        let value: serde_json::Value = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(value["template"], "modern");
        assert_eq!(value["styles"]["accent_color"], "333333");
    }

    #[tokio::test]
    async fn test_failed_generation_produces_no_file() {
        let tree = render_doc_tree(&Document::default(), Template::Classic);
        let result = generate_document(&FailingGenerator, &tree, "").await;
        assert!(matches!(result, Err(GenerateError::Backend("failing", _))));
    }
}
