//! Session persistence and the export/import payload.
//!
//! A session is the whole state of a study workspace: the topic graph,
//! the syllabus text it was parsed from, and when it was last saved. It
//! lives in `.orrery/session.json` and shares its wire shape with the
//! export payload so exported files and saved sessions stay diffable.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use orrery_graph::{DependencyEdge, TopicGraph, TopicNode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version string stamped on export payloads.
pub const EXPORT_VERSION: &str = "2.0";

/// Persistent study session state.
///
/// Serializes with the graph flattened, so the on-disk shape is
/// `{"nodes": [...], "edges": [...], "syllabusText": "...", "savedAt": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The topic graph.
    #[serde(flatten)]
    pub graph: TopicGraph,

    /// Raw syllabus text the graph was last parsed from.
    #[serde(default)]
    pub syllabus_text: String,

    /// When the session was last written to disk.
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            graph: TopicGraph::new(),
            syllabus_text: String::new(),
            saved_at: Utc::now(),
        }
    }
}

impl Session {
    /// Load a session from a JSON file.
    ///
    /// A missing file yields an empty session so a freshly initialized
    /// workspace behaves the same as one that was reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| Error::Session(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No session file, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Save the session to a JSON file.
    ///
    /// Writes to a temporary file and renames it into place, so an
    /// interrupted save never corrupts the previous session.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&temp_path, contents).await?;
        tokio::fs::rename(&temp_path, path).await?;
        tracing::debug!(path = %path.display(), topics = self.graph.len(), "Saved session");
        Ok(())
    }

    /// Build an export payload from this session.
    pub fn export(&self) -> ExportPayload {
        ExportPayload {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            nodes: self.graph.nodes.clone(),
            edges: self.graph.edges.clone(),
            syllabus_text: self.syllabus_text.clone(),
        }
    }

    /// Rebuild a session from an imported payload.
    ///
    /// Nodes and edges are taken as-is; positions and depths are whatever
    /// the exporting side computed.
    pub fn from_payload(payload: ExportPayload) -> Self {
        Self {
            graph: TopicGraph {
                nodes: payload.nodes,
                edges: payload.edges,
            },
            syllabus_text: payload.syllabus_text,
            saved_at: Utc::now(),
        }
    }
}

/// Shareable snapshot of a session, written by `orrery export`.
///
/// `nodes` and `edges` are required; a file missing either is rejected
/// as not an orrery export. Everything else is tolerated when absent so
/// older or hand-trimmed exports still import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    /// Payload format version.
    #[serde(default)]
    pub version: String,

    /// When the payload was exported.
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,

    /// Topic nodes.
    pub nodes: Vec<TopicNode>,

    /// Prerequisite edges.
    pub edges: Vec<DependencyEdge>,

    /// Syllabus text, if the exporting session had one.
    #[serde(default)]
    pub syllabus_text: String,
}

/// Built-in syllabus templates for `orrery load --template`.
pub mod templates {
    /// React learning track.
    pub const REACT: &str = "React Basics\n\
        Components: React Basics\n\
        Props: Components\n\
        State: Components\n\
        Hooks: State\n\
        Effects: Hooks\n\
        Context: Effects\n\
        Routing: Context";

    /// Web development fundamentals.
    pub const WEBDEV: &str = "HTML Basics\n\
        CSS Basics: HTML Basics\n\
        JavaScript: HTML Basics, CSS Basics\n\
        DOM Manipulation: JavaScript\n\
        Fetch API: JavaScript\n\
        Async/Await: Fetch API\n\
        Frameworks: Async/Await";

    /// Data science starter track.
    pub const DATASCIENCE: &str = "Python Basics\n\
        NumPy: Python Basics\n\
        Pandas: NumPy\n\
        Matplotlib: Pandas\n\
        Scikit-Learn: Pandas\n\
        Deep Learning: Scikit-Learn";
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_graph::{parse_syllabus, TopicStatus};
    use tempfile::TempDir;

    fn parsed_session(text: &str) -> Session {
        let parsed = parse_syllabus(text);
        Session {
            graph: parsed.graph,
            syllabus_text: text.to_string(),
            saved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let mut session = parsed_session("A\nB: A\nC: B");
        let id = session.graph.nodes[0].id.clone();
        session.graph.mark_complete(&id).unwrap();
        session.save(&path).await.unwrap();

        let loaded = Session::load(&path).await.unwrap();
        assert_eq!(loaded.graph.len(), 3);
        assert_eq!(loaded.graph.nodes[0].id, id);
        assert_eq!(loaded.graph.nodes[0].status, TopicStatus::Completed);
        assert_eq!(loaded.syllabus_text, "A\nB: A\nC: B");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let session = Session::load(&path).await.unwrap();
        assert!(session.graph.is_empty());
        assert!(session.syllabus_text.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let result = Session::load(&path).await;
        assert!(matches!(result, Err(Error::Session(_))));
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        parsed_session("A").save(&path).await.unwrap();

        assert!(path.is_file());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_wire_format_is_flat_camel_case() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        parsed_session("A\nB: A").save(&path).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(value["nodes"].is_array());
        assert!(value["edges"].is_array());
        assert!(value["syllabusText"].is_string());
        assert!(value["savedAt"].is_string());
        assert!(value.get("graph").is_none(), "graph must be flattened");
    }

    #[tokio::test]
    async fn test_load_tolerates_minimal_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, r#"{"nodes": []}"#).await.unwrap();

        let session = Session::load(&path).await.unwrap();
        assert!(session.graph.is_empty());
    }

    #[test]
    fn test_export_payload_version_and_content() {
        let session = parsed_session("A\nB: A");
        let payload = session.export();

        assert_eq!(payload.version, EXPORT_VERSION);
        assert_eq!(payload.nodes.len(), 2);
        assert_eq!(payload.edges.len(), 1);
        assert_eq!(payload.syllabus_text, "A\nB: A");
    }

    #[test]
    fn test_import_round_trip_preserves_ids() {
        let session = parsed_session("A\nB: A");
        let ids: Vec<_> = session.graph.nodes.iter().map(|n| n.id.clone()).collect();

        let json = serde_json::to_string(&session.export()).unwrap();
        let payload: ExportPayload = serde_json::from_str(&json).unwrap();
        let restored = Session::from_payload(payload);

        let restored_ids: Vec<_> = restored.graph.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(restored_ids, ids);
        assert_eq!(restored.syllabus_text, "A\nB: A");
    }

    #[test]
    fn test_import_rejects_payload_without_edges() {
        let result = serde_json::from_str::<ExportPayload>(r#"{"nodes": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_import_tolerates_missing_version() {
        let payload: ExportPayload =
            serde_json::from_str(r#"{"nodes": [], "edges": []}"#).unwrap();
        assert!(payload.version.is_empty());
        assert!(payload.nodes.is_empty());
    }

    #[test]
    fn test_templates_parse_cleanly() {
        for text in [templates::REACT, templates::WEBDEV, templates::DATASCIENCE] {
            let parsed = parse_syllabus(text);
            assert!(!parsed.graph.is_empty());
            assert!(
                parsed.unresolved.is_empty(),
                "template has unresolved deps: {:?}",
                parsed.unresolved
            );
        }
    }

    #[test]
    fn test_react_template_shape() {
        let parsed = parse_syllabus(templates::REACT);
        assert_eq!(parsed.graph.len(), 8);
        assert_eq!(parsed.graph.nodes[0].name, "React Basics");
        assert_eq!(parsed.graph.edges.len(), 7);
    }
}
