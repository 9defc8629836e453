use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub classes: Vec<LabelDefinition>,
}

impl LabelConfig {
    pub fn names(&self) -> Vec<String> {
        self.classes.iter().map(|c| c.name.clone()).collect()
    }

    /// `(shortcut, label)` pairs for the labels that define one.
    pub fn shortcuts(&self) -> Vec<(String, String)> {
        self.classes
            .iter()
            .filter_map(|c| Some((c.shortcut.clone()?, c.name.clone())))
            .collect()
    }
}

/// Load the label set from YAML.
///
/// An explicit `path` is the only file read; a missing or malformed file is
/// an error. Without one the search order is:
///   1) ./labels.yaml
///   2) ~/.config/annotate/labels.yaml
///
/// Returns `Ok(None)` when no path was given and no candidate loads.
pub fn load_labels(path: Option<&str>) -> Result<Option<LabelConfig>, String> {
    if let Some(p) = path {
        let expanded = shellexpand::tilde(p);
        return try_load_label_file(Path::new(&*expanded)).map(Some);
    }

    for candidate in ["./labels.yaml", "~/.config/annotate/labels.yaml"] {
        let expanded = shellexpand::tilde(candidate);
        let path_obj = Path::new(&*expanded);
        if !path_obj.exists() {
            continue;
        }

        match try_load_label_file(path_obj) {
            Ok(cfg) => {
                tracing::debug!(path = %path_obj.display(), labels = cfg.classes.len(), "labels loaded");
                return Ok(Some(cfg));
            }
            Err(e) => tracing::warn!("Failed to parse label file '{}': {}", path_obj.display(), e),
        }
    }

    Ok(None)
}

fn try_load_label_file(path: &Path) -> Result<LabelConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("read error {}: {}", path.display(), e))?;

    parse_label_content(&content)
}

/// Parse label YAML, accepting either a plain list of names or a full
/// `classes:` document.
pub fn parse_label_content(content: &str) -> Result<LabelConfig, String> {
    if let Ok(names) = serde_yaml::from_str::<Vec<String>>(content) {
        return Ok(LabelConfig {
            classes: names
                .into_iter()
                .map(|name| LabelDefinition {
                    name,
                    shortcut: None,
                    color: None,
                })
                .collect(),
        });
    }

    serde_yaml::from_str::<LabelConfig>(content).map_err(|e| format!("yaml parse error: {}", e))
}

/// Save a label set to a YAML file
pub fn save_labels(config: &LabelConfig, path: &str) -> Result<PathBuf, String> {
    let expanded_path = PathBuf::from(shellexpand::tilde(path).into_owned());

    if let Some(parent) = expanded_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    let yaml = serde_yaml::to_string(config)
        .map_err(|e| format!("Failed to serialize label config: {}", e))?;

    std::fs::write(&expanded_path, yaml)
        .map_err(|e| format!("Failed to write label file: {}", e))?;

    Ok(expanded_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_list_of_names() {
        let config = parse_label_content("- positive\n- negative\n").unwrap();
        assert_eq!(config.names(), vec!["positive", "negative"]);
        assert!(config.shortcuts().is_empty());
    }

    #[test]
    fn full_document_with_shortcuts() {
        let config = parse_label_content(
            "classes:\n  - name: positive\n    shortcut: p\n  - name: negative\n",
        )
        .unwrap();
        assert_eq!(config.names(), vec!["positive", "negative"]);
        assert_eq!(
            config.shortcuts(),
            vec![("p".to_string(), "positive".to_string())]
        );
    }

    #[test]
    fn saved_labels_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.yaml");
        let config = LabelConfig {
            classes: vec![LabelDefinition {
                name: "spam".into(),
                shortcut: Some("s".into()),
                color: Some("#ff0000".into()),
            }],
        };
        let written = save_labels(&config, path.to_str().unwrap()).unwrap();
        assert_eq!(load_labels(written.to_str()), Ok(Some(config)));
    }

    #[test]
    fn explicit_path_never_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("typo.yaml");
        let err = load_labels(missing.to_str()).unwrap_err();
        assert!(err.contains("typo.yaml"));

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "classes: [unclosed").unwrap();
        assert!(load_labels(broken.to_str()).is_err());
    }
}
