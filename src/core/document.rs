//! Reading the monolithic compose file and rendering per-service files.

use crate::utils::error::{Result, SplitError};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

const SERVICES_KEY: &str = "services";
const NAME_KEY: &str = "name";
const MERGE_KEY: &str = "<<";

/// The parsed monolithic compose file. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    root: Mapping,
}

impl SourceDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| SplitError::SourceReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(path, &content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(Path::new("<memory>"), content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let parse_error = |source| SplitError::SourceParseError {
            path: path.to_path_buf(),
            source,
        };

        if content.trim().is_empty() {
            return Err(SplitError::InvalidDocumentError {
                message: format!("{} is empty", path.display()),
            });
        }

        let mut value: Value = serde_yaml::from_str(content).map_err(parse_error)?;
        resolve_merges(&mut value)?;

        match value {
            Value::Mapping(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            Value::Null => Err(SplitError::InvalidDocumentError {
                message: format!("{} is empty", path.display()),
            }),
            other => Err(SplitError::InvalidDocumentError {
                message: format!(
                    "top level of {} must be a mapping, found {}",
                    path.display(),
                    kind_of(&other)
                ),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `services` mapping, or `None` when the key is absent.
    pub fn services(&self) -> Result<Option<&Mapping>> {
        match self.root.get(SERVICES_KEY) {
            None => Ok(None),
            Some(Value::Mapping(services)) => Ok(Some(services)),
            Some(other) => Err(SplitError::InvalidDocumentError {
                message: format!("`services` must be a mapping, found {}", kind_of(other)),
            }),
        }
    }

    pub fn service(&self, name: &str) -> Result<Option<&Value>> {
        Ok(self.services()?.and_then(|services| services.get(name)))
    }
}

/// A single-service compose file: `name` plus a one-entry `services` mapping.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    project_name: String,
    services: Mapping,
}

impl OutputDocument {
    pub fn new(project_name: &str, service: &str, config: Value) -> Self {
        let mut services = Mapping::new();
        services.insert(Value::String(service.to_string()), config);
        Self {
            project_name: project_name.to_string(),
            services,
        }
    }

    /// Comment line, `name:` field, blank line, then the `services:` block.
    pub fn render(&self, description: &str) -> Result<String> {
        let mut name = Mapping::new();
        name.insert(
            Value::String(NAME_KEY.to_string()),
            Value::String(self.project_name.clone()),
        );

        let mut body = Mapping::new();
        body.insert(
            Value::String(SERVICES_KEY.to_string()),
            Value::Mapping(self.services.clone()),
        );

        let name_yaml = serde_yaml::to_string(&name)?;
        let body_yaml = serde_yaml::to_string(&body)?;

        Ok(format!("# {}\n{}\n{}", description, name_yaml, body_yaml))
    }
}

/// Expands `<<` merge keys in place. Merged keys come first (earlier sources
/// win), then the mapping's own keys in source order. An own key that is also
/// merged replaces the value but keeps the merged position.
fn resolve_merges(value: &mut Value) -> Result<()> {
    match value {
        Value::Mapping(mapping) => {
            for (_, child) in mapping.iter_mut() {
                resolve_merges(child)?;
            }
            if !mapping.contains_key(MERGE_KEY) {
                return Ok(());
            }

            let mut merge = None;
            let mut own = Vec::with_capacity(mapping.len());
            for (key, child) in std::mem::take(mapping) {
                if key.as_str() == Some(MERGE_KEY) {
                    merge = Some(child);
                } else {
                    own.push((key, child));
                }
            }

            let mut resolved = Mapping::new();
            if let Some(merge) = merge {
                for source in merge_sources(merge)? {
                    for (key, child) in source {
                        if !resolved.contains_key(&key) {
                            resolved.insert(key, child);
                        }
                    }
                }
            }
            for (key, child) in own {
                resolved.insert(key, child);
            }

            *mapping = resolved;
            Ok(())
        }
        Value::Sequence(items) => items.iter_mut().try_for_each(resolve_merges),
        Value::Tagged(tagged) => resolve_merges(&mut tagged.value),
        _ => Ok(()),
    }
}

fn merge_sources(merge: Value) -> Result<Vec<Mapping>> {
    let invalid = |found: &Value| SplitError::InvalidDocumentError {
        message: format!(
            "`<<` expects a mapping or a sequence of mappings, found {}",
            kind_of(found)
        ),
    };

    match merge {
        Value::Mapping(source) => Ok(vec![source]),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Mapping(source) => Ok(source),
                other => Err(invalid(&other)),
            })
            .collect(),
        other => Err(invalid(&other)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADARR_COMPOSE: &str = r#"
services:
  radarr:
    image: "radarr:latest"
    ports: ["7878:7878"]
"#;

    #[test]
    fn test_renders_radarr_file() {
        let source = SourceDocument::from_yaml_str(RADARR_COMPOSE).unwrap();
        let config = source.service("radarr").unwrap().unwrap().clone();

        let rendered = OutputDocument::new("mediacenter", "radarr", config)
            .render("Radarr - Movie Management")
            .unwrap();

        assert!(rendered.starts_with(
            "# Radarr - Movie Management\nname: mediacenter\n\nservices:\n  radarr:\n    image: radarr:latest\n    ports:\n    - 7878:7878\n"
        ));
    }

    #[test]
    fn test_render_keeps_insertion_order() {
        let source = SourceDocument::from_yaml_str(
            r#"
services:
  sonarr:
    restart: unless-stopped
    image: sonarr:latest
    environment:
      TZ: Europe/Amsterdam
      PUID: "1000"
"#,
        )
        .unwrap();
        let config = source.service("sonarr").unwrap().unwrap().clone();
        let rendered = OutputDocument::new("mediacenter", "sonarr", config)
            .render("Sonarr")
            .unwrap();

        let restart = rendered.find("restart:").unwrap();
        let image = rendered.find("image:").unwrap();
        let tz = rendered.find("TZ:").unwrap();
        let puid = rendered.find("PUID:").unwrap();
        assert!(restart < image);
        assert!(tz < puid);
        // Quoted number stays a string.
        assert!(rendered.contains("PUID: '1000'"));
    }

    #[test]
    fn test_payload_round_trips_unchanged() {
        let source = SourceDocument::from_yaml_str(
            r#"
services:
  zurg:
    image: ghcr.io/debridmediamanager/zurg-testing:latest
    volumes:
      - ./zurg/config.yml:/app/config.yml
      - type: bind
        source: /mnt/zurg
        target: /data
    healthcheck:
      test: ["CMD", "curl", "-f", "http://localhost:9999/dav/"]
      interval: 30s
    depends_on: []
"#,
        )
        .unwrap();
        let original = source.service("zurg").unwrap().unwrap().clone();

        let rendered = OutputDocument::new("mediacenter", "zurg", original.clone())
            .render("Zurg - Real-Debrid WebDAV")
            .unwrap();

        let reparsed = SourceDocument::from_yaml_str(&rendered).unwrap();
        assert_eq!(reparsed.service("zurg").unwrap(), Some(&original));
        assert_eq!(reparsed.services().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let source = SourceDocument::from_yaml_str(
            r#"
x-common: &common
  restart: unless-stopped
  environment:
    TZ: UTC
services:
  bazarr:
    <<: *common
    image: bazarr:latest
    ports:
      - "6767:6767"
    container_name: bazarr
"#,
        )
        .unwrap();

        let bazarr = source.service("bazarr").unwrap().unwrap();
        assert!(bazarr.get("<<").is_none());

        let rendered = OutputDocument::new("mediacenter", "bazarr", bazarr.clone())
            .render("Bazarr - Subtitles Management")
            .unwrap();
        assert_eq!(
            rendered,
            "# Bazarr - Subtitles Management\nname: mediacenter\n\nservices:\n  bazarr:\n    restart: unless-stopped\n    environment:\n      TZ: UTC\n    image: bazarr:latest\n    ports:\n    - 6767:6767\n    container_name: bazarr\n"
        );
    }

    #[test]
    fn test_merge_sequence_and_overrides_keep_first_position() {
        let source = SourceDocument::from_yaml_str(
            r#"
x-base: &base
  restart: always
  user: "1000"
x-logging: &logging
  restart: unless-stopped
  logging:
    driver: json-file
services:
  sonarr:
    image: sonarr:latest
    <<: [*base, *logging]
    user: "0"
    volumes:
      - /config
"#,
        )
        .unwrap();

        let sonarr = source.service("sonarr").unwrap().unwrap().clone();
        let rendered = OutputDocument::new("mediacenter", "sonarr", sonarr)
            .render("Sonarr")
            .unwrap();

        // restart comes from the first source; user keeps its merged slot with the own value.
        assert!(rendered.ends_with(
            "services:\n  sonarr:\n    restart: always\n    user: '0'\n    logging:\n      driver: json-file\n    image: sonarr:latest\n    volumes:\n    - /config\n"
        ));
    }

    #[test]
    fn test_nested_merges_are_resolved() {
        let source = SourceDocument::from_yaml_str(
            r#"
x-env: &env
  TZ: UTC
services:
  homarr:
    environment:
      <<: *env
      PUID: "1000"
"#,
        )
        .unwrap();

        let homarr = source.service("homarr").unwrap().unwrap();
        let keys: Vec<&str> = homarr["environment"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|key| key.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["TZ", "PUID"]);
    }

    #[test]
    fn test_scalar_merge_value_is_rejected() {
        let err = SourceDocument::from_yaml_str("services:\n  zurg:\n    <<: nope\n").unwrap_err();
        assert!(matches!(err, SplitError::InvalidDocumentError { .. }));

        let err =
            SourceDocument::from_yaml_str("services:\n  zurg:\n    <<: [1, 2]\n").unwrap_err();
        assert!(matches!(err, SplitError::InvalidDocumentError { .. }));
    }

    #[test]
    fn test_integers_beyond_64_bits_are_rejected() {
        let err = SourceDocument::from_yaml_str(
            "services:\n  zurg:\n    big: 123456789012345678901234567890\n",
        )
        .unwrap_err();
        assert!(matches!(err, SplitError::SourceParseError { .. }));
    }

    #[test]
    fn test_missing_services_key_is_empty() {
        let source = SourceDocument::from_yaml_str("version: '3.8'\n").unwrap();
        assert!(source.services().unwrap().is_none());
        assert!(source.service("radarr").unwrap().is_none());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            SourceDocument::from_yaml_str(""),
            Err(SplitError::InvalidDocumentError { .. })
        ));
        assert!(matches!(
            SourceDocument::from_yaml_str("- radarr\n- sonarr\n"),
            Err(SplitError::InvalidDocumentError { .. })
        ));

        let source = SourceDocument::from_yaml_str("services:\n  - radarr\n").unwrap();
        assert!(matches!(
            source.services(),
            Err(SplitError::InvalidDocumentError { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = SourceDocument::from_yaml_str("services:\n  radarr: {image: [\n").unwrap_err();
        assert!(matches!(err, SplitError::SourceParseError { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = SourceDocument::from_file("/definitely/not/here/compose.yml").unwrap_err();
        assert!(matches!(err, SplitError::SourceReadError { .. }));
    }
}
