use crate::domain::model::ExtractionEntry;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_unique, Validate,
};

pub const DEFAULT_INPUT_PATH: &str = "/mnt/mediacenter/compose-monolithic.yml.backup";
pub const DEFAULT_OUTPUT_DIR: &str = "/mnt/mediacenter/compose-services";
pub const DEFAULT_PROJECT_NAME: &str = "mediacenter";

/// (service, file name, description) in extraction order.
const MEDIACENTER_SERVICES: &[(&str, &str, &str)] = &[
    ("overseerr", "overseerr.yml", "Overseerr - Request Management"),
    ("prowlarr", "prowlarr.yml", "Prowlarr - Indexer Management"),
    ("radarr", "radarr.yml", "Radarr - Movie Management"),
    ("sonarr", "sonarr.yml", "Sonarr - TV Show Management"),
    ("bazarr", "bazarr.yml", "Bazarr - Subtitles Management"),
    ("recyclarr", "recyclarr.yml", "Recyclarr - Quality Profiles Sync"),
    ("rdtclient", "rdtclient.yml", "RDTClient - Real-Debrid Download Client"),
    ("zurg", "zurg.yml", "Zurg - Real-Debrid WebDAV"),
    ("rclone", "rclone.yml", "Rclone - Mount Real-Debrid Storage"),
    ("watchtower", "watchtower.yml", "Watchtower - Automatic Container Updates"),
    ("autoscan", "autoscan.yml", "Autoscan - Plex Library Updates"),
    ("zilean", "zilean.yml", "Zilean - Torrent Indexer"),
    ("zilean-postgres", "zilean-postgres.yml", "PostgreSQL for Zilean"),
    ("pinchflat", "pinchflat.yml", "Pinchflat - YouTube Downloader"),
    ("plextraktsync", "plextraktsync.yml", "PlexTraktSync - Trakt.tv Integration"),
    ("homarr", "homarr.yml", "Homarr - Dashboard"),
    ("dashdot", "dashdot.yml", "DashDot - System Monitor"),
];

/// Ordered list of services to pull out of the compose file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTable {
    entries: Vec<ExtractionEntry>,
}

impl ExtractionTable {
    /// The built-in media center table.
    pub fn mediacenter() -> Self {
        let entries = MEDIACENTER_SERVICES
            .iter()
            .map(|(service, filename, description)| {
                ExtractionEntry::new(service, filename, description)
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<ExtractionEntry>) -> Result<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    pub fn entries(&self) -> &[ExtractionEntry] {
        &self.entries
    }

    pub fn get(&self, service: &str) -> Option<&ExtractionEntry> {
        self.entries.iter().find(|entry| entry.service == service)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExtractionTable {
    fn default() -> Self {
        Self::mediacenter()
    }
}

impl Validate for ExtractionTable {
    fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(SplitError::ConfigValidationError {
                field: "services".to_string(),
                message: "Extraction table must contain at least one service".to_string(),
            });
        }

        for entry in &self.entries {
            validate_non_empty_string("services.name", &entry.service)?;
            validate_file_name("services.filename", &entry.filename)?;
            if entry.description().contains(['\n', '\r']) {
                return Err(SplitError::InvalidConfigValueError {
                    field: "services.description".to_string(),
                    value: entry.description().to_string(),
                    reason: "Description must fit on one comment line".to_string(),
                });
            }
        }

        validate_unique(
            "services.name",
            self.entries.iter().map(|entry| entry.service.as_str()),
        )?;
        validate_unique(
            "services.filename",
            self.entries.iter().map(|entry| entry.filename.as_str()),
        )?;

        Ok(())
    }
}
