use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

pub const PROJECT_DATA_FILE: &str = "data/projectData.json";
pub const PROPERTY_FILE: &str = "property.json";
pub const LAST_URL_FILE: &str = "data/lastVisitedUrl.json";

/// The project created by the project suite, consumed by jobs and invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub project_name: String,
    pub description: String,
    /// Property picked in the create form; absent in files from older runs.
    #[serde(default)]
    pub property: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub property_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastVisited {
    pub last_url: String,
}

/// JSON files that carry state from one suite run to the next.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    root: PathBuf,
}

impl ScratchStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScratchStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn write<T: Serialize>(&self, relative: &str, value: &T) -> E2eResult<PathBuf> {
        let path = self.path_of(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| E2eError::Scratch {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        let json = serde_json::to_string_pretty(value).map_err(|e| E2eError::JsonSerialize {
            context: relative.to_string(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| E2eError::Scratch {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "scratch file written");
        Ok(path)
    }

    fn read<T: DeserializeOwned>(&self, relative: &str) -> E2eResult<T> {
        let path = self.path_of(relative);
        let raw = fs::read_to_string(&path).map_err(|e| E2eError::Scratch {
            path: path.display().to_string(),
            reason: format!("{} (has the suite that writes it run?)", e),
        })?;
        serde_json::from_str(&raw).map_err(|e| E2eError::JsonParse {
            context: path.display().to_string(),
            source: e,
        })
    }

    pub fn save_project(&self, record: &ProjectRecord) -> E2eResult<PathBuf> {
        let path = self.write(PROJECT_DATA_FILE, record)?;
        info!(project = %record.project_name, path = %path.display(), "project data saved");
        Ok(path)
    }

    pub fn load_project(&self) -> E2eResult<ProjectRecord> {
        self.read(PROJECT_DATA_FILE)
    }

    pub fn save_property(&self, name: &str) -> E2eResult<PathBuf> {
        self.write(
            PROPERTY_FILE,
            &PropertyRecord {
                property_name: name.to_string(),
            },
        )
    }

    pub fn load_property_name(&self) -> E2eResult<String> {
        self.read::<PropertyRecord>(PROPERTY_FILE)
            .map(|r| r.property_name)
    }

    pub fn save_last_url(&self, url: &str) -> E2eResult<PathBuf> {
        let path = self.write(
            LAST_URL_FILE,
            &LastVisited {
                last_url: url.to_string(),
            },
        )?;
        info!(url, "saved last visited URL");
        Ok(path)
    }

    pub fn load_last_url(&self) -> E2eResult<String> {
        self.read::<LastVisited>(LAST_URL_FILE).map(|r| r.last_url)
    }
}

impl Default for ScratchStore {
    fn default() -> Self {
        ScratchStore::new(".")
    }
}
