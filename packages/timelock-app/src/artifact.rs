use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Deployed address record shared with the front end. Written once by
/// the deploy step, read back at client start. The only update path is
/// a re-deployment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeployedContracts {
    #[serde(rename = "Lock")]
    pub lock: String,
}

impl DeployedContracts {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let record = serde_json::from_str(&raw)?;
        Ok(record)
    }

    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
