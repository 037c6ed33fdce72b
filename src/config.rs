use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::detect::{
    validate_min_confidence, validate_required_types, DetectionRequestConfig, EquipmentType,
    DEFAULT_MIN_CONFIDENCE,
};
use crate::notify::validate_address;

const DEFAULT_OBJECT_ROOT: &str = "objects";
const DEFAULT_DETECTIONS_DIR: &str = "detections";
const DEFAULT_OUTBOX_DIR: &str = "outbox";

#[derive(Debug, Deserialize, Default)]
struct HandlerConfigFile {
    detection: Option<DetectionConfigFile>,
    mail: Option<MailConfigFile>,
    storage: Option<StorageConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectionConfigFile {
    min_confidence: Option<f32>,
    required_equipment: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct MailConfigFile {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct StorageConfigFile {
    object_root: Option<PathBuf>,
    detections_dir: Option<PathBuf>,
    outbox_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub detection: DetectionSettings,
    pub mail: MailSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    pub min_confidence: f32,
    pub required_equipment: BTreeSet<EquipmentType>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            required_equipment: EquipmentType::all(),
        }
    }
}

impl DetectionSettings {
    /// Request parameters for one image under these settings.
    pub fn request_for(
        &self,
        photo_id: &str,
        bucket_id: &str,
    ) -> crate::Result<DetectionRequestConfig> {
        DetectionRequestConfig::build(
            photo_id,
            bucket_id,
            self.min_confidence,
            self.required_equipment.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub object_root: PathBuf,
    pub detections_dir: PathBuf,
    pub outbox_dir: PathBuf,
}

impl HandlerConfig {
    /// Load from `$PPE_CONFIG` (JSON, or TOML for `.toml` paths), then apply
    /// `PPE_*` environment overrides and validate.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("PPE_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: HandlerConfigFile) -> Result<Self> {
        let min_confidence = file
            .detection
            .as_ref()
            .and_then(|detection| detection.min_confidence)
            .unwrap_or(DEFAULT_MIN_CONFIDENCE);
        let required_equipment = match file
            .detection
            .and_then(|detection| detection.required_equipment)
        {
            Some(names) => parse_equipment(names.iter().map(String::as_str))?,
            None => EquipmentType::all(),
        };
        let mail = MailSettings {
            from: file
                .mail
                .as_ref()
                .and_then(|mail| mail.from.clone())
                .unwrap_or_default(),
            to: file.mail.and_then(|mail| mail.to).unwrap_or_default(),
        };
        let storage = StorageSettings {
            object_root: file
                .storage
                .as_ref()
                .and_then(|storage| storage.object_root.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OBJECT_ROOT)),
            detections_dir: file
                .storage
                .as_ref()
                .and_then(|storage| storage.detections_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DETECTIONS_DIR)),
            outbox_dir: file
                .storage
                .and_then(|storage| storage.outbox_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTBOX_DIR)),
        };
        Ok(Self {
            detection: DetectionSettings {
                min_confidence,
                required_equipment,
            },
            mail,
            storage,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("PPE_MIN_CONFIDENCE") {
            self.detection.min_confidence = value
                .trim()
                .parse()
                .map_err(|_| anyhow!("PPE_MIN_CONFIDENCE must be a number between 0 and 100"))?;
        }
        if let Ok(value) = std::env::var("PPE_REQUIRED_EQUIPMENT") {
            let names = split_csv(&value);
            if !names.is_empty() {
                self.detection.required_equipment =
                    parse_equipment(names.iter().map(String::as_str))?;
            }
        }
        if let Ok(from) = std::env::var("PPE_MAIL_FROM") {
            if !from.trim().is_empty() {
                self.mail.from = from.trim().to_string();
            }
        }
        if let Ok(to) = std::env::var("PPE_MAIL_TO") {
            if !to.trim().is_empty() {
                self.mail.to = to.trim().to_string();
            }
        }
        if let Ok(path) = std::env::var("PPE_OBJECT_ROOT") {
            if !path.trim().is_empty() {
                self.storage.object_root = PathBuf::from(path);
            }
        }
        if let Ok(path) = std::env::var("PPE_DETECTIONS_DIR") {
            if !path.trim().is_empty() {
                self.storage.detections_dir = PathBuf::from(path);
            }
        }
        if let Ok(path) = std::env::var("PPE_OUTBOX_DIR") {
            if !path.trim().is_empty() {
                self.storage.outbox_dir = PathBuf::from(path);
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_min_confidence(self.detection.min_confidence)?;
        validate_required_types(&self.detection.required_equipment)?;
        if self.mail.from.is_empty() {
            return Err(anyhow!("mail sender must be set (mail.from or PPE_MAIL_FROM)"));
        }
        if self.mail.to.is_empty() {
            return Err(anyhow!("mail recipient must be set (mail.to or PPE_MAIL_TO)"));
        }
        validate_address("from", &self.mail.from)?;
        validate_address("to", &self.mail.to)?;
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<HandlerConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let cfg: HandlerConfigFile = if is_toml {
        toml::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    };
    Ok(cfg)
}

fn parse_equipment<'a>(names: impl Iterator<Item = &'a str>) -> Result<BTreeSet<EquipmentType>> {
    let mut set = BTreeSet::new();
    for name in names {
        set.insert(EquipmentType::parse(name)?);
    }
    Ok(set)
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.to_string())
        .collect()
}
