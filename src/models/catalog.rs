//! Beatmap catalog: the ordered list of dan levels and their maps.
//!
//! The catalog file is a JSON object mapping each level name to the maps it
//! contains. Key order in the file is the difficulty order, so the object is
//! walked with a custom visitor instead of going through a `HashMap`.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Sentinel used by the dataset when a map has no mod requirement.
pub const NO_MOD: &str = "N/A";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single playable chart with its difficulty attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "mod", default = "default_mod")]
    pub mod_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub sr: f64,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub bpm: u32,
    #[serde(deserialize_with = "lenient::number")]
    pub cs: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub ar: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub od: f64,
    /// `mm:ss`
    pub length: String,
}

fn default_mod() -> String {
    NO_MOD.to_string()
}

impl MapEntry {
    /// Returns the mod label, or `None` for the `N/A` sentinel.
    pub fn mod_label(&self) -> Option<&str> {
        let label = self.mod_name.trim();
        if label.is_empty() || label == NO_MOD {
            None
        } else {
            Some(label)
        }
    }

    /// Parses `length` (`mm:ss`) into seconds. Unparsable lengths count as 0.
    pub fn length_seconds(&self) -> u32 {
        parse_length(&self.length).unwrap_or(0)
    }
}

/// Parses an `mm:ss` duration.
pub fn parse_length(length: &str) -> Option<u32> {
    let (mins, secs) = length.trim().split_once(':')?;
    let mins: u32 = mins.trim().parse().ok()?;
    let secs: u32 = secs.trim().parse().ok()?;
    mins.checked_mul(60)?.checked_add(secs)
}

/// A named difficulty tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub maps: Vec<MapEntry>,
}

impl Level {
    pub fn new(name: impl Into<String>, maps: Vec<MapEntry>) -> Self {
        Self {
            name: name.into(),
            maps,
        }
    }

    pub fn map_ids(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(|m| m.id.as_str())
    }
}

/// Immutable, ordered catalog with an id index for direct card lookup.
#[derive(Debug, Clone, Default)]
pub struct BeatmapCatalog {
    levels: Vec<Level>,
    /// map id -> (level index, map index)
    index: HashMap<String, (usize, usize)>,
}

impl BeatmapCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        let mut index = HashMap::new();
        for (li, level) in levels.iter().enumerate() {
            for (mi, map) in level.maps.iter().enumerate() {
                if index.insert(map.id.clone(), (li, mi)).is_some() {
                    log::warn!(
                        "CATALOG: Duplicate map id {:?} in level {:?}",
                        map.id,
                        level.name
                    );
                }
            }
        }
        Self { levels, index }
    }

    /// Loads the catalog from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        log::info!(
            "CATALOG: Loaded {} levels ({} maps) from {:?}",
            catalog.levels.len(),
            catalog.total_maps(),
            path
        );
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, name: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.name == name)
    }

    pub fn level_index(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    pub fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|l| l.name.as_str())
    }

    pub fn find_map(&self, id: &str) -> Option<&MapEntry> {
        self.index
            .get(id)
            .map(|&(li, mi)| &self.levels[li].maps[mi])
    }

    pub fn total_maps(&self) -> usize {
        self.levels.iter().map(|l| l.maps.len()).sum()
    }
}

impl<'de> Deserialize<'de> for BeatmapCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = BeatmapCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping level names to lists of maps")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut levels = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, maps)) = access.next_entry::<String, Vec<MapEntry>>()? {
                    levels.push(Level::new(name, maps));
                }
                Ok(BeatmapCatalog::new(levels))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// The dataset stores numbers either as JSON numbers or numeric strings.
mod lenient {
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    /// Map attributes are finite and never negative; `"inf"`, `"NaN"` and
    /// `-1` are rejected like any other garbage.
    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid number {s:?}")))?,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(de::Error::custom(format!("out of range number {value}")));
        }
        Ok(value)
    }

    pub fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = number(deserializer)?;
        if value > u32::MAX as f64 {
            return Err(de::Error::custom(format!("out of range number {value}")));
        }
        Ok(value.round() as u32)
    }
}
