use anyhow::{Context, Result};
use ron::de::from_reader;
use ron::ser::{PrettyConfig, to_writer_pretty};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::types::{Name, Type};

/// A snapshot of the declared types a type-graph provider hands over
/// for linting. Types keep the order they were added in.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TypeUniverse {
    pub types: Vec<Type>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, t: Type) {
        self.types.push(t);
    }

    /// Finds a type by its canonical `package.Name` identity
    pub fn find(&self, canonical: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == canonical)
    }

    /// Finds a type by name
    pub fn get(&self, name: &Name) -> Option<&Type> {
        self.types.iter().find(|t| &t.name == name)
    }

    /// Write the universe to a RON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .context(format!("Failed to open file for writing: {}", path.display()))?;

        to_writer_pretty(file, &self.types, PrettyConfig::default())
            .context(format!("Failed to serialize types to: {}", path.display()))?;
        Ok(())
    }

    /// Read a universe previously written with [`TypeUniverse::write_to_file`]
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).context(format!("Failed to open file: {}", path.display()))?;

        let types: Vec<Type> = from_reader(file)
            .context(format!("Failed to parse types from: {}", path.display()))?;

        Ok(TypeUniverse { types })
    }

    /// Parse a JSON array of types, as emitted by external type-graph providers
    pub fn from_json_str(json: &str) -> Result<Self> {
        let types: Vec<Type> =
            serde_json::from_str(json).context("Failed to parse types from JSON")?;
        Ok(TypeUniverse { types })
    }
}

impl FromIterator<Type> for TypeUniverse {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        TypeUniverse {
            types: iter.into_iter().collect(),
        }
    }
}
