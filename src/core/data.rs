//! Shared RON loading helpers.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Read and parse a single RON file.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, tagging errors with the originating path.
pub fn parse_ron<T: DeserializeOwned>(path: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str::<T>(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Load a settings file, falling back to defaults when it is missing or broken.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_ron_file(path) {
        Ok(value) => {
            info!("Loaded settings from {:?}", path);
            value
        }
        Err(DataLoadError::FileNotFound(_)) => {
            info!("{:?} not found, using built-in defaults", path);
            T::default()
        }
        Err(e) => {
            error!("{}; using built-in defaults", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Sample {
        value: f32,
    }

    #[test]
    fn test_parse_ron_reports_path() {
        let err = parse_ron::<Sample>("data/sample.ron", "(value: \"nope\")").unwrap_err();
        match err {
            DataLoadError::ParseError { path, .. } => assert_eq!(path, "data/sample.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let loaded: Sample = load_or_default(Path::new("assets/data/does_not_exist.ron"));
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let result = load_ron_file::<Sample>(Path::new("assets/data/does_not_exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
