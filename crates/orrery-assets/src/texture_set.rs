//! Textures for a set of named files, loaded once from one directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::texture::{TextureImage, try_load_texture};

/// Decoded textures keyed by file name.
///
/// Files that could not be loaded have no entry.
#[derive(Debug, Default)]
pub struct TextureSet {
    dir: PathBuf,
    textures: HashMap<String, TextureImage>,
    failed: Vec<String>,
}

impl TextureSet {
    /// Load every file in `names` from `dir`. Duplicates are loaded once.
    pub fn load<'a>(dir: &Path, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self {
            dir: dir.to_path_buf(),
            ..Self::default()
        };

        for name in names {
            if set.textures.contains_key(name) || set.failed.iter().any(|f| f == name) {
                continue;
            }
            match try_load_texture(&dir.join(name)) {
                Some(texture) => {
                    set.textures.insert(name.to_string(), texture);
                }
                None => set.failed.push(name.to_string()),
            }
        }

        tracing::info!(
            "Loaded {} textures from {} ({} unavailable)",
            set.textures.len(),
            dir.display(),
            set.failed.len()
        );
        set
    }

    /// The texture stored under `name`, if it loaded.
    pub fn get(&self, name: &str) -> Option<&TextureImage> {
        self.textures.get(name)
    }

    /// Directory the textures were read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names that were requested but could not be loaded.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(2, 2, image::Rgb([255, 200, 0]))
            .save(dir.path().join("sun.bmp"))
            .unwrap();

        let set = TextureSet::load(dir.path(), ["sun.bmp", "earth.bmp"]);
        assert_eq!(set.len(), 1);
        assert!(set.get("sun.bmp").is_some());
        assert!(set.get("earth.bmp").is_none());
        assert_eq!(set.failed(), ["earth.bmp".to_string()]);
    }

    #[test]
    fn test_duplicate_names_load_once() {
        let dir = tempfile::tempdir().unwrap();
        let set = TextureSet::load(dir.path(), ["moon.bmp", "moon.bmp"]);
        assert!(set.is_empty());
        assert_eq!(set.failed().len(), 1);
    }

    #[test]
    fn test_nonexistent_directory_yields_empty_set() {
        let set = TextureSet::load(Path::new("/definitely/not/here"), ["sun.bmp"]);
        assert!(set.is_empty());
        assert_eq!(set.dir(), Path::new("/definitely/not/here"));
    }
}
