//! Name to backend handle table for fonts and textures.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Result, UiError};
use crate::style::ResourceId;

/// Backend hook that turns a font or texture path into a handle.
pub trait ResourceLoader {
    fn load_font(&mut self, path: &str, size: u32) -> Result<ResourceId>;

    fn load_texture(&mut self, path: &str) -> Result<ResourceId>;
}

#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    entries: HashMap<String, ResourceId>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every entry of the `resource` object in `description`.
    ///
    /// Entries are `{"font": path, "size": n}` or `{"texture": path}`. Entries
    /// that are not objects, or carry neither key, are skipped.
    pub fn from_description(description: &Value, loader: &mut dyn ResourceLoader) -> Result<Self> {
        let mut map = Self::new();
        let Some(resources) = description.get("resource") else {
            return Ok(map);
        };
        let Some(resources) = resources.as_object() else {
            return Err(UiError::WrongType {
                path: "root".to_string(),
                key: "resource".to_string(),
                expected: "an object",
            });
        };

        for (name, entry) in resources {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            let id = if let Some(font) = entry.get("font") {
                let path = font.as_str().ok_or_else(|| wrong_type(name, "font", "a string"))?;
                let size = match entry.get("size") {
                    Some(size) => size
                        .as_u64()
                        .and_then(|size| u32::try_from(size).ok())
                        .ok_or_else(|| wrong_type(name, "size", "an unsigned integer"))?,
                    None => {
                        return Err(UiError::ResourceLoad {
                            name: name.clone(),
                            reason: "font entry has no size".to_string(),
                        });
                    }
                };
                loader.load_font(path, size)?
            } else if let Some(texture) = entry.get("texture") {
                let path = texture
                    .as_str()
                    .ok_or_else(|| wrong_type(name, "texture", "a string"))?;
                loader.load_texture(path)?
            } else {
                continue;
            };
            map.set(name, id)?;
        }
        Ok(map)
    }

    pub fn get(&self, name: &str) -> Result<ResourceId> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| UiError::ResourceNotFound(name.to_string()))
    }

    pub fn set(&mut self, name: impl Into<String>, id: ResourceId) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(UiError::DuplicateResource(name));
        }
        self.entries.insert(name, id);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn wrong_type(name: &str, key: &str, expected: &'static str) -> UiError {
    UiError::WrongType {
        path: format!("resource.{name}"),
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct CountingLoader {
        next: ResourceId,
        fonts: Vec<(String, u32)>,
        textures: Vec<String>,
    }

    impl ResourceLoader for CountingLoader {
        fn load_font(&mut self, path: &str, size: u32) -> Result<ResourceId> {
            self.next += 1;
            self.fonts.push((path.to_string(), size));
            Ok(self.next)
        }

        fn load_texture(&mut self, path: &str) -> Result<ResourceId> {
            self.next += 1;
            self.textures.push(path.to_string());
            Ok(self.next)
        }
    }

    #[test]
    fn get_and_set() {
        let mut map = ResourceMap::new();
        map.set("body", 4).unwrap();
        assert_eq!(map.get("body").unwrap(), 4);
        assert!(matches!(map.get("title"), Err(UiError::ResourceNotFound(name)) if name == "title"));
        assert!(matches!(map.set("body", 5), Err(UiError::DuplicateResource(_))));
        assert_eq!(map.get("body").unwrap(), 4);
    }

    #[test]
    fn loads_fonts_and_textures_from_description() {
        let description = json!({
            "resource": {
                "large": {"font": "fonts/sans.ttf", "size": 40},
                "logo": {"texture": "images/logo.tga"},
                "note": "ignored"
            },
            "text": "hello"
        });
        let mut loader = CountingLoader::default();
        let map = ResourceMap::from_description(&description, &mut loader).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("large").unwrap(), 1);
        assert_eq!(map.get("logo").unwrap(), 2);
        assert_eq!(loader.fonts, vec![("fonts/sans.ttf".to_string(), 40)]);
        assert_eq!(loader.textures, vec!["images/logo.tga".to_string()]);
    }

    #[test]
    fn font_without_size_is_rejected() {
        let description = json!({"resource": {"broken": {"font": "a.ttf"}}});
        let mut loader = CountingLoader::default();
        let err = ResourceMap::from_description(&description, &mut loader).unwrap_err();
        assert!(matches!(err, UiError::ResourceLoad { ref name, .. } if name == "broken"));
    }

    #[test]
    fn missing_resource_block_yields_empty_map() {
        let mut loader = CountingLoader::default();
        let map = ResourceMap::from_description(&json!({"pos": [0, 0]}), &mut loader).unwrap();
        assert!(map.is_empty());
    }
}
