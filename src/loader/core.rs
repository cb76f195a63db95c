use serde_json::{Value, json};

use crate::element::{Element, ElementId, ElementTree, Orientation};
use crate::error::{Result, UiError};
use crate::logging::{LogLevel, json_kv};
use crate::resources::ResourceMap;
use crate::style::{Alignment, BorderStyle, Colour, ResourceId, Style};

use super::registry::{ControlArgs, ControlRegistry};

const ROOT_PATH: &str = "root";

/// Builds element subtrees from JSON descriptions.
///
/// Keys are applied in document order. Anything that is not a known
/// property, a `control` key, or one of the control's own keys names a
/// child element and must hold an object.
#[derive(Default)]
pub struct Loader {
    resources: ResourceMap,
    controls: ControlRegistry,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, resources: ResourceMap) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_controls(mut self, controls: ControlRegistry) -> Self {
        self.controls = controls;
        self
    }

    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    pub fn controls_mut(&mut self) -> &mut ControlRegistry {
        &mut self.controls
    }

    /// Build a standalone subtree. On error nothing is left in `tree`.
    pub fn load(&self, tree: &mut ElementTree, description: &Value) -> Result<ElementId> {
        let root = self.build(tree, ROOT_PATH, None, description)?;
        self.log_loaded(tree, ROOT_PATH, root);
        Ok(root)
    }

    /// Build a subtree named `name` and attach it to `parent`.
    pub fn load_into(
        &self,
        tree: &mut ElementTree,
        parent: ElementId,
        name: &str,
        description: &Value,
    ) -> Result<ElementId> {
        let path = match tree.get(parent)?.id.as_deref() {
            Some(parent_name) => format!("{parent_name}.{name}"),
            None => name.to_string(),
        };
        let id = self.build(tree, &path, Some(name), description)?;
        if let Err(err) = tree.attach(parent, id) {
            tree.destroy(id)?;
            return Err(err);
        }
        self.log_loaded(tree, &path, id);
        Ok(id)
    }

    fn build(
        &self,
        tree: &mut ElementTree,
        path: &str,
        name: Option<&str>,
        description: &Value,
    ) -> Result<ElementId> {
        let object = description.as_object().ok_or_else(|| UiError::WrongType {
            path: path.to_string(),
            key: name.unwrap_or(ROOT_PATH).to_string(),
            expected: "an object",
        })?;

        let mut element = Element::new();
        element.id = name.map(str::to_string);

        let control = match object.get("control") {
            Some(value) => {
                let type_id = value.as_str().ok_or_else(|| wrong_type(path, "control", "a string"))?;
                let args = ControlArgs {
                    path,
                    description: object,
                };
                self.controls.build(type_id, &mut element, &args)?;
                Some(type_id)
            }
            None => None,
        };
        let control_keys = control.map(|type_id| self.controls.keys(type_id)).unwrap_or(&[]);

        let mut orientation = None;
        let mut children = Vec::new();
        for (key, value) in object {
            match key.as_str() {
                "control" | "resource" => {}
                "pos" => {
                    let (x, y) = pair(path, key, value)?;
                    element.pos = (x, y);
                }
                "span" => {
                    let (x, y) = pair(path, key, value)?;
                    element.span = (x, y);
                }
                "grid" => match value {
                    Value::Bool(true) => {
                        element.auto_grid = Some(element.auto_grid.unwrap_or_default());
                    }
                    Value::Bool(false) => element.auto_grid = None,
                    _ => {
                        let (width, height) = pair(path, key, value)
                            .map_err(|_| wrong_type(path, key, "[width, height] or a boolean"))?;
                        element.set_grid(width, height);
                    }
                },
                "grid_orientation" => {
                    let parsed = value
                        .as_str()
                        .and_then(Orientation::parse)
                        .ok_or_else(|| wrong_type(path, key, "\"horizontal\" or \"vertical\""))?;
                    orientation = Some(parsed);
                }
                "pad" => apply_padding(&mut element, path, value)?,
                "id" => element.id = Some(string(path, key, value)?.to_string()),
                "text" => element.set_text(string(path, key, value)?),
                "visible" => element.visible = boolean(path, key, value)?,
                "active" => element.active = boolean(path, key, value)?,
                "user_value" => {
                    element.user_value = value
                        .as_u64()
                        .ok_or_else(|| wrong_type(path, key, "an unsigned integer"))?;
                }
                "style" => self.apply_style(&mut element.style, path, value)?,
                _ if control_keys.contains(&key.as_str()) => {}
                _ => {
                    if !value.is_object() {
                        return Err(wrong_type(path, key, "an object (child element)"));
                    }
                    children.push((key, value));
                }
            }
        }
        if let (Some(orientation), Some(_)) = (orientation, element.auto_grid) {
            element.auto_grid = Some(orientation);
        }

        let id = tree.create(element);
        for (key, value) in children {
            let child_path = format!("{path}.{key}");
            let built = self
                .build(tree, &child_path, Some(key.as_str()), value)
                .and_then(|child| tree.attach(id, child));
            if let Err(err) = built {
                tree.destroy(id)?;
                return Err(err);
            }
        }
        Ok(id)
    }

    fn apply_style(&self, style: &mut Style, path: &str, value: &Value) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| wrong_type(path, "style", "an object"))?;
        let path = format!("{path}.style");

        for (key, value) in object {
            match key.as_str() {
                "foreground" => style.foreground = colour(&path, key, value)?,
                "background" => style.background = colour(&path, key, value)?,
                "border" => style.border = colour(&path, key, value)?,
                "radius" => style.radius = number(&path, key, value)?,
                "thickness" => style.thickness = number(&path, key, value)?,
                "font" => style.font = Some(self.resource(&path, key, value)?),
                "texture" => style.texture = Some(self.resource(&path, key, value)?),
                "boarder_style" | "border_style" => {
                    style.border_style = value
                        .as_str()
                        .and_then(BorderStyle::parse)
                        .ok_or_else(|| wrong_type(&path, key, "\"SOLID\", \"RAISED\" or \"DEPRESSED\""))?;
                }
                "alignment" => {
                    style.alignment = value
                        .as_str()
                        .and_then(Alignment::parse)
                        .ok_or_else(|| wrong_type(&path, key, "an alignment name such as \"LEFT_TOP\""))?;
                }
                _ => return Err(wrong_type(&path, key, "a style attribute")),
            }
        }
        Ok(())
    }

    /// A resource name looked up in the map, or a raw handle.
    fn resource(&self, path: &str, key: &str, value: &Value) -> Result<ResourceId> {
        match value {
            Value::String(name) => self.resources.get(name),
            Value::Number(number) => number
                .as_u64()
                .and_then(|id| ResourceId::try_from(id).ok())
                .ok_or_else(|| wrong_type(path, key, "a resource name or handle")),
            _ => Err(wrong_type(path, key, "a resource name or handle")),
        }
    }

    fn log_loaded(&self, tree: &ElementTree, path: &str, id: ElementId) {
        let count = tree.subtree(id).map(|nodes| nodes.len()).unwrap_or(0);
        tree.log(
            LogLevel::Debug,
            "loaded",
            [json_kv("path", json!(path)), json_kv("elements", json!(count))],
        );
    }
}

fn wrong_type(path: &str, key: &str, expected: &'static str) -> UiError {
    UiError::WrongType {
        path: path.to_string(),
        key: key.to_string(),
        expected,
    }
}

fn pair(path: &str, key: &str, value: &Value) -> Result<(u32, u32)> {
    let items = value
        .as_array()
        .filter(|items| items.len() == 2)
        .ok_or_else(|| wrong_type(path, key, "a two element array"))?;
    let x = unsigned(path, key, &items[0])?;
    let y = unsigned(path, key, &items[1])?;
    Ok((x, y))
}

fn unsigned(path: &str, key: &str, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| wrong_type(path, key, "unsigned integers"))
}

fn number(path: &str, key: &str, value: &Value) -> Result<f32> {
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| wrong_type(path, key, "a number"))
}

fn string<'v>(path: &str, key: &str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or_else(|| wrong_type(path, key, "a string"))
}

fn boolean(path: &str, key: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| wrong_type(path, key, "a boolean"))
}

fn colour(path: &str, key: &str, value: &Value) -> Result<Colour> {
    let parsed = match value {
        Value::String(text) => Colour::parse(text),
        Value::Number(number) => number
            .as_u64()
            .and_then(|argb| u32::try_from(argb).ok())
            .map(Colour::from_argb),
        _ => None,
    };
    parsed.ok_or_else(|| wrong_type(path, key, "a colour"))
}

/// `pad` is a number (same inset on all sides), `[x, y]` insets, or raw
/// `[left, right, top, bottom]` edge positions.
fn apply_padding(element: &mut Element, path: &str, value: &Value) -> Result<()> {
    const EXPECTED: &str = "a number or an array of 2 or 4 numbers";
    if let Some(padding) = value.as_f64() {
        element.set_padding(padding as f32);
        return Ok(());
    }

    let items = value
        .as_array()
        .ok_or_else(|| wrong_type(path, "pad", EXPECTED))?;
    let numbers = items
        .iter()
        .map(|item| item.as_f64().map(|v| v as f32))
        .collect::<Option<Vec<f32>>>()
        .ok_or_else(|| wrong_type(path, "pad", EXPECTED))?;
    match numbers.as_slice() {
        [x, y] => element.set_padding_edges(*x, 1.0 - x, *y, 1.0 - y),
        [left, right, top, bottom] => element.set_padding_edges(*left, *right, *top, *bottom),
        _ => return Err(wrong_type(path, "pad", EXPECTED)),
    }
    Ok(())
}
