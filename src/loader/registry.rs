use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::controls::{Button, Checkbox, RadioButton, RadioButtonGroup, Slider, control_style};
use crate::element::{Element, Orientation};
use crate::error::{Result, UiError};

/// Description keys a control factory sees while its element is built.
pub struct ControlArgs<'a> {
    pub path: &'a str,
    pub description: &'a Map<String, Value>,
}

impl ControlArgs<'_> {
    pub fn i32(&self, key: &str) -> Result<Option<i32>> {
        match self.description.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "an integer")),
        }
    }

    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.description.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a boolean")),
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> UiError {
        UiError::WrongType {
            path: self.path.to_string(),
            key: key.to_string(),
            expected,
        }
    }
}

pub type ControlFactory = Box<dyn Fn(&mut Element, &ControlArgs<'_>) -> Result<()>>;

struct ControlEntry {
    keys: &'static [&'static str],
    factory: ControlFactory,
}

/// Control type ids usable from a description's `control` key.
pub struct ControlRegistry {
    entries: HashMap<String, ControlEntry>,
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ControlRegistry {
    /// Registry without any control types.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("button", &[], |element, _args| {
            element.style = control_style();
            element.set_behavior(Button::new());
            Ok(())
        });
        registry.register("check-box", &["checked"], |element, args| {
            element.style = control_style();
            let checked = args.bool("checked")?.unwrap_or(false);
            element.set_behavior(Checkbox::new().with_checked(checked));
            Ok(())
        });
        registry.register("radio-button", &["checked"], |element, args| {
            element.style = control_style();
            let mut button = RadioButton::new();
            button.set_checked(args.bool("checked")?.unwrap_or(false));
            element.set_behavior(button);
            Ok(())
        });
        registry.register("radio-button-group", &[], |element, _args| {
            element.auto_grid = Some(Orientation::Vertical);
            element.set_behavior(RadioButtonGroup::new());
            Ok(())
        });
        registry.register("slider", &["min", "max", "step", "value"], |element, args| {
            let min = args.i32("min")?.unwrap_or(0);
            let max = args.i32("max")?.unwrap_or(100);
            let step = args.i32("step")?.unwrap_or(1);
            let mut slider = Slider::new(min, max, step)?;
            if let Some(value) = args.i32("value")? {
                slider.set_value(value);
            }
            let defaults = Slider::element(min, max, step)?;
            element.style = defaults.style;
            element.set_behavior(slider);
            Ok(())
        });
        registry
    }

    /// Add or replace a control type. `keys` are extra description keys the
    /// factory reads; the loader does not treat them as children.
    pub fn register<F>(&mut self, type_id: impl Into<String>, keys: &'static [&'static str], factory: F)
    where
        F: Fn(&mut Element, &ControlArgs<'_>) -> Result<()> + 'static,
    {
        self.entries.insert(
            type_id.into(),
            ControlEntry {
                keys,
                factory: Box::new(factory),
            },
        );
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }

    pub(crate) fn keys(&self, type_id: &str) -> &'static [&'static str] {
        self.entries.get(type_id).map(|entry| entry.keys).unwrap_or(&[])
    }

    /// Apply the factory for `type_id` to `element`.
    pub fn build(&self, type_id: &str, element: &mut Element, args: &ControlArgs<'_>) -> Result<()> {
        let entry = self
            .entries
            .get(type_id)
            .ok_or_else(|| UiError::UnknownControl {
                path: args.path.to_string(),
                control: type_id.to_string(),
            })?;
        (entry.factory)(element, args)
    }
}
