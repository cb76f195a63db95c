//! Declarative element descriptions.
//!
//! ```
//! use element_tree::{ElementTree, Loader};
//! use serde_json::json;
//!
//! let mut tree = ElementTree::new();
//! let root = Loader::new().load(&mut tree, &json!({
//!     "grid": [2, 1],
//!     "ok": {"pos": [0, 0], "text": "OK", "control": "button"},
//!     "cancel": {"pos": [1, 0], "text": "Cancel", "control": "button"}
//! }))?;
//! assert!(tree.child_by_id(root, "cancel").is_some());
//! # Ok::<(), element_tree::UiError>(())
//! ```

mod core;
mod registry;

pub use self::core::Loader;
pub use registry::{ControlArgs, ControlFactory, ControlRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Checkbox, Slider};
    use crate::element::{ElementTree, Orientation};
    use crate::error::UiError;
    use crate::geometry::Rectangle;
    use crate::resources::ResourceMap;
    use crate::style::{BorderStyle, Colour};
    use serde_json::json;

    fn display() -> Rectangle {
        Rectangle::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn quadrants_from_description() {
        let mut tree = ElementTree::new();
        let root = Loader::new()
            .load(
                &mut tree,
                &json!({
                    "grid": [2, 2],
                    "tl": {"pos": [0, 0]},
                    "tr": {"pos": [1, 0]},
                    "bl": {"pos": [0, 1]},
                    "br": {"pos": [1, 1]}
                }),
            )
            .unwrap();
        tree.layout(root, display()).unwrap();

        let names: Vec<_> = tree
            .children(root)
            .unwrap()
            .iter()
            .map(|id| tree.get(*id).unwrap().id.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["tl", "tr", "bl", "br"]);

        let br = tree.child_by_id(root, "br").unwrap();
        assert!(tree
            .content_rect(br)
            .unwrap()
            .approx_eq(&Rectangle::new(400.0, 300.0, 800.0, 600.0)));
    }

    #[test]
    fn properties_and_style_are_applied() {
        let mut resources = ResourceMap::new();
        resources.set("body", 7).unwrap();
        let mut tree = ElementTree::new();
        let root = Loader::new()
            .with_resources(resources)
            .load(
                &mut tree,
                &json!({
                    "text": "Title",
                    "pad": [0.1, 0.2],
                    "span": [2, 1],
                    "visible": false,
                    "user_value": 42,
                    "grid": true,
                    "grid_orientation": "vertical",
                    "style": {
                        "background": "#ff0000",
                        "border": "white",
                        "thickness": 2,
                        "boarder_style": "DEPRESSED",
                        "alignment": "LEFT_TOP",
                        "font": "body"
                    }
                }),
            )
            .unwrap();

        let node = tree.get(root).unwrap();
        assert_eq!(node.text, "Title");
        assert!(node.padding.approx_eq(&Rectangle::new(0.1, 0.2, 0.9, 0.8)));
        assert_eq!(node.span, (2, 1));
        assert!(!node.visible);
        assert_eq!(node.user_value, 42);
        assert_eq!(node.auto_grid, Some(Orientation::Vertical));
        assert_eq!(node.style.background, Colour::RED);
        assert_eq!(node.style.border_style, BorderStyle::Depressed);
        assert_eq!(tree.resolve_font(root), Some(7));
    }

    #[test]
    fn wrong_type_reports_path_and_key() {
        let mut tree = ElementTree::new();
        let err = Loader::new()
            .load(&mut tree, &json!({"panel": {"label": {"pos": "left"}}}))
            .unwrap_err();
        assert!(matches!(
            err,
            UiError::WrongType { ref path, ref key, .. } if path == "root.panel.label" && key == "pos"
        ));
        assert!(tree.is_empty());
    }

    #[test]
    fn unknown_style_key_is_rejected() {
        let mut tree = ElementTree::new();
        let err = Loader::new()
            .load(
                &mut tree,
                &json!({"panel": {"style": {"backround": "red", "thicknes": 3}}}),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            UiError::WrongType { ref path, ref key, .. } if path == "root.panel.style" && key == "backround"
        ));
        assert!(tree.is_empty());
    }

    #[test]
    fn scalar_child_key_is_rejected() {
        let mut tree = ElementTree::new();
        let err = Loader::new()
            .load(&mut tree, &json!({"colour": "red"}))
            .unwrap_err();
        assert!(matches!(err, UiError::WrongType { ref key, .. } if key == "colour"));
    }

    #[test]
    fn unknown_control_aborts_the_subtree() {
        let mut tree = ElementTree::new();
        let err = Loader::new()
            .load(
                &mut tree,
                &json!({
                    "first": {"text": "kept until failure"},
                    "second": {"control": "dial"}
                }),
            )
            .unwrap_err();
        assert!(matches!(err, UiError::UnknownControl { ref control, .. } if control == "dial"));
        assert!(tree.is_empty());
    }

    #[test]
    fn missing_resource_is_an_error() {
        let mut tree = ElementTree::new();
        let err = Loader::new()
            .load(&mut tree, &json!({"style": {"font": "huge"}}))
            .unwrap_err();
        assert!(matches!(err, UiError::ResourceNotFound(ref name) if name == "huge"));
    }

    #[test]
    fn controls_consume_their_own_keys() {
        let mut tree = ElementTree::new();
        let root = Loader::new()
            .load(
                &mut tree,
                &json!({
                    "volume": {"control": "slider", "min": 0, "max": 10, "step": 2, "value": 7},
                    "mute": {"control": "check-box", "checked": true, "text": "Mute"}
                }),
            )
            .unwrap();

        let volume = tree.child_by_id(root, "volume").unwrap();
        assert!(tree.children(volume).unwrap().is_empty());
        let slider = tree.behavior::<Slider>(volume).unwrap();
        assert_eq!(slider.range(), (0, 10));
        assert_eq!(slider.value(), 8);

        let mute = tree.child_by_id(root, "mute").unwrap();
        assert!(tree.behavior::<Checkbox>(mute).unwrap().is_checked());
        assert_eq!(tree.get(mute).unwrap().style.border_style, BorderStyle::Raised);
    }

    #[test]
    fn slider_accepts_the_full_i32_range() {
        let mut tree = ElementTree::new();
        let root = Loader::new()
            .load(
                &mut tree,
                &json!({"control": "slider", "min": i32::MIN, "max": i32::MAX}),
            )
            .unwrap();
        let slider = tree.behavior::<Slider>(root).unwrap();
        assert_eq!(slider.range(), (i32::MIN, i32::MAX));
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn load_into_attaches_under_parent() {
        let mut tree = ElementTree::new();
        let loader = Loader::new();
        let root = loader.load(&mut tree, &json!({"id": "main"})).unwrap();
        let panel = loader
            .load_into(&mut tree, root, "panel", &json!({"text": "hi"}))
            .unwrap();
        assert_eq!(tree.parent(panel).unwrap(), Some(root));
        assert_eq!(tree.child_by_id(root, "panel"), Some(panel));
    }

    #[test]
    fn custom_controls_can_be_registered() {
        let mut loader = Loader::new();
        loader.controls_mut().register("badge", &["level"], |element, args| {
            let level = args.i32("level")?.unwrap_or(0);
            element.user_value = level as u64;
            Ok(())
        });
        let mut tree = ElementTree::new();
        let root = loader
            .load(&mut tree, &json!({"control": "badge", "level": 3}))
            .unwrap();
        assert_eq!(tree.get(root).unwrap().user_value, 3);
        assert!(tree.children(root).unwrap().is_empty());
    }
}
