use thiserror::Error;

use crate::element::ElementId;
use crate::logging::LoggingError;

/// Unified result type for the element tree crate.
pub type Result<T> = std::result::Result<T, UiError>;

/// Errors surfaced by the element tree, its loader and its controls.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("element {0:?} is not in the tree")]
    ElementNotFound(ElementId),
    #[error("element {child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: ElementId, parent: ElementId },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CyclicAttach { child: ElementId, parent: ElementId },
    #[error("element {child:?} is not a child of {parent:?}")]
    NotAChild { child: ElementId, parent: ElementId },
    #[error("element `{element}` is running a behavior hook and cannot be destroyed")]
    ElementBusy { element: String },
    #[error("draw re-entered on element `{element}` from inside its own draw")]
    ReentrantDraw { element: String },
    #[error("element `{element}` has text but no font is set on it or any ancestor")]
    NoFont { element: String },
    #[error("cell ({x}, {y}) is outside a {columns}x{rows} grid")]
    CellOutOfRange {
        x: u32,
        y: u32,
        columns: u32,
        rows: u32,
    },
    #[error("element {0:?} is not a layout grid")]
    NotALayoutGrid(ElementId),
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidGrid { width: u32, height: u32 },
    #[error("`{path}`: key `{key}` expects {expected}")]
    WrongType {
        path: String,
        key: String,
        expected: &'static str,
    },
    #[error("slider range is empty: min {min} must be below max {max}")]
    InvalidRange { min: i32, max: i32 },
    #[error("`{path}`: unknown control type `{control}`")]
    UnknownControl { path: String, control: String },
    #[error("resource name not found: {0}")]
    ResourceNotFound(String),
    #[error("resource name already used: {0}")]
    DuplicateResource(String),
    #[error("resource `{name}` failed to load: {reason}")]
    ResourceLoad { name: String, reason: String },
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
