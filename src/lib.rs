//! Retained-mode element tree for small displays.
//!
//! An [`ElementTree`] owns every node. A host lays the tree out against the
//! display once per frame, updates it, draws it through a [`Graphics`]
//! backend and feeds it cursor and keyboard input in between. Placement is
//! fractional: each element covers cells of its parent's grid and is then
//! inset by its padding, so the same tree fits any display size.

pub mod controls;
pub mod element;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod resources;
pub mod runtime;
pub mod style;

pub use controls::{Button, Checkbox, RadioButton, RadioButtonGroup, Slider};
pub use element::{
    Behavior, Callbacks, Element, ElementContext, ElementId, ElementTree, EventFlow, HitTestPolicy,
    Orientation, PlainElement,
};
pub use error::{Result, UiError};
pub use geometry::{Point, Rectangle};
pub use graphics::{DrawCommand, Graphics, RecordingGraphics};
pub use layout::{LayoutGrid, cell_fraction, resolve_content_rect};
pub use loader::{ControlArgs, ControlFactory, ControlRegistry, Loader};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult, MemorySink,
};
pub use metrics::{MetricSnapshot, RuntimeMetrics};
pub use resources::{ResourceLoader, ResourceMap};
pub use runtime::{Host, InputEvent, RuntimeConfig};
pub use style::{AlignEdge, Alignment, BorderStyle, Colour, ResourceId, Style};
