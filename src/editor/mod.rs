//! Drag-and-drop layout editor: the editing model, its canvas and the
//! property panel.

pub mod canvas;
pub mod model;
pub mod properties;

pub use canvas::{canvas_ui, CanvasOutcome};
pub use model::{KeyPatch, LayoutEditor};
pub use properties::PropertiesPanel;
