//! Rendering module for drawing paginated documents.

mod frame;
mod json;
mod options;
mod text;

pub use frame::{Frame, FrameContext, TextFrame};
pub use json::{to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions};
pub use text::{render_pages, to_text};
