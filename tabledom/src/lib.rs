pub mod document;
pub mod error;
pub mod event;
pub mod node;
pub mod render;
pub mod selector;
pub mod table;

pub use document::{Document, ReadyState};
pub use error::{DomError, SelectorError};
pub use event::{DispatchOutcome, Event, EventContext, EventKind, MouseButton};
pub use node::{Element, NodeId, NodeKind};
pub use render::render_table;
pub use selector::Selector;
