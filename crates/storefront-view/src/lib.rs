//! Catalog presentation: the store that owns view state, the renderer that
//! turns it into page markup, and the controllers that drive both from
//! fetch results and page events.

pub mod controller;
pub mod detail;
pub mod dom;
pub mod handoff;
pub mod messages;
pub mod render;
pub mod store;

pub use controller::{
    CatalogController, Debouncer, Effect, LoadTicket, LoadTrigger, Phase, RunExit, UiEvent,
};
pub use detail::{resolve_product_id, DetailOutcome, DetailPage};
pub use dom::{Document, Hook, MemoryDocument, RenderError, PRODUCT_ID_ATTR};
pub use handoff::{HandoffStore, MemoryHandoff, PRODUCT_ID_KEY};
pub use render::{RenderPass, Renderer};
pub use store::{CatalogStore, ViewResult};
