//! Services: authorization, validation and error mapping between handlers and repositories.

mod links;
mod resource;
pub mod validation;

pub use links::LinkService;
pub use resource::{authorize, DeletedId, ListParams, ResourceService};
