//! The `assembly` crate arranges switch and keycap instances from a keyboard
//! layout: it resolves which keycap template every switch slot belongs to and
//! builds the per-template instance batches consumed by the viewer.

mod batch;
mod registry;
mod resolver;
mod validate;

pub use batch::InstanceBatch;
pub use registry::{RegistryError, TemplateRegistry, SWITCH_TEMPLATE};
pub use resolver::{resolve, ResolvedHalf, RowBinding};
pub use validate::{check_consistency, LayoutConsistencyError};
