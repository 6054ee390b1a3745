//! Drop zone state machine and transfer resolution.
//!
//! ## Modules
//!
//! - `zone` - per-zone state: acceptance, occupancy, drop handling
//! - `transfer` - clone-vs-original decision for the transferred node

mod transfer;
mod zone;

pub use zone::{DropValidator, DroppableDescriptor, DroppableHandle, DroppableZone};
