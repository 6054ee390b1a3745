//! Broadcast event channel decoupling draggables from drop zones.

mod bus;

pub use bus::{global, Bus, BusEvent, Channel, Subscription};
