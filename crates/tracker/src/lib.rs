//! Issue-tracker collaborator contract
//!
//! Rules never talk HTTP. They receive a [`TrackerClient`] built by
//! [`create_client`] from validated [`TrackerOptions`] and a
//! [`TicketValidator`] backend supplied by the host.

mod client;
mod memory;
mod options;

pub use client::{create_client, TicketStatus, TicketValidator, TrackerClient, TrackerError};
pub use memory::StaticTracker;
pub use options::{TrackerConfigError, TrackerKind, TrackerOptions};
