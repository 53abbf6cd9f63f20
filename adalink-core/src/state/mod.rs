//! Protocol state machine
//!
//! Defines the runtime behavior of the bridge. The state machine is
//! explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::ProtocolState;
