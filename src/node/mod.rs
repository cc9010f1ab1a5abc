//! Node model: identities, kinds, and the per-kind pulse transition rules.
//!
//! Every node belongs to exactly one [`Network`](crate::network::Network),
//! which owns its mutable state. Nodes only change when the simulator
//! delivers a pulse to them.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`id`] | [`NodeId`] newtype and the `button` sentinel |
//! | [`kind`] | [`Kind`] declaration markers |
//! | [`state`] | [`Node`] and its [`NodeState`] transition function |

pub mod id;
pub mod kind;
pub mod state;

pub use id::NodeId;
pub use kind::Kind;
pub use state::{Node, NodeState};
