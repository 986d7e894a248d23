//! Typed quota policies for the cluster control plane.
//!
//! Administrators express quota intent ("throttle user X to N requests per
//! second", "cap namespace Y at Z bytes"). This crate translates between
//! those typed policies and the composite wire records the master stores:
//! [`decode`] recovers the set of active policies from a stored record,
//! and the free constructors at the crate root build a single policy
//! together with the mutation request that installs or removes it.
//!
//! Nothing here enforces anything: every operation is a pure function over
//! immutable values, safe to call from any number of threads. Enforcement,
//! usage accounting and request dispatch belong to the master and the RPC
//! layer.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

pub mod decode;

mod factory;
pub use factory::*;

mod request;

mod scope;
pub use scope::*;

mod settings;
pub use settings::*;
