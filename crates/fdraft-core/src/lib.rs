#![forbid(unsafe_code)]

//! Pure decision core for FrankenDraft.
//!
//! This crate holds the value model and the four decisions that determine
//! what happens to a watched draft:
//!
//! - [`validity::is_meaningful`]: is a value worth persisting at all?
//! - [`projection::project`]: which subset of it is compared and stored?
//! - [`gate::can_store`] / [`gate::can_restore`]: does the current situation
//!   call for a write, or for offering a restore?
//! - [`reconcile::reconcile`]: how stored data is overlaid onto fresh data
//!   before it is handed back.
//!
//! Everything here is pure: no I/O, no clocks, no logging. The runtime shell
//! (`fdraft-runtime`) wires these decisions to storage backends, debounce
//! timers, and the confirmation prompt.
//!
//! # Invariants
//!
//! 1. Projected and stored data are compared by deep structural equality —
//!    order-insensitive for object and map keys, order-sensitive for arrays
//!    and sets — never by identity.
//! 2. The validity asymmetry between arrays (element truthiness) and objects
//!    (recursive validity) is part of the storage-eligibility contract and is
//!    preserved exactly.
//! 3. Reconciliation is a shallow overlay: stored values win for overlapping
//!    top-level keys; nothing is merged deeply.

pub mod gate;
pub mod projection;
pub mod reconcile;
pub mod validity;
pub mod value;

pub use gate::{can_restore, can_store, resolve_when};
pub use projection::project;
pub use reconcile::reconcile;
pub use validity::is_meaningful;
pub use value::DraftValue;
