//! Copra Core - property diff and transfer engines
//!
//! Pure set logic over [`PropertyMap`]s plus the sequential bulk-copy
//! built on top of the Consul KV client. Nothing here owns state; every
//! value is constructed per request.

pub mod diff;
pub mod services;
pub mod transfer;

pub use diff::{DiffResult, ServiceDiff, diff, diff_service};
pub use services::{ServiceSelection, invalid_names, union_preserving_order};
pub use transfer::{TransferOutcome, transfer_service, write_properties};
