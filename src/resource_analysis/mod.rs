//! Resource analysis core: domain model, reportability policies, per-kind
//! profiles and the services the batch runner is assembled from.
//! No I/O happens here; all access goes through `crate::ports`.

pub mod domain;
pub mod policies;
pub mod profiles;
pub mod services;
