//! Local deterministic search: the half of the discovery pipeline that does
//! not depend on the ranking service.

pub mod fallback;
pub mod reconcile;
