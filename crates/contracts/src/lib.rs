//! Wire contracts between the inventory dashboard and the backend REST API.

pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod shared;
pub mod system;
