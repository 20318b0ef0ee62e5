//! Server Endpoint Bindings
//!
//! One async function per admin endpoint, organized by domain.

mod http;
mod users;
mod positions;
mod courses;

pub use users::*;
pub use positions::*;
pub use courses::*;
