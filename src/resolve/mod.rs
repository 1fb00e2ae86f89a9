//! Asset resolution: manifest lookup plus existence check, folded into a
//! three-state status the dashboard renders.

mod resolver;
mod status;

pub use resolver::{Resolver, WeekStatus};
pub use status::ResolutionStatus;
#[cfg(test)]
pub use status::UnavailableReason;
