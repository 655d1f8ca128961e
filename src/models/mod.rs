mod allocation;
mod identity;
mod project;
mod status;
mod team_member;

pub use allocation::MyAllocation;
pub use identity::{Identity, IdentityError};
pub use project::ProjectWithDetails;
pub use status::ProjectStatus;
pub use team_member::TeamMember;
