pub mod candidate;
pub mod role;
pub mod skill;

pub use candidate::CandidateProfile;
pub use role::{RoleCatalog, RoleDefinition, RoleSkillSpec};
pub use skill::{skill_set, SkillSet, SkillToken};
