// Learning roadmaps built from a gap result's missing skills.
// Pure computation: no logging, no I/O.

pub mod catalog;
pub mod generator;

pub use catalog::{EffortRule, LearningCatalog, PrerequisiteRule, ResourceLink, SearchPlatform};
pub use generator::{
    GapCategory, LearningPath, RoadmapGenerator, RoadmapTimeline, TimelineItem,
    DEFAULT_PREFERRED_DAYS, DEFAULT_REQUIRED_DAYS,
};
