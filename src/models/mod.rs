pub mod course;
pub mod document;
pub mod goal;
pub mod profile;
pub mod round;

pub use course::{Course, Hole, Tee};
pub use document::{Document, DOCUMENT_VERSION};
pub use goal::{Goal, GoalBaseline, GoalType};
pub use profile::{PlayerProfile, Ruleset};
pub use round::{FirstPuttBucket, HoleResult, Round};
