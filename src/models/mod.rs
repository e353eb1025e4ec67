pub mod difficulty;
pub mod loaders;
pub mod problem;

pub use difficulty::Difficulty;
pub use loaders::load_slugs;
pub use problem::{ProblemFields, ProblemRecord, ProblemSummary, StoredProblem, UNKNOWN_TITLE};
