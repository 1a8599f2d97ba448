pub mod finding;
pub mod jobs;
pub mod report;
pub mod search;

pub use finding::*;
pub use jobs::*;
pub use report::*;
pub use search::*;
