pub mod interactive;
pub mod misc;
pub mod search;
pub mod upload;

pub use interactive::interactive;
pub use misc::{generate_completions, health_check};
pub use search::search_repos;
pub use upload::upload_csv;
