//! Discovery of candidate mirrors from the Launchpad archive mirror directory.

pub mod launchpad;
pub mod model;

pub use launchpad::{fetch_directory_page, get_up_to_date_mirrors, parse_mirrors};
pub use model::{Endpoint, Mirror, Origin, is_supported_url};
