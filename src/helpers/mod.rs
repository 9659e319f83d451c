//! Small HTML and URL helpers shared by the views and the generator

mod html;
mod url;

pub use html::*;
pub use url::*;
