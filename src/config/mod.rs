//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::SocialConfig;
pub use site::TocConfig;
