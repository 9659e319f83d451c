//! Page views: homepage, posts index, post page, table of contents, footer
//!
//! Each view holds the state its page needs (the post list, the search
//! query) and renders an HTML fragment. `layout::render_page` wraps a
//! fragment in the full document.

mod card;
pub mod footer;
pub mod home;
pub mod layout;
pub mod listing;
pub mod post;
pub mod toc;

pub use card::{render_card, render_card_list, tag_url};
pub use footer::render_footer;
pub use home::HomeView;
pub use layout::{render_page, PageMeta};
pub use listing::{render_pagination, ListingView};
pub use post::render_post;
pub use toc::render_toc;
