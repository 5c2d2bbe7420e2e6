pub mod card_animated;
pub mod page_header;
pub mod select_field;
pub mod stat_card;

pub use card_animated::CardAnimated;
pub use page_header::PageHeader;
pub use select_field::{same_options, SelectField};
pub use stat_card::StatCard;
