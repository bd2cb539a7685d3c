pub mod api_utils;
pub mod components;
pub mod list_utils;
pub mod locale;
pub mod page_frame;
pub mod theme;
