pub mod api_utils;
pub mod date_utils;
pub mod dialogs;
pub mod form_utils;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod media;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod toast;
