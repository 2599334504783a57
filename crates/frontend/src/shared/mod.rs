pub mod api_utils;
pub mod confirm_dialog;
pub mod icons;
pub mod notifications;
