pub mod cover_letter_section;
pub mod export_section;
pub mod generate_enhance;
pub mod navbar;
pub mod notification;
pub mod optimization_display;
pub mod portfolio_display;
pub mod portfolio_section;
pub mod resume_display;
pub mod resume_form;
pub mod theme_toggle;
