//! Color constants for the feedback board.
//!
//! A dark slate background with light cards; status colors follow the usual
//! amber / teal / green / grey progression.

use eframe::egui::Color32;

use crate::shared::FeedbackStatus;

/// Top bar background - Deep slate
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1F, 0x29, 0x37);

/// Main area background
pub const BG_DARK: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

/// Feedback card background
pub const CARD_BG: Color32 = Color32::from_rgb(0xF9, 0xFA, 0xFB);

/// Feedback card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xD1, 0xD5, 0xDB);

/// Submission form background
pub const FORM_BG: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);

/// Input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xE5, 0xE7, 0xEB);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);

/// Accent color for primary buttons
pub const ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xEB);

/// Hovered accent
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x1D, 0x4E, 0xD8);

/// Admin role badge
pub const ADMIN_BADGE: Color32 = Color32::from_rgb(0x7C, 0x3A, 0xED);

/// Regular user role badge
pub const USER_BADGE: Color32 = Color32::from_rgb(0x4B, 0x55, 0x63);

pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);

pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

pub const STATUS_CHECKING: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Destructive button background
pub const DANGER: Color32 = Color32::from_rgb(0xDC, 0x26, 0x26);

pub const PENDING: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);
pub const IN_PROGRESS: Color32 = Color32::from_rgb(0x14, 0xB8, 0xA6);
pub const COMPLETED: Color32 = Color32::from_rgb(0x16, 0xA3, 0x4A);
pub const CLOSED: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

/// Badge color for a feedback status
pub fn status_color(status: FeedbackStatus) -> Color32 {
    match status {
        FeedbackStatus::Pending => PENDING,
        FeedbackStatus::InProgress => IN_PROGRESS,
        FeedbackStatus::Completed => COMPLETED,
        FeedbackStatus::Closed => CLOSED,
    }
}
