use nanning_core::document::DocumentType;
use nanning_core::theme::ThemeMode;

/// Parse document type from string
pub fn parse_document_type(s: &str) -> std::result::Result<DocumentType, String> {
    s.parse::<DocumentType>()
}

/// Parse theme mode from string
pub fn parse_theme_mode(s: &str) -> std::result::Result<ThemeMode, String> {
    s.parse::<ThemeMode>()
}
