use clap::ValueEnum;

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for people
    #[default]
    Human,
    /// `{"success": true, "data": ...}` envelopes on stdout
    Json,
}
