//! CLI argument parsing.
use clap::Parser;

/// Cut a release: rewrite the changelog, commit and tag it, fast-forward
/// the release branch, and push everything after manual review.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Args {
    /// Release version in x.y.z form.
    pub version: String,

    #[arg(long, default_value = ".")]
    /// Repository working directory.
    pub path: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}
