//! # gallery-scan CLI
//!
//! Command-line interface for the gallery analyzer.
//!
//! ## Usage
//! ```bash
//! gallery-scan analyze ~/Pictures --face-model models/seeta_fd_frontal_v1.0.bin
//! gallery-scan analyze ~/Pictures --blur-threshold 80 --output json
//! ```

mod cli;

use gallery_analyzer::Result;

fn main() -> Result<()> {
    cli::run()
}
