//! CLI entry point for painting tile maps from scripted strokes

use clap::Parser;
use tilepaint::io::cli::{Cli, MapPainter};

fn main() -> tilepaint::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let painter = MapPainter::new(cli);
    painter.run().map(|_| ())
}
