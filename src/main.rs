// Sat Jan 24 2026 - Alex

use clap::Parser;
use struct_visualizer::ui::{Args, CommandHandler, ErrorDisplay};

fn main() {
    let args = Args::parse();
    let display = if args.no_color {
        ErrorDisplay::new().without_colors()
    } else {
        ErrorDisplay::new()
    };

    if let Err(e) = CommandHandler::new().execute(args) {
        display.print(&e);
        std::process::exit(1);
    }
}
