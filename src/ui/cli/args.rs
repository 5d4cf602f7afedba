// Sat Jan 24 2026 - Alex

use crate::render::LabelPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "struct-visualizer")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Locate C structs, compute their memory layout and draw it as a byte grid", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// JSON config with type sizes and display settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of the text grid
    #[arg(long = "json", global = true)]
    pub json_output: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the struct enclosing a line
    Locate(LocateArgs),
    /// Compute the layout of the struct enclosing a line and print it as JSON
    Layout(LayoutArgs),
    /// Draw a layout JSON file
    Render(RenderArgs),
    /// Locate, lay out and draw in one step
    Visualize(VisualizeArgs),
}

#[derive(Parser, Debug)]
pub struct LocateArgs {
    pub file: PathBuf,

    /// One-based line inside the struct body
    pub line: usize,
}

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    pub file: PathBuf,

    /// One-based line inside the struct body
    pub line: usize,

    /// Maximum member alignment, as with `#pragma pack(N)`
    #[arg(short, long)]
    pub pack: Option<usize>,

    /// Extra files searched for definitions of unknown types
    #[arg(short, long, num_args = 1..)]
    pub search: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    pub input: PathBuf,

    /// Presentation units per byte
    #[arg(short, long)]
    pub scale: Option<f64>,

    #[arg(long)]
    pub policy: Option<LabelPolicy>,

    /// Leave the bytes after the last field undrawn
    #[arg(long)]
    pub no_tail_padding: bool,
}

#[derive(Parser, Debug)]
pub struct VisualizeArgs {
    pub file: PathBuf,

    /// One-based line inside the struct body
    pub line: usize,

    #[arg(short, long)]
    pub pack: Option<usize>,

    #[arg(short, long)]
    pub scale: Option<f64>,

    #[arg(long)]
    pub policy: Option<LabelPolicy>,

    #[arg(long)]
    pub no_tail_padding: bool,

    #[arg(long, num_args = 1..)]
    pub search: Vec<PathBuf>,
}

fn check_line(line: usize) -> Result<(), String> {
    if line == 0 {
        return Err("Line numbers start at 1".to_string());
    }
    Ok(())
}

fn check_pack(pack: Option<usize>) -> Result<(), String> {
    if pack == Some(0) {
        return Err("Pack value must be at least 1".to_string());
    }
    Ok(())
}

fn check_scale(scale: Option<f64>) -> Result<(), String> {
    match scale {
        Some(s) if !(s.is_finite() && s > 0.0) => Err(format!("Scale must be a positive number, got {}", s)),
        _ => Ok(()),
    }
}

impl LocateArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.exists() {
            return Err(format!("Source file does not exist: {:?}", self.file));
        }
        check_line(self.line)
    }
}

impl LayoutArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.exists() {
            return Err(format!("Source file does not exist: {:?}", self.file));
        }
        check_line(self.line)?;
        check_pack(self.pack)
    }
}

impl RenderArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Layout file does not exist: {:?}", self.input));
        }
        check_scale(self.scale)
    }
}

impl VisualizeArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.exists() {
            return Err(format!("Source file does not exist: {:?}", self.file));
        }
        check_line(self.line)?;
        check_pack(self.pack)?;
        check_scale(self.scale)
    }
}
