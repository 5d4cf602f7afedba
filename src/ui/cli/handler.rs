// Sat Jan 24 2026 - Alex

use super::args::{Args, Command, LayoutArgs, LocateArgs, RenderArgs, VisualizeArgs};
use crate::config::Config;
use crate::locator::{SourceSpan, StructLocator};
use crate::output::{GridJsonSerializer, TextGrid};
use crate::render::{GridModel, GridRenderer, LabelPolicy};
use crate::resolve::{SourceFilesProvider, TypeResolver};
use crate::structure::{DeclarationParser, LayoutEngine, SerializableLayout, StructLayout, StructureError};
use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Unknown types looked up before giving up on a layout.
pub const MAX_RESOLVE_ATTEMPTS: usize = 32;

pub struct CommandHandler {
    config: Config,
    json_output: bool,
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            json_output: false,
            quiet: false,
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;

        self.config = match &args.config {
            Some(path) => {
                Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => Config::from_env().context("Failed to load config")?,
        };

        if args.no_color || !self.config.display.use_color {
            colored::control::set_override(false);
        }
        self.json_output = args.json_output;
        self.quiet = args.quiet;

        match args.command {
            Command::Locate(locate_args) => self.handle_locate(locate_args),
            Command::Layout(layout_args) => self.handle_layout(layout_args),
            Command::Render(render_args) => self.handle_render(render_args),
            Command::Visualize(visualize_args) => self.handle_visualize(visualize_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = if args.quiet {
            log::LevelFilter::Error
        } else {
            match args.log_level.to_lowercase().as_str() {
                "trace" => log::LevelFilter::Trace,
                "debug" => log::LevelFilter::Debug,
                "info" => log::LevelFilter::Info,
                "warn" => log::LevelFilter::Warn,
                "error" => log::LevelFilter::Error,
                "off" => log::LevelFilter::Off,
                _ => log::LevelFilter::Info,
            }
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn handle_locate(&self, args: LocateArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let source = read_source(&args.file)?;
        let span = locate(&source, &args.file, args.line)?;

        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&span)?);
            return Ok(());
        }

        if !self.quiet {
            println!(
                "{}",
                format!(
                    "Struct at lines {}-{} (body {}-{})",
                    span.start_line + 1,
                    span.end_line + 1,
                    span.body_open_line + 1,
                    span.body_close_line + 1
                )
                .cyan()
            );
        }
        println!("{}", span.text);
        Ok(())
    }

    fn handle_layout(&self, args: LayoutArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let source = read_source(&args.file)?;
        let span = locate(&source, &args.file, args.line)?;
        let layout = self.compute_layout(&source, &span, args.pack, with_source(&args.file, args.search))?;

        println!("{}", SerializableLayout::from(&layout).to_json_pretty()?);
        Ok(())
    }

    fn handle_render(&self, args: RenderArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let text = fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        let layout = SerializableLayout::from_json(&text)?.into_layout()?;
        log::info!(
            "Loaded layout {} with {} fields",
            layout.name().unwrap_or("<anonymous>"),
            layout.fields().len()
        );

        let model = self.render(&layout, args.scale, args.policy, args.no_tail_padding)?;
        self.print_model(&model)
    }

    fn handle_visualize(&self, args: VisualizeArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let source = read_source(&args.file)?;
        let span = locate(&source, &args.file, args.line)?;
        let layout = self.compute_layout(&source, &span, args.pack, with_source(&args.file, args.search))?;

        let model = self.render(&layout, args.scale, args.policy, args.no_tail_padding)?;
        self.print_model(&model)
    }

    /// Lays out the struct in `span`. Unknown member types are looked up in
    /// `search` files and the layout retried.
    fn compute_layout(
        &self,
        source: &str,
        span: &SourceSpan,
        pack: Option<usize>,
        search: Vec<PathBuf>,
    ) -> anyhow::Result<StructLayout> {
        let parser = DeclarationParser::new();
        let declaration = parser.parse_leading(&span.text).with_context(|| {
            format!(
                "Struct at line {} could not be parsed (nested struct bodies are not supported)",
                span.start_line + 1
            )
        })?;
        let pack = pack
            .or(self.config.display.pack_value)
            .or_else(|| parser.pragma_pack(source));

        let mut engine = LayoutEngine::new(self.config.type_table.clone()).with_declarations(parser.parse(source));
        let resolver = TypeResolver::new(SourceFilesProvider::new(search)).with_filter(self.config.path_filter()?);

        for _ in 0..MAX_RESOLVE_ATTEMPTS {
            match engine.compute_declaration(&declaration, pack) {
                Ok(layout) => return Ok(layout),
                Err(StructureError::UnknownType(type_name)) => {
                    let Some(text) = resolver.resolve_text(&type_name) else {
                        anyhow::bail!(
                            "Unknown type '{}': add it to the config types or pass a file defining it with --search",
                            type_name
                        );
                    };
                    let found = parser.parse(&text);
                    if !found.iter().any(|d| d.name == type_name) {
                        anyhow::bail!("Definition of '{}' could not be parsed", type_name);
                    }
                    log::info!("Resolved type {}", type_name);
                    for decl in found {
                        engine.add_declaration(decl);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        anyhow::bail!("Gave up after resolving {} types for {}", MAX_RESOLVE_ATTEMPTS, declaration.name)
    }

    fn render(
        &self,
        layout: &StructLayout,
        scale: Option<f64>,
        policy: Option<LabelPolicy>,
        no_tail_padding: bool,
    ) -> anyhow::Result<GridModel> {
        let display = &self.config.display;
        let renderer = GridRenderer::new()
            .with_label_policy(policy.unwrap_or(display.label_policy))
            .with_tail_padding(display.tail_padding && !no_tail_padding);
        Ok(renderer.render(layout, scale.unwrap_or(display.byte_width))?)
    }

    fn print_model(&self, model: &GridModel) -> anyhow::Result<()> {
        if self.json_output {
            println!("{}", GridJsonSerializer::new().serialize(model)?);
        } else {
            print!("{}", TextGrid::new().render(model));
            if model.stats.low_efficiency && !self.quiet {
                log::warn!(
                    "Only {:.1}% of {} bytes hold data",
                    model.stats.efficiency_percent,
                    model.stats.total_size
                );
            }
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// `line` is one-based here.
fn locate(source: &str, path: &Path, line: usize) -> anyhow::Result<SourceSpan> {
    StructLocator::new()
        .locate(source, line - 1)
        .ok_or_else(|| anyhow::anyhow!("No struct body encloses {}:{}", path.display(), line))
}

/// The file being visualized is always searched first.
fn with_source(file: &Path, mut search: Vec<PathBuf>) -> Vec<PathBuf> {
    search.retain(|p| p != file);
    search.insert(0, file.to_path_buf());
    search
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_layout_with_pragma_pack() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "a.h",
            "#pragma pack(1)\nstruct S {\n  char c;\n  int i;\n};\n",
        );
        let source = read_source(&path).unwrap();
        let span = locate(&source, &path, 3).unwrap();

        let layout = CommandHandler::new()
            .compute_layout(&source, &span, None, with_source(&path, Vec::new()))
            .unwrap();
        assert_eq!(layout.name(), Some("S"));
        assert_eq!(layout.pack_value(), Some(1));
        assert_eq!(layout.total_size(), 5);
    }

    #[test]
    fn test_unknown_type_resolved_from_search_files() {
        let dir = tempfile::tempdir().unwrap();
        let main = write_file(dir.path(), "main.h", "struct Outer {\n  char tag;\n  Inner in;\n};\n");
        let other = write_file(dir.path(), "inner.h", "typedef struct {\n  double d;\n} Inner;\n");
        let source = read_source(&main).unwrap();
        let span = locate(&source, &main, 2).unwrap();
        let handler = CommandHandler::new();

        let err = handler
            .compute_layout(&source, &span, None, with_source(&main, Vec::new()))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown type 'Inner'"));

        let layout = handler
            .compute_layout(&source, &span, None, with_source(&main, vec![other]))
            .unwrap();
        assert_eq!(layout.total_size(), 16);
        assert_eq!(layout.get_field("in").unwrap().offset(), 8);
    }

    #[test]
    fn test_nested_body_is_not_replaced_by_inner_struct() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "a.h",
            "struct Outer {\n  struct Inner {\n    int x;\n  } inner;\n  char tag;\n};\n",
        );
        let source = read_source(&path).unwrap();
        let span = locate(&source, &path, 5).unwrap();
        assert_eq!(span.start_line, 0);

        let err = CommandHandler::new()
            .compute_layout(&source, &span, None, with_source(&path, Vec::new()))
            .unwrap_err();
        assert!(err.to_string().contains("line 1 could not be parsed"));
        assert!(matches!(
            err.downcast_ref::<StructureError>(),
            Some(StructureError::NoStructFound)
        ));
    }

    #[test]
    fn test_locate_outside_struct() {
        let err = locate("int x;\nstruct S {\n  int a;\n};", Path::new("a.h"), 1).unwrap_err();
        assert!(err.to_string().contains("a.h:1"));
    }

    #[test]
    fn test_render_uses_config_defaults() {
        let handler = CommandHandler::with_config(Config::new().with_byte_width(20.0).with_label_policy(LabelPolicy::Fixed));
        let layout = crate::structure::StructureBuilder::new(8, 4).scalar("a", 0, 1).build();

        let model = handler.render(&layout, None, None, false).unwrap();
        assert_eq!(model.visual_scale, 20.0);
        assert_eq!(model.label_policy, LabelPolicy::Fixed);
        assert_eq!(model.rows[1].segments.len(), 1);

        let bare = handler.render(&layout, Some(5.0), None, true).unwrap();
        assert!(bare.rows[1].segments.is_empty());
    }

    #[test]
    fn test_search_list_starts_with_source() {
        let list = with_source(Path::new("a.h"), vec![PathBuf::from("b.h"), PathBuf::from("a.h")]);
        assert_eq!(list, vec![PathBuf::from("a.h"), PathBuf::from("b.h")]);
    }
}
