// Thu Jan 22 2026 - Alex

use crate::locator::StructLocator;
use crate::resolve::ResolveError;
use crate::structure::DeclarationParser;
use std::fs;
use std::path::PathBuf;

/// Where a type is defined and the text of that definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionLocation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

/// Source of candidate definitions for a type name.
pub trait DefinitionProvider {
    fn definitions(&self, type_name: &str) -> Result<Vec<DefinitionLocation>, ResolveError>;
}

/// Looks for struct definitions in a fixed list of source files.
#[derive(Debug, Clone, Default)]
pub struct SourceFilesProvider {
    files: Vec<PathBuf>,
    locator: StructLocator,
    parser: DeclarationParser,
}

impl SourceFilesProvider {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            locator: StructLocator::new(),
            parser: DeclarationParser::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl DefinitionProvider for SourceFilesProvider {
    fn definitions(&self, type_name: &str) -> Result<Vec<DefinitionLocation>, ResolveError> {
        let mut found = Vec::new();

        for path in &self.files {
            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            for span in self.locator.candidates(&source) {
                if self.parser.parse(&span.text).iter().any(|d| d.name == type_name) {
                    found.push(DefinitionLocation {
                        path: path.clone(),
                        line: span.start_line,
                        text: span.text,
                    });
                }
            }
        }

        log::debug!("Found {} definitions of {}", found.len(), type_name);
        Ok(found)
    }
}
