// Thu Jan 22 2026 - Alex

pub mod error;
pub mod glob;
pub mod provider;

pub use error::ResolveError;
pub use glob::{ExcludePattern, PathFilter};
pub use provider::{DefinitionLocation, DefinitionProvider, SourceFilesProvider};

use itertools::Itertools;

/// Turns a type name into definition text, skipping excluded paths.
pub struct TypeResolver<P> {
    provider: P,
    filter: PathFilter,
}

impl<P: DefinitionProvider> TypeResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            filter: PathFilter::new(),
        }
    }

    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the first surviving definition. Lookup failures are logged and yield `None`.
    pub fn resolve(&self, type_name: &str) -> Option<DefinitionLocation> {
        let candidates = match self.provider.definitions(type_name) {
            Ok(candidates) => candidates,
            Err(e) => {
                log::error!("Failed to resolve type '{}': {}", type_name, e);
                return None;
            }
        };

        let valid: Vec<DefinitionLocation> = candidates
            .into_iter()
            .filter(|loc| !self.filter.is_excluded(&loc.path))
            .collect();

        if valid.len() > 1 {
            log::warn!(
                "Type '{}' resolved to {} files: {}",
                type_name,
                valid.len(),
                valid.iter().map(|loc| loc.path.display()).join(", ")
            );
        }

        valid.into_iter().next()
    }

    pub fn resolve_text(&self, type_name: &str) -> Option<String> {
        self.resolve(type_name).map(|loc| loc.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FixedProvider(Vec<(&'static str, &'static str)>);

    impl DefinitionProvider for FixedProvider {
        fn definitions(&self, _type_name: &str) -> Result<Vec<DefinitionLocation>, ResolveError> {
            Ok(self
                .0
                .iter()
                .map(|(path, text)| DefinitionLocation {
                    path: PathBuf::from(path),
                    line: 0,
                    text: text.to_string(),
                })
                .collect())
        }
    }

    struct FailingProvider;

    impl DefinitionProvider for FailingProvider {
        fn definitions(&self, _type_name: &str) -> Result<Vec<DefinitionLocation>, ResolveError> {
            Err(ResolveError::Provider("server unavailable".to_string()))
        }
    }

    #[test]
    fn test_first_candidate_wins() {
        let resolver = TypeResolver::new(FixedProvider(vec![
            ("/src/a.h", "struct T { int a; };"),
            ("/src/b.h", "struct T { char b; };"),
        ]));
        assert_eq!(resolver.resolve_text("T").as_deref(), Some("struct T { int a; };"));
    }

    #[test]
    fn test_excluded_paths_are_skipped() {
        let filter = PathFilter::from_patterns(&["**/backup/**"]).unwrap();
        let resolver = TypeResolver::new(FixedProvider(vec![
            ("/src/backup/a.h", "struct T { int old; };"),
            ("/src/b.h", "struct T { int current; };"),
        ]))
        .with_filter(filter);
        let loc = resolver.resolve("T").unwrap();
        assert_eq!(loc.path, PathBuf::from("/src/b.h"));
    }

    #[test]
    fn test_everything_excluded() {
        let filter = PathFilter::from_patterns(&["**"]).unwrap();
        let resolver = TypeResolver::new(FixedProvider(vec![("/src/a.h", "struct T { int a; };")])).with_filter(filter);
        assert!(resolver.resolve("T").is_none());
    }

    #[test]
    fn test_no_candidates_or_failure() {
        assert!(TypeResolver::new(FixedProvider(Vec::new())).resolve("T").is_none());
        assert!(TypeResolver::new(FailingProvider).resolve("T").is_none());
    }
}
