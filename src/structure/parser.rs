// Tue Jan 20 2026 - Alex

use crate::structure::{FieldKind, StructureError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").expect("line comment pattern"));
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static TYPEDEF_STRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"typedef\s+struct(?:\s+\w+)?\s*\{([^{}]*)\}\s*(\w+)[^;{}]*;").expect("typedef struct pattern")
});
static NAMED_STRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"struct\s+(\w+)\s*\{([^{}]*)\}[^;{}]*;").expect("named struct pattern")
});
static PRAGMA_PACK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#pragma\s+pack\s*\(\s*(?:push\s*,\s*)?(\d+)\s*\)").expect("pragma pack pattern")
});
static BIT_WIDTH: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*(\d+)\s*$").expect("bit width pattern"));
static ARRAY_DIM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("array dimension pattern"));
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("identifier pattern"));

const IGNORED_QUALIFIERS: &[&str] = &["const", "volatile", "struct", "register", "mutable"];

/// One member declaration inside a struct body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub is_pointer: bool,
    pub is_function_pointer: bool,
    pub array_len: usize,
    pub bit_width: Option<u32>,
}

impl FieldDecl {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            is_pointer: false,
            is_function_pointer: false,
            array_len: 1,
            bit_width: None,
        }
    }

    pub fn function_pointer(name: &str) -> Self {
        Self {
            is_pointer: true,
            is_function_pointer: true,
            ..Self::new(name, FieldKind::FUNCTION_POINTER_TAG)
        }
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.type_name, if self.is_pointer { "*" } else { "" }, self.name)?;
        if self.array_len != 1 {
            write!(f, "[{}]", self.array_len)?;
        }
        if let Some(bits) = self.bit_width {
            write!(f, " : {}", bits)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

struct Declarator {
    words: Vec<String>,
    is_pointer: bool,
    array_len: usize,
    bit_width: Option<u32>,
}

/// Pulls struct declarations out of C text with regular expressions.
///
/// Handles `struct Name { .. };` and `typedef struct [Tag] { .. } Name;`.
/// Bodies with nested braces are not matched as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationParser;

impl DeclarationParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, code: &str) -> Vec<StructDeclaration> {
        let normalized = Self::normalize(code);

        let mut found: Vec<(usize, String, &str)> = Vec::new();
        for caps in TYPEDEF_STRUCT.captures_iter(&normalized) {
            if let (Some(whole), Some(body), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) {
                found.push((whole.start(), name.as_str().to_string(), body.as_str()));
            }
        }
        for caps in NAMED_STRUCT.captures_iter(&normalized) {
            if let (Some(name), Some(body)) = (caps.get(1), caps.get(2)) {
                found.push((name.start(), name.as_str().to_string(), body.as_str()));
            }
        }
        found.sort_by_key(|(pos, _, _)| *pos);

        let mut declarations: Vec<StructDeclaration> = Vec::new();
        for (_, name, body) in found {
            if declarations.iter().any(|d| d.name == name) {
                continue;
            }
            let fields = self.parse_fields(body);
            log::debug!("Parsed struct {} with {} fields", name, fields.len());
            declarations.push(StructDeclaration { name, fields });
        }
        declarations
    }

    /// Returns the first struct in the text.
    pub fn parse_first(&self, code: &str) -> Result<StructDeclaration, StructureError> {
        self.parse(code).into_iter().next().ok_or(StructureError::NoStructFound)
    }

    /// Parses the struct that opens the text: a match with no brace before
    /// it. A text whose leading struct cannot be matched (for example one
    /// with a nested struct body) is `NoStructFound`, even when a later
    /// struct would parse.
    pub fn parse_leading(&self, code: &str) -> Result<StructDeclaration, StructureError> {
        let normalized = Self::normalize(code);

        let typedef = TYPEDEF_STRUCT
            .captures(&normalized)
            .filter(|caps| caps.get(0).is_some_and(|m| !normalized[..m.start()].contains(&['{', '}'][..])))
            .and_then(|caps| Some((caps.get(2)?.as_str(), caps.get(1)?.as_str())));
        let named = || {
            NAMED_STRUCT
                .captures(&normalized)
                .filter(|caps| caps.get(0).is_some_and(|m| !normalized[..m.start()].contains(&['{', '}'][..])))
                .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        };

        let (name, body) = typedef.or_else(named).ok_or(StructureError::NoStructFound)?;
        Ok(StructDeclaration {
            name: name.to_string(),
            fields: self.parse_fields(body),
        })
    }

    pub fn pragma_pack(&self, code: &str) -> Option<usize> {
        PRAGMA_PACK
            .captures(code)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .filter(|&pack: &usize| pack > 0)
    }

    pub fn parse_fields(&self, body: &str) -> Vec<FieldDecl> {
        let body = WHITESPACE.replace_all(body.trim(), " ");
        body.split(';')
            .map(str::trim)
            .filter(|decl| !decl.is_empty())
            .flat_map(|decl| self.parse_declaration(decl))
            .collect()
    }

    fn normalize(code: &str) -> String {
        let code = LINE_COMMENT.replace_all(code, "");
        let code = BLOCK_COMMENT.replace_all(&code, "");
        WHITESPACE.replace_all(&code, " ").trim().to_string()
    }

    fn parse_declaration(&self, decl: &str) -> Vec<FieldDecl> {
        if decl.contains("(*") {
            return Self::parse_function_pointer(decl).into_iter().collect();
        }

        let mut pieces = decl.split(',');
        let Some(first) = pieces.next().and_then(Self::parse_declarator) else {
            return Vec::new();
        };

        let mut words = first.words;
        let Some(first_name) = words.pop() else {
            return Vec::new();
        };
        let type_name = words
            .into_iter()
            .filter(|w| !IGNORED_QUALIFIERS.contains(&w.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        if type_name.is_empty() {
            log::trace!("Skipping declaration without a type: {}", decl);
            return Vec::new();
        }

        let mut fields = vec![FieldDecl {
            name: first_name,
            type_name: type_name.clone(),
            is_pointer: first.is_pointer,
            is_function_pointer: false,
            array_len: first.array_len,
            bit_width: first.bit_width,
        }];

        for piece in pieces {
            let Some(mut extra) = Self::parse_declarator(piece) else {
                continue;
            };
            let Some(name) = extra.words.pop() else {
                continue;
            };
            fields.push(FieldDecl {
                name,
                type_name: type_name.clone(),
                is_pointer: extra.is_pointer,
                is_function_pointer: false,
                array_len: extra.array_len,
                bit_width: extra.bit_width,
            });
        }

        fields
    }

    fn parse_function_pointer(decl: &str) -> Option<FieldDecl> {
        let start = decl.find("(*")? + 2;
        let end = start + decl[start..].find(')')?;
        let inner = decl[start..end].trim();

        let name_end = inner.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(inner.len());
        let name = &inner[..name_end];
        if !IDENTIFIER.is_match(name) {
            return None;
        }

        let mut field = FieldDecl::function_pointer(name);
        field.array_len = Self::array_len(&inner[name_end..]);
        Some(field)
    }

    fn parse_declarator(piece: &str) -> Option<Declarator> {
        let piece = piece.trim();
        let bit_width = BIT_WIDTH
            .captures(piece)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        let head_end = piece.find(|c: char| c == '[' || c == ':').unwrap_or(piece.len());
        let head = &piece[..head_end];
        let words: Vec<String> = head.replace('*', " ").split_whitespace().map(str::to_string).collect();

        let name = words.last()?;
        if !IDENTIFIER.is_match(name) {
            return None;
        }

        let array_part = match piece.rfind(':') {
            Some(colon) if bit_width.is_some() => &piece[..colon],
            _ => piece,
        };

        Some(Declarator {
            is_pointer: head.contains('*'),
            array_len: Self::array_len(array_part),
            bit_width,
            words,
        })
    }

    /// Product of the numeric dimensions. Saturates at `usize::MAX`, which
    /// the layout engine rejects as too large.
    fn array_len(text: &str) -> usize {
        let dims = ARRAY_DIM
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().trim().parse::<usize>().ok());
        dims.fold(Some(1usize), |acc, dim| acc.and_then(|len| len.checked_mul(dim)))
            .unwrap_or_else(|| {
                log::warn!("Array dimensions in '{}' overflow", text.trim());
                usize::MAX
            })
    }
}
