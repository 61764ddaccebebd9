use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::project::ProjectInputData;

/// AST dialect an analyzer requests for its traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AstDialect {
    #[default]
    Ecmascript,
    Typescript,
    Tsx,
}

impl AstDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            AstDialect::Ecmascript => "ecmascript",
            AstDialect::Typescript => "typescript",
            AstDialect::Tsx => "tsx",
        }
    }

    fn language(self) -> Language {
        match self {
            AstDialect::Ecmascript => tree_sitter_javascript::language(),
            AstDialect::Typescript => tree_sitter_typescript::language_typescript(),
            AstDialect::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// Parsed syntax tree for one file.
pub struct FileAst {
    tree: Tree,
}

impl FileAst {
    pub fn root(&self) -> TSNode<'_> {
        self.tree.root_node()
    }
}

/// A gathered file annotated with its parsed AST.
pub struct ProjectFileWithAst {
    pub relative_path: PathBuf,
    pub source: String,
    pub ast: FileAst,
}

/// Project input data after AST annotation; file order is preserved.
pub struct ProjectInputDataWithAst {
    pub root: PathBuf,
    pub files: Vec<ProjectFileWithAst>,
}

/// Annotates project input data with parsed ASTs of a requested dialect.
pub trait AstProvider {
    fn add_ast_to(
        &self,
        data: ProjectInputData,
        dialect: AstDialect,
    ) -> Result<ProjectInputDataWithAst>;
}

/// Tree-sitter backed AST provider for the JavaScript/TypeScript grammars.
pub struct TreeSitterAstProvider;

impl TreeSitterAstProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeSitterAstProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AstProvider for TreeSitterAstProvider {
    fn add_ast_to(
        &self,
        data: ProjectInputData,
        dialect: AstDialect,
    ) -> Result<ProjectInputDataWithAst> {
        let mut parser = Parser::new();
        parser.set_language(dialect.language())?;

        let mut files = Vec::with_capacity(data.files.len());
        for file in data.files {
            let tree = parser.parse(&file.source, None).ok_or_else(|| {
                anyhow!(
                    "failed to parse {} as {}",
                    file.relative_path.display(),
                    dialect.as_str()
                )
            })?;
            files.push(ProjectFileWithAst {
                relative_path: file.relative_path,
                source: file.source,
                ast: FileAst { tree },
            });
        }

        Ok(ProjectInputDataWithAst {
            root: data.root,
            files,
        })
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a str) -> &'a str {
    std::str::from_utf8(&source.as_bytes()[node.byte_range()]).unwrap_or("")
}

pub fn find_child_by_kind<'a>(node: &'a TSNode, kind: &str) -> Option<TSNode<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

pub fn find_children_by_kind<'a>(node: &'a TSNode<'a>, kind: &str) -> Vec<TSNode<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == kind)
        .collect()
}
