//! A small in-crate engine used by the test suite.
//!
//! It understands just enough TypeScript to produce believable declaration
//! output from line-oriented fixtures:
//!
//! - `export class` / `export interface` bodies become property signatures
//! - `export const` / `export function` become `declare` statements
//! - `import` and `export type` lines pass through
//!
//! Two markers drive the error paths: `// @type-error` yields a semantic
//! error (so emit is skipped under `noEmitOnError`) and `// @emit-error`
//! yields an error diagnostic from emit itself.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashSet;
use serde_json::{Value, json};

use super::{
    Block, CompilerHost, CreateProgramOptions, DeclarationFile, EmitOutput, EmitRequest,
    ExitStatus, Node, Program, PropertyName, PropertySignature, SolutionBuildOptions, SourceFile,
    TypeEngine,
};
use crate::diagnostic::Diagnostic;
use crate::file::{FileSystem, parent_dir};
use crate::tsconfig::{CompilerOptions, ParsedConfig, ProjectReference, TsConfigJson};

const TYPE_ERROR_MARKER: &str = "// @type-error";
const EMIT_ERROR_MARKER: &str = "// @emit-error";

/// Test engine counting the programs it builds.
#[derive(Debug, Default)]
pub(crate) struct MockEngine {
    constructions: AtomicUsize,
    solution_projects: AtomicUsize,
}

impl MockEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of `create_program` calls so far.
    pub(crate) fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// Number of projects compiled by solution builds so far.
    pub(crate) fn solution_projects(&self) -> usize {
        self.solution_projects.load(Ordering::SeqCst)
    }

    fn build_project(
        &self,
        host: &dyn FileSystem,
        config_path: &Path,
        options: SolutionBuildOptions,
        on_project: &mut dyn FnMut(&Path),
        stack: &mut Vec<PathBuf>,
    ) -> ExitStatus {
        if stack.iter().any(|p| p == config_path) {
            return ExitStatus::ProjectReferenceCycleOutputsSkipped;
        }
        let Ok(parsed) = self.parse_config_file(config_path, host) else {
            return ExitStatus::InvalidProjectOutputsSkipped;
        };

        stack.push(config_path.to_path_buf());
        let mut status = ExitStatus::Success;
        for reference in &parsed.project_references {
            let result = self.build_project(host, &reference.path, options, on_project, stack);
            if !result.is_success() {
                status = result;
            }
        }
        stack.pop();

        let build_info = build_info_path(config_path);
        if !options.force && host.file_exists(&build_info) {
            if options.verbose {
                host.write(&format!("Project '{}' is up to date", config_path.display()));
            }
            return status;
        }
        if options.verbose {
            host.write(&format!("Building project '{}'...", config_path.display()));
        }

        self.solution_projects.fetch_add(1, Ordering::SeqCst);
        on_project(config_path);

        let info = json!({
            "version": self.version(),
            "root": parsed.file_names,
        });
        if host.write_file(&build_info, &info.to_string()).is_err() {
            return ExitStatus::DiagnosticsPresentOutputsSkipped;
        }
        status
    }
}

/// `dir/tsconfig.app.json` → `dir/tsconfig.app.tsbuildinfo`
pub(crate) fn build_info_path(config_path: &Path) -> PathBuf {
    let stem = config_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tsconfig");
    parent_dir(config_path).join(format!("{stem}.tsbuildinfo"))
}

impl TypeEngine for MockEngine {
    fn version(&self) -> &str {
        "0.0.0-mock"
    }

    fn parse_config_content(
        &self,
        raw: &Value,
        host: &dyn FileSystem,
        base_dir: &Path,
    ) -> ParsedConfig {
        let config = match TsConfigJson::from_value(raw) {
            Ok(config) => config,
            Err(e) => {
                return ParsedConfig {
                    raw: raw.clone(),
                    errors: vec![Diagnostic::error(5024, e.to_string())],
                    ..ParsedConfig::default()
                };
            }
        };

        let file_names = config
            .files
            .unwrap_or_default()
            .iter()
            .map(|f| host.resolve_path(&base_dir.join(f)))
            .collect();

        let project_references = config
            .references
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                let path = host.resolve_path(&base_dir.join(&r.path));
                let path = if path.extension().is_some_and(|e| e == "json") {
                    path
                } else {
                    path.join("tsconfig.json")
                };
                ProjectReference {
                    path,
                    prepend: r.prepend,
                }
            })
            .collect();

        ParsedConfig {
            options: config.compiler_options.unwrap_or_default(),
            file_names,
            project_references,
            raw: raw.clone(),
            errors: Vec::new(),
        }
    }

    fn parse_config_file(
        &self,
        path: &Path,
        host: &dyn FileSystem,
    ) -> Result<ParsedConfig, Vec<Diagnostic>> {
        let Some(text) = host.read_file(path) else {
            return Err(vec![Diagnostic::error(
                5083,
                format!("Cannot read file '{}'.", path.display()),
            )]);
        };
        let raw: Value = serde_json::from_str(&text).map_err(|e| {
            vec![
                Diagnostic::error(1005, e.to_string())
                    .with_file(path)
                    .at(e.line().saturating_sub(1), e.column().saturating_sub(1)),
            ]
        })?;
        Ok(self.parse_config_content(&raw, host, &parent_dir(path)))
    }

    fn create_program(&self, options: CreateProgramOptions) -> Arc<dyn Program> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockProgram::load(options))
    }

    fn build_solution(
        &self,
        host: &dyn FileSystem,
        roots: &[PathBuf],
        options: SolutionBuildOptions,
        on_project: &mut dyn FnMut(&Path),
    ) -> ExitStatus {
        let mut status = ExitStatus::Success;
        for root in roots {
            let result = self.build_project(host, root, options, on_project, &mut Vec::new());
            if !result.is_success() {
                status = result;
            }
        }
        status
    }
}

// =============================================================================
// Program
// =============================================================================

#[derive(Debug)]
pub(crate) struct MockProgram {
    root_names: Vec<PathBuf>,
    files: Vec<Arc<SourceFile>>,
    options: CompilerOptions,
}

fn is_typescript(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e, "ts" | "tsx" | "mts" | "cts"))
}

fn imported_specifiers(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter_map(|line| {
        let (_, rest) = line.split_once(" from ")?;
        let rest = rest.trim().trim_end_matches(';');
        rest.strip_prefix('\'')
            .and_then(|r| r.strip_suffix('\''))
            .or_else(|| rest.strip_prefix('"').and_then(|r| r.strip_suffix('"')))
    })
}

fn resolve_import(host: &CompilerHost, from: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with('.') {
        return None;
    }
    let base = host.resolve_path(&parent_dir(from).join(specifier));
    let base = base.to_string_lossy();
    [
        base.to_string(),
        format!("{base}.ts"),
        format!("{base}.tsx"),
        format!("{base}.d.ts"),
        format!("{base}/index.ts"),
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|candidate| is_typescript(candidate) && host.file_exists(candidate))
}

impl MockProgram {
    fn load(options: CreateProgramOptions) -> Self {
        let CreateProgramOptions {
            root_names,
            options,
            host,
            ..
        } = options;

        let mut seen = FxHashSet::default();
        let mut queue: VecDeque<PathBuf> = root_names.iter().cloned().collect();
        let mut files = Vec::new();

        while let Some(path) = queue.pop_front() {
            if !seen.insert(path.clone()) || !is_typescript(&path) {
                continue;
            }
            let Some(text) = host.read_file(&path) else {
                continue;
            };
            for specifier in imported_specifiers(&text) {
                if let Some(dep) = resolve_import(&host, &path, specifier) {
                    queue.push_back(dep);
                }
            }
            files.push(Arc::new(SourceFile::new(path, text)));
        }

        Self {
            root_names,
            files,
            options,
        }
    }

    fn semantic_errors(file: &SourceFile) -> impl Iterator<Item = Diagnostic> + '_ {
        file.full_text()
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains(TYPE_ERROR_MARKER))
            .map(|(i, line)| {
                let column = line.len() - line.trim_start().len();
                Diagnostic::error(2322, "Type 'string' is not assignable to type 'number'.")
                    .with_file(file.file_name())
                    .at(i, column)
            })
    }
}

fn declaration_path(path: &Path) -> PathBuf {
    let name = path.to_string_lossy();
    for (ext, dts) in [(".tsx", ".d.ts"), (".mts", ".d.mts"), (".cts", ".d.cts"), (".ts", ".d.ts")] {
        if let Some(stem) = name.strip_suffix(ext) {
            return PathBuf::from(format!("{stem}{dts}"));
        }
    }
    PathBuf::from(format!("{name}.d.ts"))
}

impl Program for MockProgram {
    fn root_file_names(&self) -> &[PathBuf] {
        &self.root_names
    }

    fn source_files(&self) -> &[Arc<SourceFile>] {
        &self.files
    }

    fn source_file(&self, path: &Path) -> Option<Arc<SourceFile>> {
        self.files.iter().find(|f| f.file_name() == path).cloned()
    }

    fn emit(&self, request: EmitRequest<'_>, write: &mut dyn FnMut(&Path, &str)) -> EmitOutput {
        let target = request.target;
        if target.is_declaration_file() {
            return EmitOutput::default();
        }

        if self.options.no_emit_on_error == Some(true)
            && self.files.iter().any(|f| Self::semantic_errors(f).next().is_some())
        {
            return EmitOutput {
                emit_skipped: true,
                diagnostics: Vec::new(),
            };
        }

        if let Some(line) = target
            .full_text()
            .lines()
            .position(|l| l.contains(EMIT_ERROR_MARKER))
        {
            return EmitOutput {
                emit_skipped: false,
                diagnostics: vec![
                    Diagnostic::error(
                        9010,
                        "Variable must have an explicit type annotation with --isolatedDeclarations.",
                    )
                    .with_file(target.file_name())
                    .at(line, 0),
                ],
            };
        }

        let out = declaration_path(target.file_name());
        let mut declarations = DeclarationFile::new(&out, lower(target.full_text()));
        request.transformers.apply_after_declarations(&mut declarations);
        write(&out, &declarations.print());

        if self.options.declaration_map == Some(true) {
            let file = out.file_name().map(|n| n.to_string_lossy().into_owned());
            let source = target.file_name().file_name().map(|n| n.to_string_lossy().into_owned());
            let map = json!({
                "version": 3,
                "file": file,
                "sourceRoot": "",
                "sources": [source],
                "names": [],
                "mappings": "AAAA",
            });
            write(&PathBuf::from(format!("{}.map", out.display())), &map.to_string());
        }

        EmitOutput::default()
    }

    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic> {
        self.files
            .iter()
            .flat_map(|f| Self::semantic_errors(f))
            .collect()
    }
}

// =============================================================================
// Declaration lowering
// =============================================================================

fn brace_delta(line: &str) -> isize {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn infer_type(init: &str) -> &'static str {
    let init = init.trim();
    if init == "true" || init == "false" {
        "boolean"
    } else if init.starts_with(['"', '\'', '`']) {
        "string"
    } else if init.parse::<f64>().is_ok() {
        "number"
    } else {
        "any"
    }
}

fn parse_property_name(raw: &str) -> PropertyName {
    if raw.starts_with('#') {
        PropertyName::PrivateIdentifier(raw.to_string())
    } else if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
    {
        PropertyName::StringLiteral(inner.to_string())
    } else if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        PropertyName::Computed(inner.to_string())
    } else if raw.parse::<f64>().is_ok() {
        PropertyName::NumericLiteral(raw.to_string())
    } else {
        PropertyName::Identifier(raw.to_string())
    }
}

fn parse_member(line: &str) -> Option<PropertySignature> {
    let line = line.trim().trim_end_matches(';');
    let (decl, init) = match line.split_once(" = ") {
        Some((decl, init)) => (decl.trim(), Some(init)),
        None => (line, None),
    };
    if decl.is_empty() || decl.starts_with("//") || decl.contains(['(', ')', '{', '}']) {
        return None;
    }

    let (head, type_annotation) = match decl.split_once(':') {
        Some((head, ty)) => (head.trim(), Some(ty.trim().to_string())),
        None => (decl, init.map(|i| infer_type(i).to_string())),
    };
    let mut words: Vec<&str> = head.split_whitespace().collect();
    let raw_name = words.pop()?;
    let (raw_name, question_token) = match raw_name.strip_suffix('?') {
        Some(name) => (name, true),
        None => (raw_name, false),
    };

    Some(PropertySignature {
        modifiers: words
            .into_iter()
            .filter(|w| *w != "public")
            .map(str::to_string)
            .collect(),
        name: parse_property_name(raw_name),
        question_token,
        type_annotation,
    })
}

/// Collect the body of a block whose opening line was just consumed.
fn lower_members<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Vec<Node> {
    let mut members = Vec::new();
    let mut depth = 1;
    for line in lines {
        if depth == 1
            && let Some(member) = parse_member(line)
        {
            members.push(Node::PropertySignature(member));
        }
        depth += brace_delta(line);
        if depth <= 0 {
            break;
        }
    }
    members
}

fn skip_body<'a>(lines: &mut impl Iterator<Item = &'a str>, mut depth: isize) {
    while depth > 0 {
        let Some(line) = lines.next() else { return };
        depth += brace_delta(line);
    }
}

fn lower(text: &str) -> Vec<Node> {
    let mut statements = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("export class ") {
            let header = format!("export declare class {rest}");
            let members = lower_members(&mut lines);
            statements.push(Node::Block(Block {
                header,
                members,
                footer: "}".into(),
            }));
        } else if trimmed.starts_with("export interface ") {
            let header = trimmed.to_string();
            let members = lower_members(&mut lines);
            statements.push(Node::Block(Block {
                header,
                members,
                footer: "}".into(),
            }));
        } else if let Some(rest) = trimmed.strip_prefix("export function ") {
            let signature = rest.split('{').next().unwrap_or(rest).trim();
            statements.push(Node::Text(format!("export declare function {signature};")));
            skip_body(&mut lines, brace_delta(trimmed));
        } else if let Some(rest) = trimmed.strip_prefix("export const ") {
            let rest = rest.trim_end_matches(';');
            let text = match rest.split_once(" = ") {
                Some((decl, _)) if decl.contains(':') => format!("export declare const {decl};"),
                Some((decl, init)) if infer_type(init) != "any" => {
                    format!("export declare const {decl} = {};", init.trim())
                }
                Some((decl, _)) => format!("export declare const {decl}: any;"),
                None => format!("export declare const {rest};"),
            };
            statements.push(Node::Text(text));
        } else if trimmed.starts_with("import ")
            || trimmed.starts_with("export type ")
            || trimmed.starts_with("export {")
            || trimmed.starts_with("export * ")
        {
            statements.push(Node::Text(trimmed.to_string()));
        }
    }

    let exports_something = statements.iter().any(|s| match s {
        Node::Text(text) => text.starts_with("export"),
        Node::Block(_) => true,
        Node::PropertySignature(_) => false,
    });
    if !exports_something {
        statements.push(Node::Text("export {};".into()));
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_class_and_const() {
        let source = "\
import { B } from './b';
export class A {
    #secret: string = 'x';
    readonly id?: number;
    count = 0;
    method() {
        return 1;
    }
}
export const version = '1.0';
export function add(a: number, b: number): number {
    return a + b;
}
";
        let file = DeclarationFile::new("/p/a.d.ts", lower(source));
        assert_eq!(
            file.print(),
            "import { B } from './b';\n\
             export declare class A {\n\
             \x20   #secret: string;\n\
             \x20   readonly id?: number;\n\
             \x20   count: number;\n\
             }\n\
             export declare const version = '1.0';\n\
             export declare function add(a: number, b: number): number;\n"
        );
    }

    #[test]
    fn test_lower_empty_module() {
        let file = DeclarationFile::new("/p/a.d.ts", lower("const local = 1;\n"));
        assert_eq!(file.print(), "export {};\n");
    }

    #[test]
    fn test_build_info_path() {
        assert_eq!(
            build_info_path(Path::new("/p/tsconfig.app.json")),
            PathBuf::from("/p/tsconfig.app.tsbuildinfo")
        );
    }

    #[test]
    fn test_declaration_path() {
        assert_eq!(declaration_path(Path::new("/p/a.tsx")), PathBuf::from("/p/a.d.ts"));
        assert_eq!(declaration_path(Path::new("/p/a.mts")), PathBuf::from("/p/a.d.mts"));
    }
}
