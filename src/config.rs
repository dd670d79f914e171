use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::catalog::PluralConflictPolicy;
use crate::core::content::ContentOverrides;
use crate::core::extract::{
    ArgumentMapping, CallExpressionExtractor, CallExpressionOptions, CommentOptions,
    ElementAttributeExtractor, ElementAttributes, ElementContentExtractor, ElementOptions,
    EmbeddedJsExtractor, Extractor, HtmlExtractor,
};
use crate::core::pot::Headers;
use crate::core::validate::ValidationResult;

pub const CONFIG_FILE_NAME: &str = ".potgenrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Directories (or directory globs) to scan, relative to the source root.
    /// Empty means the whole source root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Catalog path relative to the source root; `-` writes to stdout.
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default = "default_line_number_start")]
    pub line_number_start: usize,
    #[serde(default)]
    pub plural_conflicts: PluralConflictPolicy,
    #[serde(default = "default_extractors")]
    pub extractors: ExtractorsConfig,
}

/// Extractor definitions, one list per adapter kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractorsConfig {
    #[serde(default)]
    pub calls: Vec<CallDefinition>,
    #[serde(default)]
    pub jsx_attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub jsx_content: Vec<ContentDefinition>,
    #[serde(default)]
    pub html_attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub html_content: Vec<ContentDefinition>,
    /// Template elements whose text is run through the `calls` and `jsx*` extractors.
    #[serde(default)]
    pub html_embedded_js: Vec<EmbeddedJsDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CallDefinition {
    pub callee_names: Vec<String>,
    pub arguments: ArgumentMapping,
    #[serde(default)]
    pub comments: CommentOptions,
    #[serde(default)]
    pub content: ContentOverrides,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributeDefinition {
    pub selector: String,
    pub text_attribute: String,
    #[serde(default)]
    pub attributes: ElementAttributes,
    #[serde(default)]
    pub content: ContentOverrides,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentDefinition {
    pub selector: String,
    #[serde(default)]
    pub attributes: ElementAttributes,
    #[serde(default)]
    pub content: ContentOverrides,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmbeddedJsDefinition {
    pub selector: String,
}

/// Extractors built from [`ExtractorsConfig`], per parser.
#[derive(Debug, Default)]
pub struct BuiltExtractors {
    pub js: Vec<Extractor>,
    pub html: Vec<HtmlExtractor>,
}

impl AttributeDefinition {
    fn build(&self) -> ValidationResult<ElementAttributeExtractor> {
        let options = ElementOptions {
            attributes: self.attributes.clone(),
            content: self.content.clone(),
        };
        ElementAttributeExtractor::new(&self.selector, &self.text_attribute, options)
    }
}

impl ContentDefinition {
    fn build(&self) -> ValidationResult<ElementContentExtractor> {
        let options = ElementOptions {
            attributes: self.attributes.clone(),
            content: self.content.clone(),
        };
        ElementContentExtractor::new(&self.selector, options)
    }
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**"].map(String::from).to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_output() -> String {
    "messages.pot".to_string()
}

fn default_line_number_start() -> usize {
    1
}

fn default_extractors() -> ExtractorsConfig {
    let call = |name: &str, arguments: ArgumentMapping| CallDefinition {
        callee_names: vec![name.to_string()],
        arguments,
        comments: CommentOptions {
            other_line_leading: true,
            ..Default::default()
        },
        content: ContentOverrides::default(),
    };

    ExtractorsConfig {
        calls: vec![
            call("gettext", ArgumentMapping::text(0)),
            call("ngettext", ArgumentMapping::text(0).with_plural(1)),
            call("pgettext", ArgumentMapping::text(1).with_context(0)),
            call(
                "npgettext",
                ArgumentMapping::text(1).with_plural(2).with_context(0),
            ),
        ],
        ..Default::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            output: default_output(),
            headers: Headers::default(),
            line_number_start: default_line_number_start(),
            plural_conflicts: PluralConflictPolicy::default(),
            extractors: default_extractors(),
        }
    }
}

impl Config {
    /// Validate configuration values before any file is parsed.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal paths, so `app/[locale]` stays valid.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.output.trim().is_empty() {
            anyhow::bail!("'output' must be a non-empty path or '-'");
        }

        self.headers.validate().context("Invalid 'headers'")?;
        self.build_extractors()?;
        Ok(())
    }

    /// Construct the configured extractors, validating each definition.
    pub fn build_extractors(&self) -> Result<BuiltExtractors> {
        let mut built = BuiltExtractors::default();
        let definitions = &self.extractors;

        for (i, call) in definitions.calls.iter().enumerate() {
            let options = CallExpressionOptions {
                arguments: call.arguments,
                comments: call.comments.clone(),
                content: call.content.clone(),
            };
            let extractor = CallExpressionExtractor::new(call.callee_names.iter().cloned(), options)
                .with_context(|| format!("Invalid extractor 'extractors.calls[{i}]'"))?;
            built.js.push(extractor.into());
        }

        for (i, jsx) in definitions.jsx_attributes.iter().enumerate() {
            let extractor = jsx
                .build()
                .with_context(|| format!("Invalid extractor 'extractors.jsxAttributes[{i}]'"))?;
            built.js.push(extractor.into());
        }

        for (i, jsx) in definitions.jsx_content.iter().enumerate() {
            let extractor = jsx
                .build()
                .with_context(|| format!("Invalid extractor 'extractors.jsxContent[{i}]'"))?;
            built.js.push(extractor.into());
        }

        for (i, html) in definitions.html_attributes.iter().enumerate() {
            let extractor = html
                .build()
                .with_context(|| format!("Invalid extractor 'extractors.htmlAttributes[{i}]'"))?;
            built.html.push(extractor.into());
        }

        for (i, html) in definitions.html_content.iter().enumerate() {
            let extractor = html
                .build()
                .with_context(|| format!("Invalid extractor 'extractors.htmlContent[{i}]'"))?;
            built.html.push(extractor.into());
        }

        for (i, embedded) in definitions.html_embedded_js.iter().enumerate() {
            let extractor = EmbeddedJsExtractor::new(&embedded.selector, built.js.clone())
                .with_context(|| format!("Invalid extractor 'extractors.htmlEmbeddedJs[{i}]'"))?;
            built.html.push(extractor.into());
        }

        Ok(built)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config was read from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
