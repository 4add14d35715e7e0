//! Shareable rule presets
//!
//! A preset is a named rule map plus optional file globs and a processor for
//! non-JS containers (`.vue`, `.svelte`). Presets may extend one parent; the
//! chain is flattened once when the registry is built, so lookups never walk
//! inheritance.

use std::sync::Arc;

use comment_linter::{RuleSetting, RulesConfig, Severity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A fully resolved preset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    pub rules: IndexMap<String, RuleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
}

impl Preset {
    /// Rules enabled by this preset, ready for a [`comment_linter::LintRunner`]
    pub fn rules_config(&self) -> RulesConfig {
        RulesConfig::from_settings(&self.rules)
    }
}

/// A preset as written, before its parent chain is applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PresetDefinition {
    pub name: String,
    pub extends: Option<String>,
    pub rules: IndexMap<String, RuleSetting>,
    pub files: Option<Vec<String>>,
    pub processor: Option<String>,
}

impl PresetDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn rule(mut self, rule: &str, setting: impl Into<RuleSetting>) -> Self {
        self.rules.insert(rule.to_string(), setting.into());
        self
    }

    pub fn rule_with_options(self, rule: &str, severity: Severity, options: Value) -> Self {
        self.rule(rule, RuleSetting::WithOptions(severity, options))
    }

    pub fn files(mut self, globs: &[&str]) -> Self {
        self.files = Some(globs.iter().map(|glob| glob.to_string()).collect());
        self
    }

    pub fn processor(mut self, processor: impl Into<String>) -> Self {
        self.processor = Some(processor.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("preset `{preset}` extends unknown preset `{parent}`")]
    UnknownParent { preset: String, parent: String },
    #[error("preset inheritance cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
    #[error("preset `{0}` is defined more than once")]
    Duplicate(String),
}

/// Immutable set of resolved presets
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, Arc<Preset>>,
}

impl PresetRegistry {
    /// Every built-in preset
    pub fn builtin() -> Self {
        Self::from_definitions(builtin_definitions()).expect("built-in presets are well formed")
    }

    /// Resolve `definitions`, flattening each parent chain. Child rule entries
    /// replace the parent's entry for the same rule; `files` and `processor`
    /// are inherited unless the child sets them.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = PresetDefinition>,
    ) -> Result<Self, PresetError> {
        let mut pending: IndexMap<String, PresetDefinition> = IndexMap::new();
        for definition in definitions {
            if pending.contains_key(&definition.name) {
                return Err(PresetError::Duplicate(definition.name));
            }
            pending.insert(definition.name.clone(), definition);
        }

        let mut resolved = IndexMap::new();
        let mut chain = Vec::new();
        for name in pending.keys() {
            resolve(name, &pending, &mut resolved, &mut chain)?;
        }

        // Definition order, not resolution order
        let presets = pending
            .keys()
            .filter_map(|name| resolved.get(name).map(|preset| (name.clone(), Arc::clone(preset))))
            .collect();
        tracing::debug!(count = pending.len(), "preset registry built");
        Ok(Self { presets })
    }

    /// The same `Arc` is returned on every call
    pub fn get(&self, name: &str) -> Option<Arc<Preset>> {
        self.presets.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn resolve(
    name: &str,
    pending: &IndexMap<String, PresetDefinition>,
    resolved: &mut IndexMap<String, Arc<Preset>>,
    chain: &mut Vec<String>,
) -> Result<Arc<Preset>, PresetError> {
    if let Some(preset) = resolved.get(name) {
        return Ok(Arc::clone(preset));
    }
    if let Some(start) = chain.iter().position(|link| link == name) {
        let mut cycle = chain[start..].to_vec();
        cycle.push(name.to_string());
        return Err(PresetError::Cycle(cycle));
    }
    // Callers only pass names that are keys of `pending` or checked parents
    let Some(definition) = pending.get(name) else {
        return Err(PresetError::UnknownParent {
            preset: chain.last().cloned().unwrap_or_default(),
            parent: name.to_string(),
        });
    };

    chain.push(name.to_string());
    let parent = match &definition.extends {
        Some(parent) if !pending.contains_key(parent) => {
            return Err(PresetError::UnknownParent {
                preset: name.to_string(),
                parent: parent.clone(),
            })
        }
        Some(parent) => Some(resolve(parent, pending, resolved, chain)?),
        None => None,
    };
    chain.pop();

    let mut rules = parent.as_ref().map(|p| p.rules.clone()).unwrap_or_default();
    for (rule, setting) in &definition.rules {
        rules.insert(rule.clone(), setting.clone());
    }
    let preset = Arc::new(Preset {
        name: name.to_string(),
        rules,
        files: definition
            .files
            .clone()
            .or_else(|| parent.as_ref().and_then(|p| p.files.clone())),
        processor: definition
            .processor
            .clone()
            .or_else(|| parent.as_ref().and_then(|p| p.processor.clone())),
    });
    resolved.insert(name.to_string(), Arc::clone(&preset));
    Ok(preset)
}

fn builtin_definitions() -> Vec<PresetDefinition> {
    use Severity::{Error, Warn};

    vec![
        PresetDefinition::new("minimal")
            .rule("todo-format", Warn)
            .rule("no-commented-code", Warn),
        PresetDefinition::new("recommended")
            .extends("minimal")
            .rule("a11y-todo-format", Warn)
            .rule("no-obvious-comments", Warn)
            .rule("jsdoc-params", Warn),
        PresetDefinition::new("strict")
            .extends("recommended")
            .rule("todo-format", Error)
            .rule("no-commented-code", Error)
            .rule_with_options("a11y-todo-format", Error, json!({ "requireWcagReference": true }))
            .rule_with_options("no-obvious-comments", Warn, json!({ "sensitivity": "high" }))
            .rule_with_options(
                "jsdoc-params",
                Error,
                json!({ "requireReturnDescription": true, "checkUnnecessaryReturns": true }),
            )
            .rule("todo-age", Warn)
            .rule("no-stale-references", Warn),
        PresetDefinition::new("analysis")
            .rule("comment-ratio", Warn)
            .rule("todo-age", Warn)
            .rule("no-stale-references", Warn),
        PresetDefinition::new("typescript")
            .extends("recommended")
            .files(&["**/*.ts", "**/*.tsx", "**/*.mts", "**/*.cts"])
            // Types live in the signature
            .rule_with_options(
                "jsdoc-params",
                Warn,
                json!({ "requireParamType": false, "requireReturnType": false }),
            ),
        PresetDefinition::new("react")
            .extends("recommended")
            .files(&["**/*.jsx", "**/*.tsx"]),
        PresetDefinition::new("vue")
            .extends("recommended")
            .files(&["**/*.vue"])
            .processor("vue"),
        PresetDefinition::new("svelte")
            .extends("recommended")
            .files(&["**/*.svelte"])
            .processor("svelte"),
    ]
}
