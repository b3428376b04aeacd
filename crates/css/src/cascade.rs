use core_types::{ComputedStyle, Specificity};
use html::{Ancestors, Element, StyleResolver};

use crate::selector::Selector;
use crate::syntax::{
    Declaration, Rule, SimpleStylesheetParser, StylesheetParseError, StylesheetParser,
    parse_declarations,
};

#[derive(Clone, Debug)]
pub struct CascadeConfig {
    /// Apply declarations from `style` attributes at inline specificity.
    pub inline_styles: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            inline_styles: true,
        }
    }
}

#[derive(Clone, Debug)]
struct StoredRule {
    selector: Selector,
    specificity: Specificity,
    declarations: Vec<Declaration>,
}

/// Rules collected so far, in the order their stylesheets closed.
#[derive(Clone, Debug, Default)]
pub struct RuleStore {
    rules: Vec<StoredRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Only its primary selector takes part in matching.
    pub fn push(&mut self, rule: Rule) {
        let selector = Selector::parse(rule.primary_selector());
        if !selector.is_supported() {
            log::debug!(
                target: "css.cascade",
                "selector '{}' uses unsupported syntax and will never match",
                rule.primary_selector()
            );
        }
        let specificity = selector.specificity();
        self.rules.push(StoredRule {
            selector,
            specificity,
            declarations: rule.declarations,
        });
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every matching rule to `style`, in store order.
    fn apply_matching(&self, element: &Element, ancestors: Ancestors<'_>, style: &mut ComputedStyle) {
        for rule in &self.rules {
            if !rule.selector.matches(element, ancestors) {
                continue;
            }
            for declaration in &rule.declarations {
                style.apply(&declaration.name, &declaration.value, rule.specificity);
            }
        }
    }
}

impl Extend<Rule> for RuleStore {
    fn extend<T: IntoIterator<Item = Rule>>(&mut self, iter: T) {
        for rule in iter {
            self.push(rule);
        }
    }
}

// If the element has an inline style attribute, return its value
pub fn get_inline_style(element: &Element) -> Option<&str> {
    element.attribute("style")
}

/// Per-parse style resolver: owns the rule store and the stylesheet parser.
#[derive(Debug)]
pub struct Cascade<P: StylesheetParser = SimpleStylesheetParser> {
    config: CascadeConfig,
    parser: P,
    store: RuleStore,
    errors: Vec<StylesheetParseError>,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(CascadeConfig::default(), SimpleStylesheetParser)
    }
}

impl<P: StylesheetParser> Cascade<P> {
    pub fn new(config: CascadeConfig, parser: P) -> Self {
        Self {
            config,
            parser,
            store: RuleStore::new(),
            errors: Vec::new(),
        }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RuleStore {
        &mut self.store
    }

    /// Stylesheets rejected so far.
    pub fn errors(&self) -> &[StylesheetParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<StylesheetParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Parse `text` and append its rules. A stylesheet with a syntax error
    /// adds no rules at all.
    pub fn add_stylesheet(&mut self, text: &str) -> Result<usize, StylesheetParseError> {
        let rules = self.parser.parse(text)?;
        let added = rules.len();
        self.store.extend(rules);
        log::debug!(
            target: "css.cascade",
            "collected {added} rule(s), {} total",
            self.store.len()
        );
        Ok(added)
    }

    /// Cascade result for `element` given its open ancestors.
    pub fn compute(&self, element: &Element, ancestors: Ancestors<'_>) -> ComputedStyle {
        let mut style = ComputedStyle::new();
        if self.config.inline_styles
            && let Some(inline) = get_inline_style(element)
        {
            for declaration in parse_declarations(inline) {
                style.apply(&declaration.name, &declaration.value, Specificity::INLINE);
            }
        }
        self.store.apply_matching(element, ancestors, &mut style);
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "css.cascade",
            "<{}> resolved {} propert(ies)",
            element.name,
            style.len()
        );
        style
    }
}

impl<P: StylesheetParser> StyleResolver for Cascade<P> {
    fn resolve(&mut self, element: &Element, ancestors: Ancestors<'_>) -> ComputedStyle {
        self.compute(element, ancestors)
    }

    fn collect_stylesheet(&mut self, text: &str) {
        if let Err(err) = self.add_stylesheet(text) {
            log::warn!(target: "css.cascade", "dropping stylesheet: {err}");
            self.errors.push(err);
        }
    }
}
