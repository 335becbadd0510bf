//! Reading compiled theme CSS back into structured form.
//!
//! [`parse_theme_css`] is the inverse of the compiler's text layout: it
//! collects every class-selector rule and the custom properties declared in
//! it. Stored themes carry their CSS as opaque text, so this is how the CLI
//! inspects a saved theme and how tests check the compiler's output by
//! meaning instead of by substring.
//!
//! The tokenizer is `cssparser`, so comments, whitespace and nested function
//! values (`rgb(…)`, `var(…)`) are handled the way a browser would.
//!
//! # Mapping
//!
//! - `.theme-x { … }` becomes a rule with selector `theme-x`.
//! - `.theme-x.dark { … }` becomes a rule with selector `theme-x.dark`.
//! - Declarations keep their raw value text (`rgb(217 70 239)`,
//!   `var(--color-theme-primary-500)`), in source order.
//!
//! Rules whose prelude is not a class selector are rejected.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use serde::Serialize;

use crate::color::{parse_rgb_function, ColorScheme, Rgb};
use crate::error::{CssError, PaletteRole};
use crate::palette::Shade;

/// One `--name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// A class-selector rule and its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeRule {
    /// Compound class selector without leading dots, joined by `.`.
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl ThemeRule {
    /// The raw value of a declaration.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// The color of one shade variable, e.g. `--color-theme-accent-300`.
    pub fn shade(&self, role: PaletteRole, shade: Shade) -> Option<Rgb> {
        let name = format!("--color-theme-{}-{}", role, shade);
        self.get(&name).and_then(|v| parse_rgb_function(v).ok())
    }

    /// All shade colors present for a role, in source order.
    pub fn shades(&self, role: PaletteRole) -> Vec<(Shade, Rgb)> {
        Shade::ALL
            .into_iter()
            .filter_map(|shade| self.shade(role, shade).map(|rgb| (shade, rgb)))
            .collect()
    }
}

/// All rules of a compiled theme stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeStylesheet {
    pub rules: Vec<ThemeRule>,
}

impl ThemeStylesheet {
    pub fn rule(&self, selector: &str) -> Option<&ThemeRule> {
        self.rules.iter().find(|r| r.selector == selector)
    }

    /// The rule a theme class uses in `scheme`.
    pub fn rule_for(&self, class_name: &str, scheme: ColorScheme) -> Option<&ThemeRule> {
        match scheme {
            ColorScheme::Light => self.rule(class_name),
            ColorScheme::Dark => self.rule(&format!("{}.dark", class_name)),
        }
    }

    /// Theme class names, i.e. single-class selectors.
    pub fn class_names(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|r| r.selector.as_str())
            .filter(|s| !s.contains('.'))
            .collect()
    }
}

/// Parses compiled theme CSS.
///
/// # Errors
///
/// Returns [`CssError::Parse`] for the first rule that is not a class
/// selector block.
pub fn parse_theme_css(css: &str) -> Result<ThemeStylesheet, CssError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules_parser = ThemeRulesParser;

    let mut sheet = ThemeStylesheet::default();
    for result in cssparser::StyleSheetParser::new(&mut parser, &mut rules_parser) {
        match result {
            Ok(rule) => sheet.rules.push(rule),
            Err((err, _slice)) => {
                return Err(CssError::Parse {
                    line: err.location.line + 1,
                    column: err.location.column,
                    message: format!("{:?}", err.kind),
                });
            }
        }
    }
    Ok(sheet)
}

struct ThemeRulesParser;

impl<'i> QualifiedRuleParser<'i> for ThemeRulesParser {
    type Prelude = String;
    type QualifiedRule = ThemeRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut classes: Vec<String> = Vec::new();

        loop {
            // Whitespace would make this a descendant selector.
            match input.next_including_whitespace() {
                Ok(Token::Delim('.')) => {
                    let name = input.expect_ident()?;
                    classes.push(name.as_ref().to_string());
                }
                Ok(Token::WhiteSpace(_)) if !classes.is_empty() => break,
                Ok(Token::WhiteSpace(_)) => continue,
                Ok(_) => return Err(input.new_custom_error(())),
                Err(_) => break,
            }
        }

        // Anything after the compound selector is unsupported.
        if !input.is_exhausted() || classes.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(classes.join("."))
    }

    fn parse_block<'t>(
        &mut self,
        selector: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = CustomPropertyParser;
        let declarations = RuleBodyParser::new(input, &mut decl_parser)
            .flatten()
            .collect();
        Ok(ThemeRule {
            selector,
            declarations,
        })
    }
}

impl<'i> AtRuleParser<'i> for ThemeRulesParser {
    type Prelude = ();
    type AtRule = ThemeRule;
    type Error = ();
}

struct CustomPropertyParser;

impl<'i> DeclarationParser<'i> for CustomPropertyParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        Ok(Declaration {
            name: name.as_ref().to_string(),
            value: input.slice_from(start).trim().to_string(),
        })
    }
}

impl<'i> AtRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for CustomPropertyParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
/* sample theme */
.theme-sample {
  --color-theme-primary-50: rgb(250 240 255);
  /* default primary, interaction, contrast */
  --color-theme-primary: var(--color-theme-primary-500);
  --color-theme-primary-contrast: var(--color-gray-0);
}
/* sample theme dark */
.theme-sample.dark {
  --color-theme-primary-50: rgb(10 0 20);
}
"#;

    #[test]
    fn parses_rules_and_declarations() {
        let sheet = parse_theme_css(SAMPLE).unwrap();
        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.class_names(), vec!["theme-sample"]);

        let light = sheet.rule_for("theme-sample", ColorScheme::Light).unwrap();
        assert_eq!(light.declarations.len(), 3);
        assert_eq!(
            light.get("--color-theme-primary"),
            Some("var(--color-theme-primary-500)")
        );
        assert_eq!(
            light.shade(PaletteRole::Primary, Shade::S50),
            Some(Rgb(250, 240, 255))
        );

        let dark = sheet.rule_for("theme-sample", ColorScheme::Dark).unwrap();
        assert_eq!(dark.shade(PaletteRole::Primary, Shade::S50), Some(Rgb(10, 0, 20)));
        assert_eq!(dark.shades(PaletteRole::Accent), vec![]);
    }

    #[test]
    fn empty_input_has_no_rules() {
        assert_eq!(parse_theme_css("").unwrap(), ThemeStylesheet::default());
        assert!(parse_theme_css("/* only a comment */").unwrap().rules.is_empty());
    }

    #[test]
    fn rejects_non_class_selectors() {
        assert!(parse_theme_css("body { color: red; }").is_err());
        assert!(parse_theme_css(".a .b { --x: 1; }").is_err());
    }
}
