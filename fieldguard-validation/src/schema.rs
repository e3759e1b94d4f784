// Declarative record schemas and tag parsing

use crate::{ConfigError, FieldKind};

/// One parsed `name=options` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub options: String,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, options: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: options.into(),
        }
    }

    /// Parse a single clause. It must contain exactly one `=`.
    pub fn parse(clause: &str) -> Result<Self, ConfigError> {
        let mut parts = clause.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(options), None) => Ok(Self::new(name, options)),
            _ => Err(ConfigError::MalformedClause {
                clause: clause.to_string(),
            }),
        }
    }
}

/// Parse a whitespace separated tag such as `"min=1 max=99"`
///
/// An empty tag yields no clauses.
pub fn parse_tag(tag: &str) -> Result<Vec<RuleSpec>, ConfigError> {
    tag.split_ascii_whitespace().map(RuleSpec::parse).collect()
}

/// A declared field: name, kind, tag and any rules attached in code
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub tag: String,
    pub specs: Vec<RuleSpec>,
}

impl FieldDef {
    /// Clauses from the tag followed by the ones attached through the builder
    pub fn rule_specs(&self) -> Result<Vec<RuleSpec>, ConfigError> {
        let mut specs = parse_tag(&self.tag)?;
        specs.extend(self.specs.iter().cloned());
        Ok(specs)
    }
}

/// Fields of a record type in declaration order
///
/// ```
/// use fieldguard_validation::{FieldKind, RuleSpec, Schema};
///
/// let schema = Schema::new()
///     .field("age", FieldKind::U32, "min=18")
///     .field_with("region", FieldKind::I32, vec![RuleSpec::new("max", "5")])
///     .untagged("notes", FieldKind::String);
///
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.fields()[1].name, "region");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with a tag string
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        tag: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            tag: tag.into(),
            specs: Vec::new(),
        });
        self
    }

    /// Declare a field with rules built in code instead of a tag
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        specs: Vec<RuleSpec>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            tag: String::new(),
            specs,
        });
        self
    }

    /// Declare a field without any rules
    pub fn untagged(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(name, kind, "")
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let specs = parse_tag("min=1  max=99").unwrap();
        assert_eq!(specs, vec![RuleSpec::new("min", "1"), RuleSpec::new("max", "99")]);
    }

    #[test]
    fn test_parse_empty_tag() {
        assert!(parse_tag("").unwrap().is_empty());
        assert!(parse_tag("   ").unwrap().is_empty());
    }

    #[test]
    fn test_regexp_options_keep_colons() {
        let specs = parse_tag("format=regexp:[A-Z][a-z]{3,12}").unwrap();
        assert_eq!(specs[0].name, "format");
        assert_eq!(specs[0].options, "regexp:[A-Z][a-z]{3,12}");
    }

    #[test]
    fn test_malformed_clauses() {
        for tag in ["min", "min=1 max", "a=b=c"] {
            assert!(
                matches!(parse_tag(tag), Err(ConfigError::MalformedClause { .. })),
                "{tag}"
            );
        }
    }

    #[test]
    fn test_empty_name_is_not_malformed() {
        let specs = parse_tag("=5").unwrap();
        assert_eq!(specs, vec![RuleSpec::new("", "5")]);
    }

    #[test]
    fn test_field_def_merges_specs() {
        let schema = Schema::new().field("age", FieldKind::U8, "min=1");
        let mut def = schema.fields()[0].clone();
        def.specs.push(RuleSpec::new("max", "9"));
        let specs = def.rule_specs().unwrap();
        assert_eq!(specs, vec![RuleSpec::new("min", "1"), RuleSpec::new("max", "9")]);
    }
}
