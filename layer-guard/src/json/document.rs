//! The rule-set document.
//!
//! ```json
//! {
//!   "$schema": "https://example.com/rules.schema.json",
//!   "type": "Customer",
//!   "properties": {
//!     "Email": {
//!       "rules": [
//!         { "validator": "notEmpty", "message": "Email is required." },
//!         {
//!           "validator": "email",
//!           "message": "Email is invalid.",
//!           "errorCode": "EMAIL_FORMAT",
//!           "severity": "atOwnRisk",
//!           "layers": { "entity": "notRecommended" }
//!         }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Field names and severity spellings are a wire contract. The order of
//! `properties` is the order rules are evaluated in and is preserved through
//! a load/save cycle.

use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A complete rule set for one type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSetDocument {
    /// Optional schema reference, carried through untouched
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Name of the target type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Per-property rules in document order
    #[serde(default)]
    pub properties: PropertyRuleSet,
}

impl RuleSetDocument {
    /// Creates an empty document for `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            type_name: type_name.into(),
            properties: PropertyRuleSet::default(),
        }
    }

    /// Appends the rules of one property.
    pub fn with_property(mut self, name: impl Into<String>, rules: Vec<RuleDefinition>) -> Self {
        self.properties.push(name, PropertyRules { rules });
        self
    }

    /// Parses a document from JSON text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layer_guard::json::RuleSetDocument;
    ///
    /// let doc = RuleSetDocument::from_json_str(r#"{
    ///     "type": "Customer",
    ///     "properties": {
    ///         "Phone": { "rules": [{ "validator": "phone", "message": "bad phone" }] },
    ///         "Email": { "rules": [{ "validator": "email", "message": "bad email" }] }
    ///     }
    /// }"#).unwrap();
    ///
    /// let names: Vec<_> = doc.properties.iter().map(|(name, _)| name).collect();
    /// assert_eq!(names, vec!["Phone", "Email"]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a document from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The rules declared for one property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRules {
    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// One declared check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    /// Registry name of the check
    pub validator: String,
    /// Factory parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    /// Failure message
    pub message: String,
    /// Optional machine-readable code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Default severity spelling; `forbidden` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Layer name to severity spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<BTreeMap<String, String>>,
}

impl RuleDefinition {
    /// Creates a definition with a validator name and message.
    pub fn new(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            params: None,
            message: message.into(),
            error_code: None,
            severity: None,
            layers: None,
        }
    }

    /// Adds one factory parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the error code.
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Sets the default severity spelling.
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Adds a layer override.
    pub fn with_layer(mut self, layer: impl Into<String>, severity: impl Into<String>) -> Self {
        self.layers
            .get_or_insert_with(BTreeMap::new)
            .insert(layer.into(), severity.into());
        self
    }
}

/// Property rules keyed by name, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRuleSet {
    entries: Vec<(String, PropertyRules)>,
}

impl PropertyRuleSet {
    /// Appends a property. A repeated name keeps its first position and takes
    /// the later rules, matching how JSON objects treat duplicate keys.
    pub fn push(&mut self, name: impl Into<String>, rules: PropertyRules) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rules,
            None => self.entries.push((name, rules)),
        }
    }

    /// Looks up a property by exact name.
    pub fn get(&self, name: &str) -> Option<&PropertyRules> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rules)| rules)
    }

    /// Iterates in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyRules)> {
        self.entries.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no property is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PropertyRuleSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, rules) in &self.entries {
            map.serialize_entry(name, rules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyRuleSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropertyRuleSetVisitor;

        impl<'de> Visitor<'de> for PropertyRuleSetVisitor {
            type Value = PropertyRuleSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of property names to rules")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<PropertyRuleSet, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut set = PropertyRuleSet::default();
                while let Some((name, rules)) = map.next_entry::<String, PropertyRules>()? {
                    set.push(name, rules);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(PropertyRuleSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOCUMENT: &str = r#"{
        "$schema": "rules.schema.json",
        "type": "Customer",
        "properties": {
            "Zeta": { "rules": [] },
            "Email": {
                "rules": [
                    { "validator": "notEmpty", "message": "Email is required." },
                    {
                        "validator": "maxLength",
                        "params": { "max": 10 },
                        "message": "Too long.",
                        "errorCode": "LEN",
                        "severity": "atOwnRisk",
                        "layers": { "entity": "notRecommended" }
                    }
                ]
            },
            "Alpha": { "rules": [] }
        }
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = RuleSetDocument::from_json_str(DOCUMENT).unwrap();
        assert_eq!(doc.schema.as_deref(), Some("rules.schema.json"));
        assert_eq!(doc.type_name, "Customer");

        let names: Vec<_> = doc.properties.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Email", "Alpha"]);

        let email = doc.properties.get("Email").unwrap();
        assert_eq!(email.rules.len(), 2);
        let max = &email.rules[1];
        assert_eq!(max.params.as_ref().unwrap()["max"], json!(10));
        assert_eq!(max.error_code.as_deref(), Some("LEN"));
        assert_eq!(max.severity.as_deref(), Some("atOwnRisk"));
        assert_eq!(max.layers.as_ref().unwrap()["entity"], "notRecommended");
    }

    #[test]
    fn test_round_trip_keeps_order_and_spelling() {
        let doc = RuleSetDocument::from_json_str(DOCUMENT).unwrap();
        let text = doc.to_json_pretty().unwrap();

        assert!(text.contains("\"$schema\""));
        assert!(text.contains("\"errorCode\": \"LEN\""));
        assert!(text.find("Zeta").unwrap() < text.find("Alpha").unwrap());
        assert_eq!(RuleSetDocument::from_json_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_builder_matches_parsed() {
        let built = RuleSetDocument::new("Customer").with_property(
            "Email",
            vec![RuleDefinition::new("maxLength", "Too long.")
                .with_param("max", 10)
                .with_severity("atOwnRisk")
                .with_layer("entity", "notRecommended")],
        );
        let value = serde_json::to_value(&built).unwrap();
        assert_eq!(value["properties"]["Email"]["rules"][0]["params"]["max"], json!(10));
        assert!(value.get("$schema").is_none());
    }

    #[test]
    fn test_missing_type_is_error() {
        assert!(RuleSetDocument::from_json_str(r#"{ "properties": {} }"#).is_err());
    }
}
