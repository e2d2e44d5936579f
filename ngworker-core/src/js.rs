//! JavaScript expression tree for rendering CommonJS configuration modules.
//!
//! Only the shapes that show up in bundler configuration files are modelled:
//! literals, regular expressions, arrays, object literals, constructor calls,
//! function calls and raw identifiers.

use serde_json::{Number, Value};

use crate::CodeBuilder;

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum JsExpr {
    Null,
    Bool(bool),
    Number(Number),
    /// A string literal (will be quoted).
    String(String),
    /// A regular expression literal, `/pattern/flags`.
    Regex { pattern: String, flags: String },
    /// A raw expression (will not be quoted), e.g. an identifier.
    Raw(String),
    Array(Vec<JsExpr>),
    Object(JsObject),
    /// `new Class(args...)`
    New { class: String, args: Vec<JsExpr> },
    /// `callee(args...)`
    Call { callee: String, args: Vec<JsExpr> },
}

impl JsExpr {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            flags: String::new(),
        }
    }

    pub fn regex_with_flags(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    pub fn new_instance(class: impl Into<String>, args: Vec<JsExpr>) -> Self {
        Self::New {
            class: class.into(),
            args,
        }
    }

    pub fn call(callee: impl Into<String>, args: Vec<JsExpr>) -> Self {
        Self::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Render this expression as a standalone snippet.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        self.write(&mut builder, "", "");
        builder.build()
    }

    /// Write this expression as one or more lines.
    ///
    /// `prefix` goes before the first line (e.g. `"entry: "`) and `suffix`
    /// after the last one (e.g. `","`).
    pub fn write(&self, b: &mut CodeBuilder, prefix: &str, suffix: &str) {
        if let Some(inline) = self.inline() {
            b.push_line(&format!("{prefix}{inline}{suffix}"));
            return;
        }

        match self {
            Self::Array(items) => {
                b.push_line(&format!("{prefix}["));
                b.push_indent();
                write_items(b, items);
                b.push_dedent();
                b.push_line(&format!("]{suffix}"));
            }
            Self::Object(object) => {
                b.push_line(&format!("{prefix}{{"));
                b.push_indent();
                let last = object.properties.len().saturating_sub(1);
                for (i, (key, value)) in object.properties.iter().enumerate() {
                    let separator = if i == last { "" } else { "," };
                    value.write(b, &format!("{}: ", render_key(key)), separator);
                }
                b.push_dedent();
                b.push_line(&format!("}}{suffix}"));
            }
            Self::New { class, args } => {
                b.push_line(&format!("{prefix}new {class}("));
                b.push_indent();
                write_items(b, args);
                b.push_dedent();
                b.push_line(&format!("){suffix}"));
            }
            Self::Call { callee, args } => {
                b.push_line(&format!("{prefix}{callee}("));
                b.push_indent();
                write_items(b, args);
                b.push_dedent();
                b.push_line(&format!("){suffix}"));
            }
            // Scalars always have an inline form.
            _ => {}
        }
    }

    /// Single-line form, if this expression has one.
    fn inline(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(quote(s)),
            Self::Regex { pattern, flags } => Some(format!("/{pattern}/{flags}")),
            Self::Raw(s) => Some(s.clone()),
            Self::Array(items) => inline_list(items).map(|list| format!("[{list}]")),
            Self::Object(object) if object.is_empty() => Some("{}".to_string()),
            Self::Object(_) => None,
            Self::New { class, args } => inline_list(args).map(|list| format!("new {class}({list})")),
            Self::Call { callee, args } => inline_list(args).map(|list| format!("{callee}({list})")),
        }
    }
}

fn write_items(b: &mut CodeBuilder, items: &[JsExpr]) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        item.write(b, "", if i == last { "" } else { "," });
    }
}

/// Comma-separated inline form, if every item has one and none is composite.
fn inline_list(items: &[JsExpr]) -> Option<String> {
    items
        .iter()
        .map(|item| match item {
            JsExpr::Array(inner) if !inner.is_empty() => None,
            other => other.inline(),
        })
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join(", "))
}

fn quote(s: &str) -> String {
    // JSON string literals are valid JavaScript string literals.
    Value::String(s.to_string()).to_string()
}

fn render_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

impl From<Value> for JsExpr {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(JsObject {
                properties: map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            }),
        }
    }
}

impl From<JsObject> for JsExpr {
    fn from(object: JsObject) -> Self {
        Self::Object(object)
    }
}

impl From<&str> for JsExpr {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for JsExpr {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for JsExpr {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for JsExpr {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Builder for JavaScript object literals. Property order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsObject {
    properties: Vec<(String, JsExpr)>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<JsExpr>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Add a property only when a value is present.
    pub fn prop_opt(self, key: impl Into<String>, value: Option<impl Into<JsExpr>>) -> Self {
        match value {
            Some(value) => self.prop(key, value),
            None => self,
        }
    }

    /// Look up a property by key.
    pub fn get(&self, key: &str) -> Option<&JsExpr> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalars_render_inline() {
        assert_eq!(JsExpr::Null.render(), "null\n");
        assert_eq!(JsExpr::from(true).render(), "true\n");
        assert_eq!(JsExpr::from(3u64).render(), "3\n");
        assert_eq!(JsExpr::string("it's").render(), "\"it's\"\n");
        assert_eq!(JsExpr::regex(r"\.js$").render(), "/\\.js$/\n");
        assert_eq!(
            JsExpr::regex_with_flags(r"\.js(\?.*)?$", "i").render(),
            "/\\.js(\\?.*)?$/i\n"
        );
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(JsExpr::string("a\"b\\c").render(), "\"a\\\"b\\\\c\"\n");
    }

    #[test]
    fn test_array_of_scalars_is_inline() {
        let expr = JsExpr::strings([".ts", ".js"]);
        assert_eq!(expr.render(), "[\".ts\", \".js\"]\n");
    }

    #[test]
    fn test_object_renders_multiline() {
        let expr = JsExpr::from(
            JsObject::new()
                .prop("path", "/tmp/out")
                .prop("filename", "main.js"),
        );
        assert_eq!(
            expr.render(),
            "{\n  path: \"/tmp/out\",\n  filename: \"main.js\"\n}\n"
        );
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let expr = JsExpr::from(JsObject::new().prop("rxjs/Observable", "x"));
        assert_eq!(expr.render(), "{\n  \"rxjs/Observable\": \"x\"\n}\n");
    }

    #[test]
    fn test_new_with_no_args_is_inline() {
        let expr = JsExpr::new_instance("PurifyPlugin", vec![]);
        assert_eq!(expr.render(), "new PurifyPlugin()\n");
    }

    #[test]
    fn test_new_with_object_arg_is_multiline() {
        let expr = JsExpr::new_instance(
            "HtmlWebpackPlugin",
            vec![JsObject::new().prop("filename", "index.html").into()],
        );
        assert_eq!(
            expr.render(),
            "new HtmlWebpackPlugin(\n  {\n    filename: \"index.html\"\n  }\n)\n"
        );
    }

    #[test]
    fn test_nested_structure_suffixes() {
        let expr = JsExpr::Array(vec![
            JsObject::new().prop("a", 1u64).into(),
            JsObject::new().prop("b", 2u64).into(),
        ]);
        assert_eq!(expr.render(), "[\n  {\n    a: 1\n  },\n  {\n    b: 2\n  }\n]\n");
    }

    #[test]
    fn test_from_json_value_preserves_order() {
        let expr = JsExpr::from(json!({ "zeta": 1, "alpha": [true, null] }));
        let JsExpr::Object(object) = &expr else {
            panic!("expected object");
        };
        assert_eq!(object.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(expr.render(), "{\n  zeta: 1,\n  alpha: [true, null]\n}\n");
    }

    #[test]
    fn test_prop_opt_skips_none() {
        let object = JsObject::new()
            .prop_opt("title", Some("demo"))
            .prop_opt("polyfills", None::<&str>);
        assert!(object.get("title").is_some());
        assert!(object.get("polyfills").is_none());
    }
}
