//! Canonical LDL JSON

use crate::error::GeneratorError;
use crate::tokens::TokenDocument;

/// Pretty-printed document in the native shape, readable by the LDL parser
pub(super) fn render(document: &TokenDocument) -> Result<String, GeneratorError> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ColorToken, TokenCategory};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_native_shape() {
        let doc = TokenDocument::new()
            .with_name("Acme")
            .with_color("link", ColorToken::reference("primary"))
            .with_token(TokenCategory::Spacing, "1", "4px");
        assert_eq!(
            render(&doc).unwrap(),
            r#"{
  "version": "1.0",
  "name": "Acme",
  "colors": {
    "link": {
      "ref": "primary"
    }
  },
  "spacing": {
    "1": "4px"
  }
}
"#
        );
    }
}
