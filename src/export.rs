//! Rendering a name/value-pair group as a JSON object.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::descriptor::NameValuePair;
use crate::error::{ConvertError, Result};

/// Render the pairs as a JSON object, one `"key" : "value"` member per line.
///
/// Members keep document order and duplicate keys are written as-is.
pub fn render(pairs: &[NameValuePair]) -> String {
    let mut out = String::from("{\n");
    for (i, pair) in pairs.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&quote(&pair.name));
        out.push_str(" : ");
        out.push_str(&quote(&pair.value));
        if i + 1 < pairs.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn quote(s: &str) -> String {
    // Serializing a str cannot fail
    serde_json::to_string(s).unwrap_or_default()
}

/// Write the rendered pairs to `path`, replacing any existing content.
pub async fn write(pairs: &[NameValuePair], path: &Path) -> Result<()> {
    let document = render(pairs);

    let mut file = fs::File::create(path)
        .await
        .map_err(|e| ConvertError::io(path, e))?;
    file.write_all(document.as_bytes())
        .await
        .map_err(|e| ConvertError::io(path, e))?;
    file.flush().await.map_err(|e| ConvertError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> NameValuePair {
        NameValuePair {
            name: name.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn renders_pairs_in_order() {
        let out = render(&[pair("host", "localhost"), pair("port", "8080")]);
        assert_eq!(out, "{\n  \"host\" : \"localhost\",\n  \"port\" : \"8080\"\n}\n");
    }

    #[test]
    fn output_is_valid_json() {
        let out = render(&[pair("a", "1"), pair("b", "2"), pair("c", "3")]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["b"], "2");
    }

    #[test]
    fn empty_group_renders_empty_object() {
        assert_eq!(render(&[]), "{\n}\n");
    }

    #[test]
    fn escapes_quotes_and_control_characters() {
        let out = render(&[pair("path", "C:\\tmp \"x\"\n\t")]);
        assert_eq!(out, "{\n  \"path\" : \"C:\\\\tmp \\\"x\\\"\\n\\t\"\n}\n");
    }

    #[test]
    fn keeps_duplicate_keys() {
        let out = render(&[pair("k", "1"), pair("k", "2")]);
        assert_eq!(out.matches("\"k\"").count(), 2);
    }

    #[tokio::test]
    async fn write_replaces_existing_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gv.json");
        std::fs::write(&path, "old content that is much longer than the new one").unwrap();

        write(&[pair("x", "y")], &path).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"x\" : \"y\"\n}\n"
        );
    }
}
