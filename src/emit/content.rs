use crate::bucket::Bucket;

/// Builds `<banner>/*!mq|<condition>*/<rules>` for one bucket.
///
/// Rules are joined with newlines; with `compress` every whitespace character
/// in them is dropped. Banner and marker are never compressed.
pub fn compose(bucket: &Bucket, banner: &str, compress: bool) -> String {
    let mut body = bucket.rules.join("\n");
    if compress {
        body.retain(|c| !is_css_space(c));
    }
    format!("{}/*!mq|{}*/{}", banner, bucket.key, body)
}

/// The ECMAScript `\s` class: Unicode `White_Space` without NEL, plus BOM.
fn is_css_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketKey;

    fn bucket(key: BucketKey, rules: &[&str]) -> Bucket {
        Bucket {
            key,
            rules: rules.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn compressed_output_has_no_whitespace() {
        let b = bucket(
            BucketKey::Condition("(max-width: 200px)".to_string()),
            &[".a {\n  color: red;\n}", ".b { margin: 0 }"],
        );
        assert_eq!(
            compose(&b, "", true),
            "/*!mq|(max-width: 200px)*/.a{color:red;}.b{margin:0}"
        );
    }

    #[test]
    fn uncompressed_output_joins_with_newlines() {
        let b = bucket(BucketKey::Condition("print".to_string()), &[".a { x: 1 }", ".b { y: 2 }"]);
        assert_eq!(compose(&b, "", false), "/*!mq|print*/.a { x: 1 }\n.b { y: 2 }");
    }

    #[test]
    fn compression_strips_bom_but_keeps_next_line() {
        let b = bucket(
            BucketKey::Condition("print".to_string()),
            &["\u{feff}.a {\u{a0}x: 1\u{2028}}", ".b\u{85}{}"],
        );
        assert_eq!(compose(&b, "", true), "/*!mq|print*/.a{x:1}.b\u{85}{}");
    }

    #[test]
    fn banner_precedes_marker() {
        let b = bucket(BucketKey::Unconditioned, &[".a { }"]);
        assert_eq!(compose(&b, "/* my banner */", true), "/* my banner *//*!mq|none*/.a{}");
    }
}
