//! Bash array encoding of the `VOLUMES` entry, e.g. `('/data' '/opt/my maps')`.

const SAFE_PUNCT: &[char] = &['@', '%', '+', '=', ':', ',', '.', '/', '-', '_'];

fn quote(item: &str) -> String {
    if !item.is_empty()
        && item
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SAFE_PUNCT.contains(&c))
    {
        return format!("'{item}'");
    }
    format!("'{}'", item.replace('\'', r#"'"'"'"#))
}

/// Serializes a path list as a bash array literal.
pub fn encode<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = items.into_iter().map(|i| quote(i.as_ref())).collect();
    format!("({})", quoted.join(" "))
}

/// Parses a bash array literal back into its elements.
///
/// Accepts single quotes, double quotes with backslash escapes, and bare
/// words. A value without surrounding parentheses is split the same way.
pub fn decode(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(trimmed);
    split_words(inner)
}

fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                current.extend(chars.by_ref().take_while(|&c| c != '\''));
            }
            '"' => {
                in_word = true;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => current.extend(chars.next()),
                        other => current.push(other),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.extend(chars.next());
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_empty_list() {
        assert_eq!(encode(Vec::<String>::new()), "()");
        assert!(decode("()").is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn encode_quotes_every_element() {
        assert_eq!(
            encode(["/data", "/opt/my maps"]),
            "('/data' '/opt/my maps')"
        );
    }

    #[test]
    fn encode_escapes_single_quotes() {
        let encoded = encode(["/it's"]);
        assert_eq!(decode(&encoded), vec!["/it's"]);
    }

    #[test]
    fn decode_mixed_quoting() {
        assert_eq!(
            decode(r#"('/a b' "/c\"d" /e)"#),
            vec!["/a b", "/c\"d", "/e"]
        );
    }

    #[test]
    fn decode_without_parentheses() {
        assert_eq!(decode("/a /b"), vec!["/a", "/b"]);
    }
}
