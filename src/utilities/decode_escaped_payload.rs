use htmlentity::entity::{decode, ICodedDataTrait};

/// HTML-unescapes `text`, then resolves backslash escapes.
///
/// Listing widgets embed JSON that is escaped twice: once as an HTML
/// attribute and once more as a JavaScript string. Anything that cannot be
/// decoded is kept as literal text, so this never fails.
pub fn decode_escaped_payload(text: &str) -> String {
    let unescaped = decode(text.as_bytes())
        .to_string()
        .unwrap_or_else(|_| text.to_string());

    resolve_escape_sequences(&unescaped)
}

/// Resolves `\uXXXX` (with UTF-16 surrogate pairs), `\xNN` and the
/// single-character escapes `\" \' \\ \/ \n \t \r`. Unknown or malformed
/// escapes stay as written; non-ASCII text passes through untouched.
pub fn resolve_escape_sequences(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if let Some((ch, len)) = decode_escape(&text[i..]) {
                decoded.push_str(&text[last..i]);
                decoded.push(ch);
                i += len;
                last = i;
                continue;
            }
        }
        i += 1;
    }

    decoded.push_str(&text[last..]);
    decoded
}

/// Decodes the escape at the start of `s` (which starts with a backslash),
/// returning the character and the number of bytes consumed.
fn decode_escape(s: &str) -> Option<(char, usize)> {
    let simple = match s.as_bytes().get(1)? {
        b'"' => '"',
        b'\'' => '\'',
        b'\\' => '\\',
        b'/' => '/',
        b'n' => '\n',
        b't' => '\t',
        b'r' => '\r',
        b'x' => {
            let hex = s.get(2..4)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let byte = u8::from_str_radix(hex, 16).ok()?;
            return Some((char::from(byte), 4));
        }
        b'u' => return decode_unicode_escape(s),
        _ => return None,
    };
    Some((simple, 2))
}

fn decode_unicode_escape(s: &str) -> Option<(char, usize)> {
    let unit = code_unit(s)?;

    match unit {
        0xD800..=0xDBFF => {
            let low = s.get(6..).and_then(code_unit)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            let code_point = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            char::from_u32(code_point).map(|ch| (ch, 12))
        }
        // Lone low surrogate
        0xDC00..=0xDFFF => None,
        _ => char::from_u32(u32::from(unit)).map(|ch| (ch, 6)),
    }
}

fn code_unit(s: &str) -> Option<u16> {
    if !s.starts_with("\\u") {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_entities_then_unicode_escapes() {
        let raw = r#"[{&quot;url&quot;:&quot;/dp/B0ABCDEFGH&quot;}]"#;
        assert_eq!(
            decode_escaped_payload(raw),
            r#"[{"url":"/dp/B0ABCDEFGH"}]"#
        );
    }

    #[test]
    fn resolves_backslash_quoted_json() {
        let raw = r#"[{\"id\":\"B0AAAAAAAA\",\"url\":\"\/dp\/B0AAAAAAAA\"}]"#;
        assert_eq!(
            resolve_escape_sequences(raw),
            r#"[{"id":"B0AAAAAAAA","url":"/dp/B0AAAAAAAA"}]"#
        );
    }

    #[test]
    fn resolves_single_character_and_hex_escapes() {
        assert_eq!(resolve_escape_sequences(r"a\nb\tc\rd"), "a\nb\tc\rd");
        assert_eq!(resolve_escape_sequences(r"\x41\xe7"), "Aç");
        assert_eq!(resolve_escape_sequences(r"\\u0041"), r"\u0041");
        assert_eq!(resolve_escape_sequences(r"it\'s"), "it's");
    }

    #[test]
    fn combines_surrogate_pairs() {
        assert_eq!(resolve_escape_sequences(r"\uD83D\uDE00!"), "😀!");
    }

    #[test]
    fn leaves_malformed_escapes_alone() {
        assert_eq!(resolve_escape_sequences(r"\uD83D x"), r"\uD83D x");
        assert_eq!(resolve_escape_sequences(r"\u12"), r"\u12");
        assert_eq!(resolve_escape_sequences(r"\u+123"), r"\u+123");
        assert_eq!(resolve_escape_sequences(r"\xZZ \q"), r"\xZZ \q");
        assert_eq!(resolve_escape_sequences("trailing \\"), "trailing \\");
    }

    #[test]
    fn keeps_non_ascii_text_intact() {
        assert_eq!(decode_escaped_payload("Ekran boyutu &amp; İşletim"), "Ekran boyutu & İşletim");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(decode_escaped_payload(""), "");
    }
}
