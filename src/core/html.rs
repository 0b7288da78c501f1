// src/core/html.rs
//
// Case-insensitive scanning helpers over raw markup. Rows and cells are
// tag blocks located by string position; no DOM is ever built.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Content between an open pattern's tag and the next close pattern.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

/// Next `o…c` block at or after `from`. Returns (start, end) spanning both tags.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Next open tag matching `open_pat` at or after `from`. Returns the span of
/// the open tag itself, attributes included.
pub fn next_open_tag_ci(s: &str, open_pat: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let op = to_lower(open_pat);
    let start = lc.get(from..)?.find(&op)? + from;
    let end = s[start..].find('>')? + start + 1;
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Element name of an open tag, lowercased: `<DIV class=x>` → "div".
pub fn tag_name(open_tag: &str) -> String {
    open_tag
        .trim_start_matches('<')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Attribute value out of an open tag. Tolerates double quotes, single
/// quotes, and unquoted values; attribute name matched case-insensitively.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let needle = format!("{}=", to_lower(name));
    let mut from = 0usize;
    loop {
        let i = lc.get(from..)?.find(&needle)? + from;
        let at = i + needle.len();
        // Must sit where an attribute name can start
        if i == 0 || !lc.as_bytes()[i - 1].is_ascii_whitespace() {
            from = at;
            continue;
        }
        let rest = &open_tag[at..];
        let val = match rest.as_bytes().first().copied() {
            Some(q) if q == b'"' || q == b'\'' => {
                let body = &rest[1..];
                match body.find(q as char) {
                    Some(end) => &body[..end],
                    None => body.trim_end_matches(['>', '/']),
                }
            }
            _ => rest
                .split(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                .next()
                .unwrap_or(""),
        };
        return Some(val.to_string());
    }
}

/// Exact class-token membership, same contract as DOM classList.
pub fn has_class(open_tag: &str, class: &str) -> bool {
    match attr_value(open_tag, "class") {
        Some(v) => v.split_ascii_whitespace().any(|t| t.eq_ignore_ascii_case(class)),
        None => false,
    }
}

/// Given markup starting right after an element's open tag, split off that
/// element's content from the rest. Nesting-aware for same-named children;
/// an unterminated element swallows the remainder.
pub fn element_content_ci<'a>(s: &'a str, tag: &str) -> (&'a str, &'a str) {
    let lc = to_lower(s);
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = 0usize;

    while let Some(i) = lc[pos..].find('<').map(|i| i + pos) {
        if lc[i..].starts_with(&close) && ends_token(&lc, i + close.len()) {
            depth -= 1;
            let after = match lc[i..].find('>') {
                Some(j) => i + j + 1,
                None => lc.len(),
            };
            if depth == 0 {
                return (&s[..i], &s[after..]);
            }
            pos = after;
        } else if lc[i..].starts_with(&open) && ends_token(&lc, i + open.len()) {
            depth += 1;
            pos = i + open.len();
        } else {
            pos = i + 1;
        }
    }
    (s, "")
}

/// True when the tag name ends at byte `at` (next char can't extend it),
/// so `<b` won't match `<br`.
fn ends_token(lc: &str, at: usize) -> bool {
    match lc.as_bytes().get(at) {
        Some(b) => !b.is_ascii_alphanumeric(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_value_quote_styles() {
        let tag = r#"<img src="x.png" alt="Pokemon TCG Pocket - Grass" width=40>"#;
        assert_eq!(attr_value(tag, "alt").as_deref(), Some("Pokemon TCG Pocket - Grass"));
        assert_eq!(attr_value(tag, "width").as_deref(), Some("40"));
        assert_eq!(attr_value("<img alt='a b'>", "alt").as_deref(), Some("a b"));
        assert_eq!(attr_value("<img>", "alt"), None);
    }

    #[test]
    fn attr_value_requires_name_boundary() {
        // data-alt= must not satisfy a lookup for alt=
        let tag = r#"<img data-alt="no" alt="yes">"#;
        assert_eq!(attr_value(tag, "alt").as_deref(), Some("yes"));
    }

    #[test]
    fn has_class_is_token_exact() {
        let tag = r#"<div class="align right">"#;
        assert!(has_class(tag, "align"));
        assert!(has_class(tag, "right"));
        assert!(!has_class(tag, "alig"));
        assert!(!has_class("<div>", "align"));
    }

    #[test]
    fn element_content_handles_nesting() {
        let s = "a<div>b</div>c</div>tail";
        let (inner, rest) = element_content_ci(s, "div");
        assert_eq!(inner, "a<div>b</div>c");
        assert_eq!(rest, "tail");
    }

    #[test]
    fn element_content_tag_boundary() {
        // <br> must not open a nested <b>
        let (inner, rest) = element_content_ci("x<br>y</b>z", "b");
        assert_eq!(inner, "x<br>y");
        assert_eq!(rest, "z");
    }

    #[test]
    fn element_content_unterminated() {
        let (inner, rest) = element_content_ci("no close here", "div");
        assert_eq!(inner, "no close here");
        assert_eq!(rest, "");
    }
}
