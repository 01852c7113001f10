//! Splitting of declaration values into lists

/// Splits a value on commas that are not inside parentheses or quotes. Every part is trimmed and
/// empty parts are left out.
///
/// ```
/// use fg_css::list::comma;
///
/// assert_eq!(comma("url(a,b.png), linear-gradient(red, blue)"), vec!["url(a,b.png)", "linear-gradient(red, blue)"]);
/// ```
pub fn comma(value: &str) -> Vec<String> {
    split(value, ',')
}

fn split(value: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in value.chars() {
        let mut is_separator = false;

        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if let Some(q) = quote {
            if c == q {
                quote = None;
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && c == separator {
            is_separator = true;
        }

        if is_separator {
            push_part(&mut parts, &current);
            current.clear();
        } else {
            current.push(c);
        }
    }

    push_part(&mut parts, &current);
    parts
}

fn push_part(parts: &mut Vec<String>, part: &str) {
    let part = part.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
}
