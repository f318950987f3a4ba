//! Naming transforms exposed to the scaffolding templates.

/// `master/area_code` -> `MasterAreaCode`. Splits on `_`, `-`, space and `/`.
#[must_use]
pub fn pascal(input: &str) -> String {
    input
        .split(|c: char| matches!(c, '_' | '-' | ' ' | '/'))
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// `area_code` -> `areaCode`.
#[must_use]
pub fn camel(input: &str) -> String {
    let pascal = pascal(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Naive pluralizer: lowercases, turns a trailing consonant+`y` into `ies`,
/// otherwise appends `s`.
#[must_use]
pub fn plural(input: &str) -> String {
    let lower = input.to_lowercase();
    if lower.len() > 1 && lower.ends_with('y') {
        let before = lower.as_bytes()[lower.len() - 2];
        if !matches!(before, b'a' | b'e' | b'i' | b'o' | b'u') {
            return format!("{}ies", &lower[..lower.len() - 1]);
        }
    }
    format!("{lower}s")
}

/// `AreaCode` / `area_code` -> `area-code`. Used for URL mount paths.
#[must_use]
pub fn kebab(input: &str) -> String {
    delimited(input, '-')
}

/// `AreaCode` / `area-code` -> `area_code`. Used for module and directory
/// names, which must be valid Rust identifiers.
#[must_use]
pub fn snake(input: &str) -> String {
    delimited(input, '_')
}

fn delimited(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.replace(['_', '-', ' '], &separator.to_string()).chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push(separator);
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    let doubled: String = [separator, separator].iter().collect();
    while out.contains(&doubled) {
        out = out.replace(&doubled, &separator.to_string());
    }
    out.trim_matches(separator).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_splits_on_separators() {
        assert_eq!(pascal("area"), "Area");
        assert_eq!(pascal("area_code"), "AreaCode");
        assert_eq!(pascal("master/area"), "MasterArea");
        assert_eq!(pascal("sales-order"), "SalesOrder");
    }

    #[test]
    fn camel_lowers_first_letter() {
        assert_eq!(camel("area"), "area");
        assert_eq!(camel("area_code"), "areaCode");
        assert_eq!(camel(""), "");
    }

    #[test]
    fn plural_handles_trailing_y() {
        assert_eq!(plural("area"), "areas");
        assert_eq!(plural("city"), "cities");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("y"), "ys");
    }

    #[test]
    fn kebab_and_snake_split_camel_humps() {
        assert_eq!(kebab("AreaCode"), "area-code");
        assert_eq!(kebab("area_code"), "area-code");
        assert_eq!(snake("AreaCode"), "area_code");
        assert_eq!(snake("sales-order"), "sales_order");
    }
}
