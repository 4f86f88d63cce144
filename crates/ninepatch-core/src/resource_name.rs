//! Android resource-name sanitizing.
//!
//! Resource file names may only contain lowercase ASCII letters, digits and
//! underscores, and must not start with a digit.

/// Name used when nothing usable survives sanitizing.
pub const UNTITLED: &str = "untitled";

fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ä' | 'æ' | 'ǽ' => "ae",
        'ö' | 'œ' => "oe",
        'ü' => "ue",
        'Ä' => "Ae",
        'Ü' => "Ue",
        'Ö' => "Oe",
        'À' | 'Á' | 'Â' | 'Ã' | 'Å' | 'Ǻ' | 'Ā' | 'Ă' | 'Ą' | 'Ǎ' => "A",
        'à' | 'á' | 'â' | 'ã' | 'å' | 'ǻ' | 'ā' | 'ă' | 'ą' | 'ǎ' | 'ª' => "a",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Ǐ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'ǐ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' | 'ŉ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ' | 'Ǒ' | 'Ő' | 'Ơ' | 'Ø' | 'Ǿ' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ō' | 'ŏ' | 'ǒ' | 'ő' | 'ơ' | 'ø' | 'ǿ' | 'º' => "o",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ù' | 'Ú' | 'Û' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' | 'Ư' | 'Ǔ' | 'Ǖ' | 'Ǘ' | 'Ǚ'
        | 'Ǜ' => "U",
        'ù' | 'ú' | 'û' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'ư' | 'ǔ' | 'ǖ' | 'ǘ' | 'ǚ'
        | 'ǜ' => "u",
        'Ý' | 'Ÿ' | 'Ŷ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        'Æ' | 'Ǽ' => "AE",
        'ß' => "ss",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Œ' => "OE",
        'ƒ' => "f",
        _ => return None,
    };
    Some(ascii)
}

/// Printable ASCII that cannot appear in a resource name at all.
fn is_stripped_symbol(c: char) -> bool {
    matches!(c, '!'..='+' | '/' | ':'..='@' | '['..='^' | '`' | '{'..='~')
}

/// Turn an arbitrary layer name into a valid Android resource name.
///
/// Accented Latin letters are transliterated, other non-ASCII and symbols
/// are dropped, `,` `-` `.` become `_`, whitespace runs collapse to a single
/// `_`, and the result is lowercased. Leading dots and digits are removed.
pub fn to_android_resource_name(name: &str) -> String {
    let mut ascii = String::with_capacity(name.len());
    for c in name.chars() {
        match transliterate(c) {
            Some(s) => ascii.push_str(s),
            None if (' '..='~').contains(&c) && !is_stripped_symbol(c) => ascii.push(c),
            None => {}
        }
    }

    let rest = ascii.strip_prefix('.').unwrap_or(&ascii);
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let replaced: String = rest
        .chars()
        .map(|c| if matches!(c, ',' | '-' | '.') { '_' } else { c })
        .collect();

    let result = replaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_lowercase();

    if result.is_empty() {
        UNTITLED.to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(to_android_resource_name("Card Background"), "card_background");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(to_android_resource_name("Grüße"), "gruesse");
        assert_eq!(to_android_resource_name("Ärger Æon"), "aerger_aeon");
        assert_eq!(to_android_resource_name("Çafé"), "cafe");
    }

    #[test]
    fn test_symbols_and_non_ascii_are_dropped() {
        assert_eq!(to_android_resource_name("btn (pressed)!"), "btn_pressed");
        assert_eq!(to_android_resource_name("icon★/bg"), "iconbg");
        assert_eq!(to_android_resource_name("日本 card"), "card");
    }

    #[test]
    fn test_path_separators_are_dropped() {
        assert_eq!(to_android_resource_name("icons/close"), "iconsclose");
        assert_eq!(to_android_resource_name("../card"), "_card");
        assert!(!to_android_resource_name("a/b\\c").contains(&['/', '\\'][..]));
    }

    #[test]
    fn test_separators_become_underscores() {
        assert_eq!(to_android_resource_name("button-primary.bg,v2"), "button_primary_bg_v2");
        assert_eq!(to_android_resource_name("a   b\tc"), "a_bc");
    }

    #[test]
    fn test_leading_dot_and_digits() {
        assert_eq!(to_android_resource_name(".hidden"), "hidden");
        assert_eq!(to_android_resource_name("42 Tile"), "tile");
        assert_eq!(to_android_resource_name(".9patch"), "patch");
    }

    #[test]
    fn test_empty_becomes_untitled() {
        assert_eq!(to_android_resource_name(""), "untitled");
        assert_eq!(to_android_resource_name("★★★"), "untitled");
        assert_eq!(to_android_resource_name("   "), "untitled");
    }
}
