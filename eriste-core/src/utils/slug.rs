//! URL slug derivation for catalog names.

use compact_str::CompactString;

/// Derive a URL slug from a display name.
///
/// Turkish letters fold to their ASCII neighbours so `Şehriye Çorbası`
/// becomes `sehriye-corbasi`; every other non-alphanumeric run collapses
/// into a single dash.  `İ` is folded by hand because its Unicode
/// lowercasing produces `i` plus a combining dot.
pub fn slugify(name: &str) -> CompactString {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = true;
    for c in name.chars() {
        let folded = match c {
            'ş' | 'Ş' => 's',
            'ı' | 'İ' => 'i',
            'ç' | 'Ç' => 'c',
            'ğ' | 'Ğ' => 'g',
            'ö' | 'Ö' => 'o',
            'ü' | 'Ü' => 'u',
            other => other,
        };
        if folded.is_ascii_alphanumeric() {
            slug.push(folded.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    CompactString::from(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_turkish_letters() {
        assert_eq!(slugify("Ev Yapımı Erişte"), "ev-yapimi-eriste");
        assert_eq!(slugify("Şehriye Çorbası"), "sehriye-corbasi");
        assert_eq!(slugify("Kıymalı Gözleme"), "kiymali-gozleme");
        assert_eq!(slugify("İzmir Üzümü"), "izmir-uzumu");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("  çok   güzel  "), "cok-guzel");
        assert_eq!(slugify("tam & yarım"), "tam-yarim");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("500g Paket (No 5)"), "500g-paket-no-5");
    }

    #[test]
    fn unusable_names_produce_an_empty_slug() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }
}
