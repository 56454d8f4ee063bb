//! ASCII folding for Vietnamese text
//!
//! Email local parts are derived from given names, which carry tone marks
//! and diacritics. Each character of the supported alphabet maps to exactly
//! one lowercase ASCII letter; folding an already-folded string is a no-op.

/// All tone/diacritic variants per base vowel, lower and upper case.
const A_VARIANTS: &str = "áàảãạăắằẳẵặâấầẩẫậÁÀẢÃẠĂẮẰẲẴẶÂẤẦẨẪẬ";
const E_VARIANTS: &str = "éèẻẽẹêếềểễệÉÈẺẼẸÊẾỀỂỄỆ";
const I_VARIANTS: &str = "íìỉĩịÍÌỈĨỊ";
const O_VARIANTS: &str = "óòỏõọôốồổỗộơớờởỡợÓÒỎÕỌÔỐỒỔỖỘƠỚỜỞỠỢ";
const U_VARIANTS: &str = "úùủũụưứừửữựÚÙỦŨỤƯỨỪỬỮỰ";
const Y_VARIANTS: &str = "ýỳỷỹỵÝỲỶỸỴ";
const D_VARIANTS: &str = "đĐ";

/// Fold a single character to its base lowercase ASCII letter.
///
/// ASCII letters are lowercased; characters outside the supported alphabet
/// pass through unchanged.
pub fn fold_char(c: char) -> char {
    if A_VARIANTS.contains(c) {
        'a'
    } else if E_VARIANTS.contains(c) {
        'e'
    } else if I_VARIANTS.contains(c) {
        'i'
    } else if O_VARIANTS.contains(c) {
        'o'
    } else if U_VARIANTS.contains(c) {
        'u'
    } else if Y_VARIANTS.contains(c) {
        'y'
    } else if D_VARIANTS.contains(c) {
        'd'
    } else {
        c.to_ascii_lowercase()
    }
}

/// Fold a string to lowercase ASCII.
pub fn fold_ascii(input: &str) -> String {
    input.chars().map(fold_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("An", "an")]
    #[test_case("Dũng", "dung")]
    #[test_case("Hương", "huong")]
    #[test_case("Đặng", "dang")]
    #[test_case("Nguyễn", "nguyen")]
    #[test_case("Thị", "thi")]
    #[test_case("Phúc", "phuc")]
    #[test_case("ỵỹỷỳý", "yyyyy")]
    fn folds_to_base_letters(input: &str, expected: &str) {
        assert_eq!(fold_ascii(input), expected);
    }

    #[test]
    fn folding_is_idempotent() {
        let inputs = ["Nguyễn Văn Dũng", "Trần Thị Hương", "đường Điện Biên Phủ"];
        for input in inputs {
            let once = fold_ascii(input);
            assert_eq!(fold_ascii(&once), once, "refolding changed: {input}");
        }
    }

    #[test]
    fn folding_is_total_over_the_alphabet() {
        let alphabet = [
            A_VARIANTS, E_VARIANTS, I_VARIANTS, O_VARIANTS, U_VARIANTS, Y_VARIANTS, D_VARIANTS,
        ]
        .concat();
        for c in alphabet.chars() {
            let folded = fold_char(c);
            assert!(
                folded.is_ascii_lowercase(),
                "{c} folded to non-ASCII {folded}"
            );
        }
    }

    #[test]
    fn non_alphabet_characters_pass_through() {
        assert_eq!(fold_ascii("sv12345."), "sv12345.");
        assert_eq!(fold_ascii("a b-c"), "a b-c");
    }
}
