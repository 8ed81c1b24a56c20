/// Display state of one box in the letter grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Filled(char),
    /// A vowel shown faintly to help after repeated misses.
    Hint(char),
    Blank,
}

/// Wrong submissions on a word before its vowels are shown.
pub const HINT_AFTER_FAILURES: u32 = 2;

pub fn is_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn reveals_hint(letter: char, failed_attempts: u32) -> bool {
    failed_attempts >= HINT_AFTER_FAILURES && is_vowel(letter)
}

/// One cell per letter of `word`. Typed letters win over hints.
pub fn cells(word: &str, input: &str, failed_attempts: u32) -> Vec<Cell> {
    let mut typed = input.chars();
    word.chars()
        .map(|letter| match typed.next() {
            Some(ch) => Cell::Filled(ch),
            None if reveals_hint(letter, failed_attempts) => Cell::Hint(letter),
            None => Cell::Blank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels() {
        assert!(is_vowel('a'));
        assert!(is_vowel('U'));
        assert!(!is_vowel('y'));
        assert!(!is_vowel('t'));
    }

    #[test]
    fn blank_grid_before_hints() {
        assert_eq!(cells("cat", "", 1), vec![Cell::Blank; 3]);
    }

    #[test]
    fn vowels_revealed_after_two_misses() {
        assert_eq!(
            cells("house", "", 2),
            vec![
                Cell::Blank,
                Cell::Hint('o'),
                Cell::Hint('u'),
                Cell::Blank,
                Cell::Hint('e'),
            ]
        );
    }

    #[test]
    fn typed_letters_cover_hints() {
        assert_eq!(
            cells("house", "hx", 3),
            vec![
                Cell::Filled('h'),
                Cell::Filled('x'),
                Cell::Hint('u'),
                Cell::Blank,
                Cell::Hint('e'),
            ]
        );
    }
}
