/// Characters a scan may contain, in value order.
const SCAN_CHARACTERS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fixed lookup from scan characters to point values.
///
/// Each of `0-9` and `A-Z` is worth its position in that sequence, so `'0'`
/// is worth 0, `'A'` is worth 10 and `'Z'` is worth 35. A character is
/// upper-cased before the lookup, so any character whose upper-case form is a
/// single table character (`'a'`, but also `'ı'` or `'ſ'`) is accepted.
#[derive(Debug, Clone, Copy)]
pub struct ScanCharacterTable {
    values: [Option<u8>; 128],
}

pub static SCAN_CHARACTER_TABLE: ScanCharacterTable = ScanCharacterTable::new();

impl ScanCharacterTable {
    const fn new() -> Self {
        let mut values = [None; 128];
        let mut i = 0;
        while i < SCAN_CHARACTERS.len() {
            values[SCAN_CHARACTERS[i] as usize] = Some(i as u8);
            i += 1;
        }
        Self { values }
    }

    pub fn global() -> &'static Self {
        &SCAN_CHARACTER_TABLE
    }

    pub fn value_of(&self, character: char) -> Option<u32> {
        let upper = Self::upper_ascii(character)?;
        self.values[upper as usize].map(u32::from)
    }

    fn upper_ascii(character: char) -> Option<u8> {
        if character.is_ascii() {
            return Some(character.to_ascii_uppercase() as u8);
        }
        let mut upper = character.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) if single.is_ascii() => Some(single as u8),
            _ => None,
        }
    }
}
