use std::fmt;

/// Row/column displacement from a source range origin to its paste origin.
/// Computed once per copy operation and applied to every relative reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub rows: i32,
    pub cols: i32,
}

impl Delta {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn inverse(self) -> Self {
        Self {
            rows: -self.rows,
            cols: -self.cols,
        }
    }
}

/// One endpoint of a formula reference, as written (`$B10`, `AA$34`,
/// `'Sheet 1'!C5`). The sheet qualifier is kept verbatim, including the
/// trailing `!`; it is never retargeted, only passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub sheet_prefix: Option<String>,
    pub col: u32,
    pub col_abs: bool,
    pub row: u32,
    pub row_abs: bool,
}

impl CellRef {
    /// Parse a complete reference. Returns `None` unless the whole input is
    /// exactly one endpoint.
    pub fn parse(text: &str) -> Option<CellRef> {
        let chars: Vec<char> = text.chars().collect();
        let (parsed, end) = parse_endpoint_at(&chars, 0)?;
        (end == chars.len()).then_some(parsed)
    }

    /// Shift by `delta`, leaving absolute axes unchanged. Results are clamped
    /// to row/column 1 rather than producing an invalid reference.
    pub fn translate(&self, delta: Delta) -> CellRef {
        let col = if self.col_abs {
            self.col
        } else {
            shift_clamped(self.col, delta.cols)
        };
        let row = if self.row_abs {
            self.row
        } else {
            shift_clamped(self.row, delta.rows)
        };
        CellRef {
            sheet_prefix: self.sheet_prefix.clone(),
            col,
            col_abs: self.col_abs,
            row,
            row_abs: self.row_abs,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.sheet_prefix {
            f.write_str(prefix)?;
        }
        if self.col_abs {
            f.write_str("$")?;
        }
        f.write_str(&column_letters(self.col))?;
        if self.row_abs {
            f.write_str("$")?;
        }
        write!(f, "{}", self.row)
    }
}

fn shift_clamped(value: u32, delta: i32) -> u32 {
    let shifted = value as i64 + delta as i64;
    shifted.max(1) as u32
}

/// Bijective base-26 column letters to index (A=1, Z=26, AA=27).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }
    Some(col)
}

pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        letters.push((b'A' + ((index - 1) % 26) as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

pub fn cell_address(col: u32, row: u32) -> String {
    format!("{}{}", column_letters(col), row)
}

/// Attempt to read one reference endpoint starting at `start`:
/// `sheetPrefix? "$"? LETTERS{1,3} "$"? DIGITS+`. Returns the endpoint and
/// the index one past its final character. Token boundaries are the caller's
/// concern.
pub(crate) fn parse_endpoint_at(chars: &[char], start: usize) -> Option<(CellRef, usize)> {
    let mut pos = start;
    let sheet_prefix = parse_sheet_prefix(chars, &mut pos);

    let col_abs = chars.get(pos) == Some(&'$');
    if col_abs {
        pos += 1;
    }
    let letters_start = pos;
    while chars.get(pos).is_some_and(|c| c.is_ascii_alphabetic()) {
        pos += 1;
    }
    let letter_count = pos - letters_start;
    if letter_count == 0 || letter_count > 3 {
        return None;
    }
    let letters: String = chars[letters_start..pos].iter().collect();

    let row_abs = chars.get(pos) == Some(&'$');
    if row_abs {
        pos += 1;
    }
    let digits_start = pos;
    while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }
    let row: u32 = chars[digits_start..pos]
        .iter()
        .collect::<String>()
        .parse()
        .ok()?;
    if row == 0 {
        return None;
    }

    let col = column_index(&letters)?;
    Some((
        CellRef {
            sheet_prefix,
            col,
            col_abs,
            row,
            row_abs,
        },
        pos,
    ))
}

/// Recognize `'Quoted Sheet'!` (with `''` escapes) or `BareSheet!` at `*pos`
/// and advance past it. The returned prefix includes the `!`.
fn parse_sheet_prefix(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    if chars.get(start) == Some(&'\'') {
        let mut i = start + 1;
        loop {
            match chars.get(i) {
                Some('\'') if chars.get(i + 1) == Some(&'\'') => i += 2,
                Some('\'') => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
                None => return None,
            }
        }
        if chars.get(i) == Some(&'!') {
            *pos = i + 1;
            return Some(chars[start..=i].iter().collect());
        }
        return None;
    }

    if !chars
        .get(start)
        .is_some_and(|c| c.is_alphanumeric() || *c == '_')
    {
        return None;
    }
    let mut i = start;
    while chars
        .get(i)
        .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
    {
        i += 1;
    }
    if chars.get(i) == Some(&'!') {
        *pos = i + 1;
        return Some(chars[start..=i].iter().collect());
    }
    None
}
