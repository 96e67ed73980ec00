use std::fmt;
use std::io::{ErrorKind, Read};

use crate::fits::error::FitsReadError;
use crate::fits::utils::{CARD_SIZE, FITS_BLOCK_SIZE};

const KEYWORD_SIZE: usize = 8;
const HIERARCH_PREFIX: &str = "HIERARCH ";

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub keyword: String,
    pub value: CardValue,
    pub comment: Option<String>,
}

/// Scalar value of a header card.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CardValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Logical(bool),
    #[default]
    Empty,
}

impl CardValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CardValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CardValue::Float(v) => Some(*v),
            CardValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CardValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CardValue::Logical(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CardValue::Empty)
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Integer(v) => write!(f, "{v}"),
            CardValue::Float(v) => write!(f, "{v}"),
            CardValue::Text(s) => f.write_str(s),
            CardValue::Logical(true) => f.write_str("T"),
            CardValue::Logical(false) => f.write_str("F"),
            CardValue::Empty => Ok(()),
        }
    }
}

fn value_from_str(s: &str) -> CardValue {
    if s.is_empty() {
        return CardValue::Empty;
    }
    match s {
        "T" => return CardValue::Logical(true),
        "F" => return CardValue::Logical(false),
        _ => {}
    }
    if let Ok(n) = s.parse::<i64>() {
        return CardValue::Integer(n);
    }
    // Fortran double precision exponents use D instead of E.
    if let Ok(x) = s.replace(['D', 'd'], "E").parse::<f64>() {
        return CardValue::Float(x);
    }
    CardValue::Text(s.to_string())
}

fn parse_comment(tail: &str) -> Option<String> {
    tail.split_once('/')
        .map(|(_, c)| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Splits a quoted string body (opening quote already stripped) into its
/// text and whatever follows the closing quote.
fn parse_quoted(s: &str) -> Result<(String, &str), FitsReadError> {
    let mut text = String::new();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            text.push(c);
            continue;
        }
        if let Some(&(_, '\'')) = chars.peek() {
            chars.next();
            text.push('\'');
            continue;
        }
        text.truncate(text.trim_end().len());
        return Ok((text, &s[i + 1..]));
    }
    Err(FitsReadError::Parse(format!("unterminated string value: '{s}")))
}

fn parse_value(field: &str) -> Result<(CardValue, Option<String>), FitsReadError> {
    let field = field.trim_start();
    if let Some(body) = field.strip_prefix('\'') {
        let (text, tail) = parse_quoted(body)?;
        return Ok((CardValue::Text(text), parse_comment(tail)));
    }
    let (raw, comment) = match field.split_once('/') {
        Some((v, c)) => (v, Some(c.trim().to_string()).filter(|c| !c.is_empty())),
        None => (field, None),
    };
    Ok((value_from_str(raw.trim()), comment))
}

/// Header records are restricted to printable ASCII; anything else is
/// read as `?` so one stray byte cannot hide the rest of the header.
fn printable(chunk: &[u8]) -> String {
    chunk
        .iter()
        .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '?' })
        .collect()
}

fn is_commentary(keyword: &str) -> bool {
    matches!(keyword, "COMMENT" | "HISTORY" | "")
}

impl Card {
    pub fn new(keyword: impl Into<String>, value: CardValue) -> Self {
        Card {
            keyword: keyword.into(),
            value,
            comment: None,
        }
    }

    fn commentary(keyword: &str, text: &str) -> Self {
        let text = text.trim();
        Card {
            keyword: keyword.to_string(),
            value: CardValue::Empty,
            comment: (!text.is_empty()).then(|| text.to_string()),
        }
    }

    /// Parses one 80-column header record.
    pub fn parse(raw: &str) -> Result<Self, FitsReadError> {
        let raw = raw.trim_end();
        if let Some(rest) = raw.strip_prefix(HIERARCH_PREFIX) {
            let (keyword, field) = rest.split_once('=').ok_or_else(|| {
                FitsReadError::Parse(format!("HIERARCH card without value: {raw}"))
            })?;
            let (value, comment) = parse_value(field)?;
            return Ok(Card {
                keyword: keyword.trim().to_string(),
                value,
                comment,
            });
        }
        let split = raw.len().min(KEYWORD_SIZE);
        if !raw.is_char_boundary(split) {
            return Err(FitsReadError::Parse(format!("malformed keyword: {raw}")));
        }
        let (name, rest) = raw.split_at(split);
        let keyword = name.trim_end();
        match rest.strip_prefix('=') {
            Some(field) if !is_commentary(keyword) => {
                let (value, comment) = parse_value(field)?;
                Ok(Card {
                    keyword: keyword.to_string(),
                    value,
                    comment,
                })
            }
            _ => Ok(Card::commentary(keyword, rest)),
        }
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::new(String::new(), CardValue::Empty)
    }
}

/// Ordered list of cards from one header unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Header { cards: Vec::new() }
    }

    /// First card whose keyword matches `name`, ignoring ASCII case.
    pub fn get_card(&self, name: &str) -> Option<&Card> {
        self.cards
            .iter()
            .find(|c| c.keyword.eq_ignore_ascii_case(name))
    }

    /// Value of the first valued card named `name`. Commentary and
    /// undefined cards never match.
    pub fn get(&self, name: &str) -> Option<&CardValue> {
        self.cards
            .iter()
            .filter(|c| !c.value.is_empty())
            .find(|c| c.keyword.eq_ignore_ascii_case(name))
            .map(|c| &c.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Extends a long string value that ends in `&` with a `CONTINUE`
    /// record. A stray or malformed `CONTINUE` is kept as commentary.
    fn append_continue(&mut self, raw: &str) {
        let field = raw[KEYWORD_SIZE..].trim_start();
        let continuable = matches!(
            self.cards.last(),
            Some(Card { value: CardValue::Text(prev), .. }) if prev.ends_with('&')
        );
        let parsed = match field.strip_prefix('\'') {
            Some(body) if continuable => parse_quoted(body),
            _ => {
                self.cards.push(Card::commentary("CONTINUE", field));
                return;
            }
        };
        let (more, tail) = match parsed {
            Ok(parts) => parts,
            Err(e) => {
                log::debug!("keeping CONTINUE card as commentary: {e}");
                self.cards.push(Card::commentary("CONTINUE", field));
                return;
            }
        };
        if let Some(Card {
            value: CardValue::Text(prev),
            comment,
            ..
        }) = self.cards.last_mut()
        {
            prev.pop();
            prev.push_str(&more);
            if let Some(extra) = parse_comment(tail) {
                *comment = Some(match comment.take() {
                    Some(c) => format!("{c} {extra}"),
                    None => extra,
                });
            }
        }
    }

    /// Reads header blocks up to and including the one holding `END`.
    pub fn read_from_file<R: Read>(reader: &mut R) -> Result<Self, FitsReadError> {
        let mut header = Header::new();
        let mut block = [0u8; FITS_BLOCK_SIZE];
        loop {
            reader.read_exact(&mut block).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => {
                    FitsReadError::Parse("header ended before END card".into())
                }
                _ => FitsReadError::Io(e),
            })?;
            for chunk in block.chunks_exact(CARD_SIZE) {
                let raw = printable(chunk);
                let keyword = raw[..KEYWORD_SIZE].trim_end();
                match keyword {
                    "END" => return Ok(header),
                    "CONTINUE" => header.append_continue(&raw),
                    _ => {
                        // A bad card only costs its own value.
                        let card = Card::parse(&raw).unwrap_or_else(|e| {
                            log::debug!("keeping unparsable {keyword} card without a value: {e}");
                            Card::commentary(keyword, &raw[KEYWORD_SIZE..])
                        });
                        header.cards.push(card);
                    }
                }
            }
        }
    }
}

impl FromIterator<Card> for Header {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Header {
            cards: iter.into_iter().collect(),
        }
    }
}
