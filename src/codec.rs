//! Fragment codec.
//!
//! A task list is persisted as a query-shaped URL fragment:
//!
//! ```text
//! ?s=<bitmask>&0=<text0>&1=<text1>&...
//! ```
//!
//! `s` packs every checked flag into one non-negative integer, task 0 in the
//! least significant bit. The numbered keys are positional ordinals only;
//! decode follows the order pairs appear in the string and ignores the key
//! values. Text is form-urlencoded, so spaces become `+` and characters that
//! would break the pair structure are percent-encoded.
//!
//! The bitmask is kept in decimal with arbitrary precision, so lists longer
//! than 64 tasks encode without overflow.

use url::{form_urlencoded, Url};

use crate::error::{Error, Result};
use crate::task::{Task, TaskList};

/// Key carrying the checked bitmask.
pub const BITMASK_KEY: &str = "s";

/// Encode a task list into a fragment string (without the leading `#`).
pub fn encode(tasks: &TaskList) -> String {
    // The suffix starts after the `?` so the first pair gets no separator.
    let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    serializer.append_pair(BITMASK_KEY, &checked_bitmask(tasks).to_string());
    for (ordinal, task) in tasks.iter().enumerate() {
        serializer.append_pair(&ordinal.to_string(), &task.text);
    }
    serializer.finish()
}

/// Attach `fragment` to `base`. An empty fragment leaves the URL without one.
pub fn with_fragment(base: &Url, fragment: &str) -> Url {
    let mut url = base.clone();
    url.set_fragment((!fragment.is_empty()).then_some(fragment));
    url
}

/// Decode a fragment into a task list.
///
/// Accepts an optional leading `#` and `?`. An empty fragment is an empty
/// list. A missing, duplicated or non-numeric `s` is a [`Error::Parse`].
pub fn decode(fragment: &str) -> Result<TaskList> {
    let query = fragment.strip_prefix('#').unwrap_or(fragment);
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return Ok(TaskList::new());
    }

    let mut bitmask: Option<Decimal> = None;
    let mut texts = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() && value.is_empty() {
            continue;
        }
        if key == BITMASK_KEY {
            if bitmask.is_some() {
                return Err(Error::Parse(format!(
                    "bitmask key '{BITMASK_KEY}' appears more than once"
                )));
            }
            bitmask = Some(Decimal::parse(&value)?);
            continue;
        }
        texts.push(value.into_owned());
    }

    let mut bitmask = match bitmask {
        Some(bitmask) => bitmask,
        None if texts.is_empty() => return Ok(TaskList::new()),
        None => {
            return Err(Error::Parse(format!(
                "missing bitmask key '{BITMASK_KEY}'"
            )))
        }
    };

    let tasks: TaskList = texts
        .into_iter()
        .map(|text| Task::new(text, bitmask.halve()))
        .collect();

    if !bitmask.is_zero() {
        tracing::debug!(
            remaining = %bitmask,
            tasks = tasks.len(),
            "bitmask has bits beyond the last task; ignoring them"
        );
    }

    Ok(tasks)
}

/// Extract the fragment from user input.
///
/// Full URLs yield their fragment (empty when they have none). Anything
/// that does not parse as an absolute URL is taken as a fragment, with an
/// optional leading `#` removed.
pub fn fragment_from_input(input: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => url.fragment().unwrap_or_default().to_string(),
        Err(_) => input.strip_prefix('#').unwrap_or(input).to_string(),
    }
}

/// Pack the checked flags into the bitmask: task `i` contributes `2^i`.
pub fn checked_bitmask(tasks: &TaskList) -> Decimal {
    // Horner's rule from the highest position down gives the same sum as
    // accumulating weights 1, 2, 4, ... from position 0.
    let mut sum = Decimal::zero();
    for task in tasks.iter().rev() {
        sum.double_add(task.checked);
    }
    sum
}

/// Non-negative decimal integer of unbounded size.
///
/// Digits are stored least significant first with no trailing zero digits,
/// so zero is the empty vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    digits: Vec<u8>,
}

impl Decimal {
    pub fn zero() -> Self {
        Self { digits: Vec::new() }
    }

    /// Parse a string of ASCII digits. Leading zeros are allowed.
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::Parse("bitmask is empty".to_string()));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Parse(format!(
                "bitmask '{value}' is not a non-negative integer"
            )));
        }
        let mut digits: Vec<u8> = value.bytes().rev().map(|b| b - b'0').collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Ok(Self { digits })
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// `self = self * 2 + bit`
    pub fn double_add(&mut self, bit: bool) {
        let mut carry = u8::from(bit);
        for digit in &mut self.digits {
            let value = *digit * 2 + carry;
            *digit = value % 10;
            carry = value / 10;
        }
        if carry > 0 {
            self.digits.push(carry);
        }
    }

    /// Floor-divide by two, returning the bit shifted out.
    pub fn halve(&mut self) -> bool {
        let mut remainder = 0u8;
        for digit in self.digits.iter_mut().rev() {
            let value = remainder * 10 + *digit;
            *digit = value / 2;
            remainder = value % 2;
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        remainder == 1
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        let text: String = self
            .digits
            .iter()
            .rev()
            .map(|digit| char::from(b'0' + digit))
            .collect();
        f.write_str(&text)
    }
}
