//! Pure checks for console input. Each returns the parsed value or the reason to re-prompt.

use std::fmt::Display;

pub const MIN_TEXT_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort(usize),
    OnlyDigits,
    MustStartWithLetter,
    NotAnInteger,
    BelowMin(i64),
    AboveMax(i64),
    NotAnOption(Vec<i64>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "This field cannot be empty."),
            ValidationError::TooShort(min) => write!(f, "Enter at least {} characters.", min),
            ValidationError::OnlyDigits => write!(f, "This field cannot contain only digits."),
            ValidationError::MustStartWithLetter => write!(f, "This field must start with a letter."),
            ValidationError::NotAnInteger => write!(f, "Please enter a whole number."),
            ValidationError::BelowMin(min) => write!(f, "Value must be at least {}.", min),
            ValidationError::AboveMax(max) => write!(f, "Value must be at most {}.", max),
            ValidationError::NotAnOption(options) => {
                let options = options
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Choose one of: {}.", options)
            }
        }
    }
}

/// Trimmed free text of at least `MIN_TEXT_LENGTH` characters that is not just a number.
pub fn text(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }
    if input.chars().count() < MIN_TEXT_LENGTH {
        return Err(ValidationError::TooShort(MIN_TEXT_LENGTH));
    }
    if input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::OnlyDigits);
    }
    Ok(input.to_string())
}

/// Like [`text`], and the first character must be alphabetic.
pub fn name(input: &str) -> Result<String, ValidationError> {
    let name = text(input)?;
    match name.chars().next() {
        Some(first) if first.is_alphabetic() => Ok(name),
        _ => Err(ValidationError::MustStartWithLetter),
    }
}

pub fn integer(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger)
}

pub fn integer_between(
    input: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<i64, ValidationError> {
    let value = integer(input)?;
    if let Some(min) = min {
        if value < min {
            return Err(ValidationError::BelowMin(min));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(ValidationError::AboveMax(max));
        }
    }
    Ok(value)
}

pub fn integer_in(input: &str, options: &[i64]) -> Result<i64, ValidationError> {
    let value = integer(input)?;
    if options.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::NotAnOption(options.to_vec()))
    }
}
