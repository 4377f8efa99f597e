//! Validators applied to typed answers.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("valid regex")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid regex"));

static PHONE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()\-\s]").expect("valid regex"));

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)*$").expect("valid regex"));

/// Format checks a field can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Color,
    Email,
    Url,
    Tel,
    Slug,
    Number,
}

impl Validation {
    /// Checks `input`, returning the message shown to the user on failure.
    pub fn check(&self, input: &str) -> Result<(), String> {
        let valid = match self {
            Validation::Color => HEX_COLOR.is_match(input),
            Validation::Email => EMAIL.is_match(input),
            Validation::Url => is_url(input),
            Validation::Tel => PHONE.is_match(&PHONE_PUNCTUATION.replace_all(input, "")),
            Validation::Slug => SLUG.is_match(input),
            Validation::Number => input.trim().parse::<f64>().is_ok_and(f64::is_finite),
        };
        if valid {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Validation::Color => "Invalid Hex Color",
            Validation::Email => "Invalid Email",
            Validation::Url => "Invalid URL",
            Validation::Tel => "Invalid Phone Number",
            Validation::Slug => "Only Alphanumeric, dashes, and underscores allowed",
            Validation::Number => "Invalid Number",
        }
    }
}

// Scheme-less hosts such as `example.com/docs` are accepted too.
fn is_url(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(input) {
        Ok(url) => url.has_host(),
        Err(_) => Url::parse(&format!("https://{input}"))
            .ok()
            .and_then(|url| url.host_str().map(|host| host.contains('.')))
            .unwrap_or(false),
    }
}

/// Runs the required check and then the format check on a text answer.
/// Empty optional answers skip the format check.
pub fn check_text(input: &str, required: bool, validation: Option<Validation>) -> Result<(), String> {
    if input.trim().is_empty() {
        return if required { Err("This field is required".to_string()) } else { Ok(()) };
    }
    match validation {
        Some(validation) => validation.check(input),
        None => Ok(()),
    }
}
