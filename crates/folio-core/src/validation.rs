//! # Validation Module
//!
//! Typed form descriptors and the validation rule table.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Validation                                    │
//! │                                                                         │
//! │  FormSchema ("register")                                                │
//! │  ├── FieldSpec name       [Required]                                    │
//! │  ├── FieldSpec email      [Required, Email]                             │
//! │  ├── FieldSpec password   [Required, MinLength(6)]                      │
//! │  └── FieldSpec passwordConfirm [Required, MatchesField(password)]       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate(values) ──► first failing rule per field ──► FieldErrors      │
//! │                                                                         │
//! │  Each Rule carries its own user-facing message, so the table is the     │
//! │  single place where wording and predicates live together.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{login_form, FormValues};
//!
//! let mut values = FormValues::new();
//! values.insert("email".into(), "not-an-email".into());
//! values.insert("password".into(), "secret".into());
//!
//! let errors = login_form().validate(&values).unwrap_err();
//! assert_eq!(errors.message_for("email"), Some("올바른 이메일 형식이 아닙니다."));
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{FieldErrors, ValidationError};
use crate::money::Money;
use crate::types::{BookDraft, Category};
use crate::{MAX_BOOK_PRICE, MAX_BOOK_STOCK, MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw form input keyed by field name.
pub type FormValues = BTreeMap<String, String>;

// =============================================================================
// Rule Table
// =============================================================================

/// A single validation rule and the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    /// Value must be non-blank.
    Required { message: &'static str },
    /// Value must look like `local@domain.tld`.
    Email { message: &'static str },
    /// Value must have at least `min` characters.
    MinLength { min: usize, message: &'static str },
    /// Value must equal the value of another field.
    MatchesField {
        other: &'static str,
        message: &'static str,
    },
    /// Value must parse as an integer.
    Integer { message: &'static str },
    /// Value must parse as an integer within `min..=max`.
    Range {
        min: i64,
        max: i64,
        message: &'static str,
    },
    /// Value must be a `YYYY-MM-DD` date.
    Date { message: &'static str },
    /// Value must be one of the catalog categories.
    Category { message: &'static str },
}

impl Rule {
    pub const fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::Email { message }
            | Rule::MinLength { message, .. }
            | Rule::MatchesField { message, .. }
            | Rule::Integer { message }
            | Rule::Range { message, .. }
            | Rule::Date { message }
            | Rule::Category { message } => *message,
        }
    }

    /// Whether the rule applies to a blank value.
    ///
    /// Only presence and cross-field checks look at blank input; format
    /// rules stay quiet until something has been typed.
    const fn checks_blank(&self) -> bool {
        matches!(self, Rule::Required { .. } | Rule::MatchesField { .. })
    }

    /// Evaluates the rule against `value`, with the whole form for context.
    pub fn passes(&self, value: &str, form: &FormValues) -> bool {
        match self {
            Rule::Required { .. } => !value.trim().is_empty(),
            Rule::Email { .. } => is_email(value),
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::MatchesField { other, .. } => {
                form.get(*other).map(String::as_str).unwrap_or_default() == value
            }
            Rule::Integer { .. } => parse_int(value).is_some(),
            Rule::Range { min, max, .. } => {
                parse_int(value).is_some_and(|n| (*min..=*max).contains(&n))
            }
            Rule::Date { .. } => parse_date(value).is_some(),
            Rule::Category { .. } => value.parse::<Category>().is_ok(),
        }
    }
}

// =============================================================================
// Form Descriptors
// =============================================================================

/// The kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    Select,
}

/// One field of a form: its name, label, input kind and rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, input: InputKind) -> Self {
        FieldSpec {
            name,
            label,
            input,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the message of the first failing rule, if any.
    pub fn check(&self, form: &FormValues) -> Option<&'static str> {
        let value = form.get(self.name).map(String::as_str).unwrap_or_default();
        let blank = value.trim().is_empty();

        self.rules
            .iter()
            .filter(|r| !blank || r.checks_blank())
            .find(|r| !r.passes(value, form))
            .map(Rule::message)
    }
}

/// A named, ordered list of field descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates every field, collecting one message per failing field.
    pub fn validate(&self, form: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            if let Some(message) = field.check(form) {
                errors.push(field.name, message);
            }
        }
        errors.into_result()
    }
}

// =============================================================================
// Schemas
// =============================================================================

const EMAIL_REQUIRED: &str = "이메일을 입력해주세요.";
const EMAIL_FORMAT: &str = "올바른 이메일 형식이 아닙니다.";
const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요.";
const NAME_REQUIRED: &str = "이름을 입력해주세요.";

/// Minimum password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_field() -> FieldSpec {
    FieldSpec::new("email", "이메일", InputKind::Email)
        .rule(Rule::Required {
            message: EMAIL_REQUIRED,
        })
        .rule(Rule::Email {
            message: EMAIL_FORMAT,
        })
}

fn required_text(name: &'static str, label: &'static str, message: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, InputKind::Text).rule(Rule::Required { message })
}

/// The login form: email and password.
pub fn login_form() -> FormSchema {
    FormSchema {
        name: "login",
        fields: vec![
            email_field(),
            FieldSpec::new("password", "비밀번호", InputKind::Password).rule(Rule::Required {
                message: PASSWORD_REQUIRED,
            }),
        ],
    }
}

/// The registration form with password confirmation.
pub fn register_form() -> FormSchema {
    FormSchema {
        name: "register",
        fields: vec![
            required_text("name", "이름", NAME_REQUIRED),
            email_field(),
            FieldSpec::new("password", "비밀번호", InputKind::Password)
                .rule(Rule::Required {
                    message: PASSWORD_REQUIRED,
                })
                .rule(Rule::MinLength {
                    min: MIN_PASSWORD_LENGTH,
                    message: "비밀번호는 최소 6자 이상이어야 합니다.",
                }),
            FieldSpec::new("passwordConfirm", "비밀번호 확인", InputKind::Password)
                .rule(Rule::Required {
                    message: "비밀번호 확인을 입력해주세요.",
                })
                .rule(Rule::MatchesField {
                    other: "password",
                    message: "비밀번호가 일치하지 않습니다.",
                }),
        ],
    }
}

/// The account page profile form. Email is shown but not editable.
pub fn profile_form() -> FormSchema {
    FormSchema {
        name: "profile",
        fields: vec![required_text("name", "이름", NAME_REQUIRED)],
    }
}

/// The admin add/edit book form.
pub fn book_form() -> FormSchema {
    FormSchema {
        name: "book",
        fields: vec![
            required_text("title", "도서명", "도서명을 입력해주세요."),
            required_text("author", "저자", "저자를 입력해주세요."),
            required_text("publisher", "출판사", "출판사를 입력해주세요."),
            FieldSpec::new("category", "카테고리", InputKind::Select)
                .rule(Rule::Required {
                    message: "카테고리를 선택해주세요.",
                })
                .rule(Rule::Category {
                    message: "카테고리를 선택해주세요.",
                }),
            FieldSpec::new("price", "가격", InputKind::Number)
                .rule(Rule::Required {
                    message: "가격을 입력해주세요.",
                })
                .rule(Rule::Range {
                    min: 0,
                    max: MAX_BOOK_PRICE,
                    message: "가격은 0원 이상 10,000,000원 이하여야 합니다.",
                }),
            FieldSpec::new("stock", "재고", InputKind::Number)
                .rule(Rule::Required {
                    message: "재고를 입력해주세요.",
                })
                .rule(Rule::Range {
                    min: 0,
                    max: i64::from(MAX_BOOK_STOCK),
                    message: "재고는 0 이상 100,000 이하의 숫자여야 합니다.",
                }),
            required_text("isbn", "ISBN", "ISBN을 입력해주세요."),
            FieldSpec::new("publishDate", "출간일", InputKind::Date)
                .rule(Rule::Required {
                    message: "출간일을 입력해주세요.",
                })
                .rule(Rule::Date {
                    message: "출간일은 YYYY-MM-DD 형식이어야 합니다.",
                }),
            FieldSpec::new("image", "이미지", InputKind::Text),
            FieldSpec::new("description", "설명", InputKind::TextArea).rule(Rule::Required {
                message: "설명을 입력해주세요.",
            }),
        ],
    }
}

/// The review form on the book detail page.
pub fn review_form() -> FormSchema {
    FormSchema {
        name: "review",
        fields: vec![
            FieldSpec::new("rating", "평점", InputKind::Number).rule(Rule::Range {
                min: i64::from(MIN_RATING),
                max: i64::from(MAX_RATING),
                message: "평점은 1에서 5 사이여야 합니다.",
            }),
            FieldSpec::new("text", "리뷰", InputKind::TextArea).rule(Rule::Required {
                message: "리뷰 내용을 입력해주세요.",
            }),
        ],
    }
}

/// Validates the admin book form and converts it into a draft.
///
/// Numeric fields are parsed the way the admin page parses them: leading
/// and trailing whitespace is ignored and the value must be a whole number.
pub fn parse_book_form(form: &FormValues) -> Result<BookDraft, FieldErrors> {
    book_form().validate(form)?;

    let text = |name: &str| form.get(name).map(|v| v.trim().to_string()).unwrap_or_default();

    // The schema has already proven every parse below succeeds; the
    // fallbacks only keep this function total.
    let mut errors = FieldErrors::new();
    let category = text("category").parse::<Category>().map_err(|e| {
        errors.push("category", e.to_string());
    });
    let price = parse_int(&text("price"));
    let stock = parse_int(&text("stock")).and_then(|n| u32::try_from(n).ok());
    let publish_date = parse_date(&text("publishDate"));

    match (category, price, stock, publish_date) {
        (Ok(category), Some(price), Some(stock), Some(publish_date)) => Ok(BookDraft {
            title: text("title"),
            author: text("author"),
            publisher: text("publisher"),
            category,
            price: Money::from_won(price),
            stock,
            isbn: text("isbn"),
            publish_date,
            description: text("description"),
            image: text("image"),
        }),
        _ => {
            if errors.is_empty() {
                errors.push("stock", "재고는 0 이상 100,000 이하의 숫자여야 합니다.");
            }
            Err(errors)
        }
    }
}

// =============================================================================
// Scalar Validators
// =============================================================================

/// Validates a review rating.
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: i64::from(MIN_RATING),
            max: i64::from(MAX_RATING),
        });
    }
    Ok(())
}

/// Validates review text: it must contain something besides whitespace.
pub fn validate_review_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "text".to_string(),
        });
    }
    Ok(())
}

/// Validates a login email: only presence is checked by the session store.
pub fn validate_login_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }
    Ok(())
}

/// Checks the `local@domain.tld` shape accepted by the login and register
/// forms.
///
/// ## Rules
/// - local part: letters, digits, `.` `_` `%` `+` `-`
/// - domain: letters, digits, `.` `-`, followed by `.` and a TLD of two or
///   more letters
///
/// ## Example
/// ```rust
/// use folio_core::validation::is_email;
///
/// assert!(is_email("reader@example.com"));
/// assert!(!is_email("reader@localhost"));
/// ```
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
