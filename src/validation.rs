//! Employee form validation.
//!
//! Checks run in a fixed order (code, name, password) and every failure is
//! collected. Failures are returned as messages, not errors; only a failing
//! duplicate lookup makes [`validate`] return `Err`.

use tracing::debug;

use crate::error::Result;
use crate::messages::{self, MessageKey};
use crate::models::EmployeeForm;

/// Counts stored employees with a given code.
pub trait DuplicateLookup {
    /// Number of stored records using `code`; 0 when there are none.
    fn count_by_code(&self, code: &str) -> impl Future<Output = Result<u64>> + Send;
}

/// Code must be present and non-empty.
pub fn check_code(code: Option<&str>) -> Option<MessageKey> {
    is_blank(code).then_some(MessageKey::NoCode)
}

/// Name must be present and non-empty.
pub fn check_name(name: Option<&str>) -> Option<MessageKey> {
    is_blank(name).then_some(MessageKey::NoName)
}

/// Password must be present and non-empty when `required`.
pub fn check_password(password: Option<&str>, required: bool) -> Option<MessageKey> {
    (required && is_blank(password)).then_some(MessageKey::NoPassword)
}

/// Whether any stored employee already uses `code`.
pub async fn code_exists<L: DuplicateLookup>(lookup: &L, code: &str) -> Result<bool> {
    let count = lookup.count_by_code(code).await?;
    debug!("Found {count} employees with code {code}");
    Ok(count > 0)
}

/// Run all checks and return the failing message keys in check order.
pub async fn validate_keys<L: DuplicateLookup>(
    lookup: &L,
    form: &EmployeeForm,
    check_code_duplicate: bool,
    check_password_presence: bool,
) -> Result<Vec<MessageKey>> {
    let mut failures = Vec::new();

    let code = form.code.as_deref();
    match (check_code(code), code) {
        (Some(key), _) => failures.push(key),
        (None, Some(code)) if check_code_duplicate => {
            if code_exists(lookup, code).await? {
                failures.push(MessageKey::CodeExists);
            }
        }
        _ => {}
    }

    failures.extend(check_name(form.name.as_deref()));
    failures.extend(check_password(form.password.as_deref(), check_password_presence));

    Ok(failures)
}

/// Run all checks and return the failure messages in check order.
///
/// An empty list means the form may be saved.
pub async fn validate<L: DuplicateLookup>(
    lookup: &L,
    form: &EmployeeForm,
    check_code_duplicate: bool,
    check_password_presence: bool,
) -> Result<Vec<String>> {
    let keys = validate_keys(lookup, form, check_code_duplicate, check_password_presence).await?;
    Ok(keys.into_iter().map(|key| messages::resolve(key).to_string()).collect())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}
