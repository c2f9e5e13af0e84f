//! Conversion between stored employee records and form records.
//!
//! [`to_persistence`] and [`to_presentation`] translate the categorical flags
//! between their text and integer encodings. [`copy_all_fields`] is a raw
//! copy that moves form codes into the record untranslated; existing update
//! paths depend on that encoding, so the two are kept separate.

use crate::models::{DeleteFlag, EmployeeForm, EmployeeRecord, Role};

/// Build a stored record from a form, translating role and delete flag.
///
/// Absent flags stay absent. Absent code, name and password become empty strings.
pub fn to_persistence(form: EmployeeForm) -> EmployeeRecord {
    EmployeeRecord {
        id: form.id,
        code: form.code.unwrap_or_default(),
        name: form.name.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
        role: form.role.map(|code| Role::from_form(code).as_persisted().to_string()),
        created_at: form.created_at,
        updated_at: form.updated_at,
        delete_flag: form
            .delete_flag
            .map(|code| DeleteFlag::from_form(code).as_persisted().to_string()),
    }
}

/// Build a form from a stored record, if there is one.
pub fn to_presentation(record: Option<EmployeeRecord>) -> Option<EmployeeForm> {
    record.map(record_to_form)
}

/// Build forms for a list of stored records, keeping their order.
pub fn to_presentation_list<I>(records: I) -> Vec<EmployeeForm>
where
    I: IntoIterator<Item = EmployeeRecord>,
{
    records.into_iter().map(record_to_form).collect()
}

/// Overwrite every field of `dest` with the matching field of `src`.
///
/// Role and delete flag are copied as the raw form codes, not translated.
pub fn copy_all_fields(dest: &mut EmployeeRecord, src: &EmployeeForm) {
    dest.id = src.id;
    dest.code = src.code.clone().unwrap_or_default();
    dest.name = src.name.clone().unwrap_or_default();
    dest.password = src.password.clone().unwrap_or_default();
    dest.role = src.role.map(|code| code.to_string());
    dest.created_at = src.created_at;
    dest.updated_at = src.updated_at;
    dest.delete_flag = src.delete_flag.map(|code| code.to_string());
}

/// Build a form from a stored record, translating role and delete flag.
///
/// Absent flags stay absent.
pub fn record_to_form(record: EmployeeRecord) -> EmployeeForm {
    EmployeeForm {
        id: record.id,
        code: Some(record.code),
        name: Some(record.name),
        password: Some(record.password),
        role: record.role.as_deref().map(|value| Role::from_persisted(value).as_form()),
        created_at: record.created_at,
        updated_at: record.updated_at,
        delete_flag: record
            .delete_flag
            .as_deref()
            .map(|value| DeleteFlag::from_persisted(value).as_form()),
    }
}
