//! Rule evaluator for the submitted user field set.
//!
//! Evaluation runs in three steps:
//! 1. normalize the raw values (type check, trim, empty string -> not provided);
//! 2. compute the set of present fields and apply the requiredness and shape rules;
//! 3. check uniqueness of `email` and `nickname`, excluding the record being updated.
//!
//! Nothing is written here.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
    users::{user_models::UserFieldsDto, user_orm::UserOrm},
    validators::{ValidationChecks, ValidationError},
};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const NICKNAME: &str = "nickname";

/// Fields of which at least one must be present in an update.
pub const PRESENCE_GROUP: [&str; 4] = [NAME, PASSWORD, EMAIL, NICKNAME];

// ** Section: "name" **

pub const NAME_MIN: u8 = 1;
pub const NAME_MAX: u8 = 191;
pub const MSG_NAME_REQUIRED: &str = "name:required";
pub const MSG_NAME_STRING: &str = "name:string";
pub const MSG_NAME_MIN_LENGTH: &str = "name:min_length";
pub const MSG_NAME_MAX_LENGTH: &str = "name:max_length";

// MIN=1, MAX=191
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    ValidationChecks::min_length(value, NAME_MIN.into(), MSG_NAME_MIN_LENGTH)?;
    ValidationChecks::max_length(value, NAME_MAX.into(), MSG_NAME_MAX_LENGTH)?;
    Ok(())
}

// ** Section: "email" **

pub const EMAIL_MAX: u8 = 191;
pub const MSG_EMAIL_REQUIRED: &str = "email:required";
pub const MSG_EMAIL_STRING: &str = "email:string";
pub const MSG_EMAIL_MAX_LENGTH: &str = "email:max_length";
pub const MSG_EMAIL_EMAIL_TYPE: &str = "email:email_type";
pub const MSG_EMAIL_UNIQUE: &str = "email:unique";

// MAX=191, "email:email_type"
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    ValidationChecks::max_length(value, EMAIL_MAX.into(), MSG_EMAIL_MAX_LENGTH)?;
    ValidationChecks::email(value, MSG_EMAIL_EMAIL_TYPE)?;
    Ok(())
}

// ** Section: "password" **

pub const PASSWORD_MIN: u8 = 8;
pub const PASSWORD_MAX: u8 = 191;
pub const MSG_PASSWORD_REQUIRED: &str = "password:required";
pub const MSG_PASSWORD_STRING: &str = "password:string";
pub const MSG_PASSWORD_MIN_LENGTH: &str = "password:min_length";
pub const MSG_PASSWORD_MAX_LENGTH: &str = "password:max_length";

// MIN=8, MAX=191
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    ValidationChecks::min_length(value, PASSWORD_MIN.into(), MSG_PASSWORD_MIN_LENGTH)?;
    ValidationChecks::max_length(value, PASSWORD_MAX.into(), MSG_PASSWORD_MAX_LENGTH)?;
    Ok(())
}

// ** Section: "nickname" **

pub const NICKNAME_MAX: u8 = 29;
pub const MSG_NICKNAME_STRING: &str = "nickname:string";
pub const MSG_NICKNAME_MAX_LENGTH: &str = "nickname:max_length";
pub const MSG_NICKNAME_UNIQUE: &str = "nickname:unique";

// MAX=29
pub fn validate_nickname(value: &str) -> Result<(), ValidationError> {
    ValidationChecks::max_length(value, NICKNAME_MAX.into(), MSG_NICKNAME_MAX_LENGTH)?;
    Ok(())
}

// ** Section: evaluator **

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    /// Update of the record with the given ID.
    Update(i32),
}

impl Mode {
    fn current_id(&self) -> Option<i32> {
        match self {
            Mode::Create => None,
            Mode::Update(id) => Some(*id),
        }
    }
}

/// Normalized field set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `None` - not submitted, `Some(None)` - submitted as null or empty.
    pub nickname: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Accepted(UserFields),
    Rejected(Vec<ValidationError>),
}

/// Normalize a raw value: not a string -> error; null, empty or blank -> `None`.
fn normalize(value: Option<&Value>, is_trim: bool, msg_string: &str) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let text = ValidationChecks::string(value, msg_string)?.unwrap_or_default();
    let text = if is_trim { text.trim() } else { text };
    Ok(Some(text.to_string()).filter(|v| !v.is_empty()))
}

/// Names of the fields that carry a value (anything but absent, null or an empty string).
pub fn present_fields(user_fields_dto: &UserFieldsDto) -> BTreeSet<&'static str> {
    let values = [
        (NAME, &user_fields_dto.name),
        (EMAIL, &user_fields_dto.email),
        (PASSWORD, &user_fields_dto.password),
        (NICKNAME, &user_fields_dto.nickname),
    ];
    values
        .into_iter()
        .filter(|(_, value)| match value {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(_) => true,
        })
        .map(|(field, _)| field)
        .collect()
}

/// Whether the field is required, given the mode and the set of present fields.
pub fn is_required(field: &str, mode: Mode, present: &BTreeSet<&str>) -> bool {
    match (field, mode) {
        (NICKNAME, _) => false,
        (_, Mode::Create) => true,
        (_, Mode::Update(_)) => PRESENCE_GROUP.iter().all(|f| *f == field || !present.contains(f)),
    }
}

/// Apply the requiredness and shape rules. Returns the normalized fields and the list of errors.
pub fn check_fields(user_fields_dto: &UserFieldsDto, mode: Mode) -> (UserFields, Vec<ValidationError>) {
    let present = present_fields(user_fields_dto);
    let mut errors: Vec<Option<ValidationError>> = vec![];
    let mut user_fields = UserFields::default();

    let mut check = |field: &str,
                     value: Option<&Value>,
                     is_trim: bool,
                     msg_string: &str,
                     msg_required: Option<&str>,
                     validate: fn(&str) -> Result<(), ValidationError>|
     -> Option<String> {
        match normalize(value, is_trim, msg_string) {
            Err(err) => {
                errors.push(Some(err));
                None
            }
            Ok(None) => {
                if let Some(msg) = msg_required.filter(|_| is_required(field, mode, &present)) {
                    errors.push(ValidationChecks::required::<String>(None, msg).err());
                }
                None
            }
            Ok(Some(text)) => match validate(&text) {
                Ok(()) => Some(text),
                Err(err) => {
                    errors.push(Some(err));
                    None
                }
            },
        }
    };

    let name = user_fields_dto.name.as_ref();
    user_fields.name = check(NAME, name, true, MSG_NAME_STRING, Some(MSG_NAME_REQUIRED), validate_name);

    let email = user_fields_dto.email.as_ref();
    let email = check(EMAIL, email, true, MSG_EMAIL_STRING, Some(MSG_EMAIL_REQUIRED), validate_email);
    user_fields.email = email;

    let password = user_fields_dto.password.as_ref();
    #[rustfmt::skip]
    let password = check(PASSWORD, password, false, MSG_PASSWORD_STRING, Some(MSG_PASSWORD_REQUIRED), validate_password);
    user_fields.password = password;

    let nickname = user_fields_dto.nickname.as_ref();
    let nickname_val = check(NICKNAME, nickname, true, MSG_NICKNAME_STRING, None, validate_nickname);
    // A submitted null or empty nickname clears the value.
    user_fields.nickname = nickname.map(|_| nickname_val);

    let errors: Vec<ValidationError> = errors.into_iter().flatten().collect();
    (user_fields, errors)
}

/// Check that `email` and `nickname` are not used by another record.
pub fn check_uniqueness(user_fields: &UserFields, mode: Mode, user_orm: &impl UserOrm) -> Result<Vec<ValidationError>, String> {
    let mut errors: Vec<Option<ValidationError>> = vec![];
    let current_id = mode.current_id();
    let is_other = |id: i32| Some(id) != current_id;

    if let Some(email) = &user_fields.email {
        let opt_user = user_orm.find_user_by_email(email)?;
        let is_unique = !opt_user.is_some_and(|user| is_other(user.id));
        errors.push(ValidationChecks::unique(is_unique, MSG_EMAIL_UNIQUE).err());
    }
    if let Some(Some(nickname)) = &user_fields.nickname {
        let opt_user = user_orm.find_user_by_nickname(nickname)?;
        let is_unique = !opt_user.is_some_and(|user| is_other(user.id));
        errors.push(ValidationChecks::unique(is_unique, MSG_NICKNAME_UNIQUE).err());
    }

    Ok(errors.into_iter().flatten().collect())
}

/// Evaluate the submitted field set for the given mode.
///
/// The error is a storage error from the uniqueness lookup.
pub fn evaluate(user_fields_dto: &UserFieldsDto, mode: Mode, user_orm: &impl UserOrm) -> Result<Validation, String> {
    let (user_fields, mut errors) = check_fields(user_fields_dto, mode);

    errors.extend(check_uniqueness(&user_fields, mode, user_orm)?);

    if !errors.is_empty() {
        return Ok(Validation::Rejected(errors));
    }
    Ok(Validation::Accepted(user_fields))
}

#[cfg(all(test, feature = "mockdata"))]
mod tests {
    use serde_json::json;

    use crate::users::{
        user_mock::UserMock,
        user_orm::tests::{UserOrmApp, UserOrmTest, USER1, USER1_ID, USER2, USER2_ID},
    };

    use super::*;

    fn dto(value: Value) -> UserFieldsDto {
        UserFieldsDto::from_body(value.to_string().as_bytes()).unwrap()
    }
    fn messages(validation: Validation) -> Vec<String> {
        match validation {
            Validation::Rejected(errors) => errors.iter().map(|e| e.message.to_string()).collect(),
            Validation::Accepted(fields) => panic!("unexpected accepted: {:?}", fields),
        }
    }
    fn accepted(validation: Validation) -> UserFields {
        match validation {
            Validation::Accepted(fields) => fields,
            Validation::Rejected(errors) => panic!("unexpected rejected: {:?}", errors),
        }
    }
    fn user_orm() -> UserOrmApp {
        UserOrmApp::create(&UserOrmTest::users(&[USER1, USER2]))
    }

    // ** present_fields() / is_required() **

    #[test]
    fn test_present_fields_skip_null_and_empty() {
        let present = present_fields(&dto(json!({ "name": "", "email": null, "password": "  ", "nickname": 1 })));
        assert_eq!(present, BTreeSet::from([NICKNAME]));
    }
    #[test]
    fn test_is_required_update_with_empty_set() {
        let present = BTreeSet::new();
        assert!(is_required(NAME, Mode::Update(1), &present));
        assert!(is_required(EMAIL, Mode::Update(1), &present));
        assert!(is_required(PASSWORD, Mode::Update(1), &present));
        assert!(!is_required(NICKNAME, Mode::Update(1), &present));
    }
    #[test]
    fn test_is_required_update_with_any_one_present() {
        for field in PRESENCE_GROUP {
            let present = BTreeSet::from([field]);
            for other in PRESENCE_GROUP.iter().filter(|f| **f != field) {
                assert!(!is_required(other, Mode::Update(1), &present), "{} with {}", other, field);
            }
        }
    }
    #[test]
    fn test_is_required_create() {
        let present = BTreeSet::from([NICKNAME, NAME]);
        assert!(is_required(NAME, Mode::Create, &present));
        assert!(is_required(EMAIL, Mode::Create, &present));
        assert!(is_required(PASSWORD, Mode::Create, &present));
        assert!(!is_required(NICKNAME, Mode::Create, &present));
    }

    // ** evaluate(): update mode **

    #[test]
    fn test_update_empty_body() {
        let validation = evaluate(&dto(json!({})), Mode::Update(USER1_ID), &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_NAME_REQUIRED, MSG_EMAIL_REQUIRED, MSG_PASSWORD_REQUIRED]);
    }
    #[test]
    fn test_update_all_empty_strings_is_empty_body() {
        let body = json!({ "name": "", "email": " ", "password": "", "nickname": "" });
        let validation = evaluate(&dto(body), Mode::Update(USER1_ID), &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_NAME_REQUIRED, MSG_EMAIL_REQUIRED, MSG_PASSWORD_REQUIRED]);
    }
    #[test]
    fn test_update_only_one_field() {
        let user_orm = user_orm();
        let bodies = [
            json!({ "name": "Swati Dubal" }),
            json!({ "email": "swati_dubal@gmail.com" }),
            json!({ "password": "test password" }),
            json!({ "nickname": "swati" }),
        ];
        for body in bodies {
            let validation = evaluate(&dto(body.clone()), Mode::Update(USER1_ID), &user_orm).unwrap();
            assert!(matches!(validation, Validation::Accepted(_)), "{}", body);
        }
    }
    #[test]
    fn test_update_only_invalid_nickname_reports_only_nickname() {
        let validation = evaluate(&dto(json!({ "nickname": 12666262 })), Mode::Update(USER1_ID), &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_NICKNAME_STRING]);
    }
    #[test]
    fn test_update_name_not_string() {
        let body = json!({ "name": ["Jane"], "email": true });
        let validation = evaluate(&dto(body), Mode::Update(USER1_ID), &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_NAME_STRING, MSG_EMAIL_STRING]);
    }
    #[test]
    fn test_update_nickname_max() {
        let validation = evaluate(&dto(json!({ "nickname": UserMock::nickname_max() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_NICKNAME_MAX_LENGTH]);

        let nickname = UserMock::nickname_exactly_max();
        let validation = evaluate(&dto(json!({ "nickname": nickname })), Mode::Update(USER1_ID), &user_orm());
        let fields = accepted(validation.unwrap());
        assert_eq!(fields.nickname, Some(Some(nickname)));
    }
    #[test]
    fn test_update_nickname_empty_is_cleared() {
        let body = json!({ "name": "Swati Dubal", "nickname": "" });
        let fields = accepted(evaluate(&dto(body), Mode::Update(USER1_ID), &user_orm()).unwrap());
        assert_eq!(fields.name, Some("Swati Dubal".to_string()));
        assert_eq!(fields.nickname, Some(None));
        assert_eq!(fields.email, None);
    }
    #[test]
    fn test_update_nickname_missing_is_untouched() {
        let fields = accepted(evaluate(&dto(json!({ "name": "Swati" })), Mode::Update(USER1_ID), &user_orm()).unwrap());
        assert_eq!(fields.nickname, None);
    }
    #[test]
    fn test_update_password_min_max() {
        let validation = evaluate(&dto(json!({ "password": UserMock::password_min() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_PASSWORD_MIN_LENGTH]);
        let validation = evaluate(&dto(json!({ "password": UserMock::password_max() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_PASSWORD_MAX_LENGTH]);
    }
    #[test]
    fn test_update_password_is_not_trimmed() {
        let fields = accepted(evaluate(&dto(json!({ "password": " 12345678 " })), Mode::Update(USER1_ID), &user_orm()).unwrap());
        assert_eq!(fields.password, Some(" 12345678 ".to_string()));
    }
    #[test]
    fn test_update_name_max() {
        let validation = evaluate(&dto(json!({ "name": UserMock::name_max() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_NAME_MAX_LENGTH]);
    }
    #[test]
    fn test_update_email_wrong_and_max() {
        let validation = evaluate(&dto(json!({ "email": UserMock::email_wrong() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_EMAIL_EMAIL_TYPE]);
        let validation = evaluate(&dto(json!({ "email": UserMock::email_max() })), Mode::Update(USER1_ID), &user_orm());
        assert_eq!(messages(validation.unwrap()), vec![MSG_EMAIL_MAX_LENGTH]);
    }
    #[test]
    fn test_update_to_own_email_and_nickname() {
        let user_orm = user_orm();
        let user1 = user_orm.get_user_by_id(USER1_ID).unwrap().unwrap();
        let body = json!({ "email": user1.email, "nickname": user1.nickname });
        let fields = accepted(evaluate(&dto(body), Mode::Update(USER1_ID), &user_orm).unwrap());
        assert_eq!(fields.email, Some(user1.email));
    }
    #[test]
    fn test_email_is_compared_as_submitted() {
        let user_orm = user_orm();
        let user1 = user_orm.get_user_by_id(USER1_ID).unwrap().unwrap();
        let email = user1.email.to_uppercase();
        let body = json!({ "email": format!(" {} ", email) });
        let fields = accepted(evaluate(&dto(body), Mode::Update(USER2_ID), &user_orm).unwrap());
        assert_eq!(fields.email, Some(email));
    }
    #[test]
    fn test_update_to_other_users_email_and_nickname() {
        let user_orm = user_orm();
        let user1 = user_orm.get_user_by_id(USER1_ID).unwrap().unwrap();
        let body = json!({ "email": user1.email, "nickname": user1.nickname });
        let validation = evaluate(&dto(body), Mode::Update(USER2_ID), &user_orm).unwrap();
        assert_eq!(messages(validation), vec![MSG_EMAIL_UNIQUE, MSG_NICKNAME_UNIQUE]);
    }
    #[test]
    fn test_uniqueness_is_skipped_for_invalid_email() {
        let user_orm = UserOrmApp::create(&UserOrmTest::users(&[USER1]));
        let body = json!({ "email": "not an email" });
        let validation = evaluate(&dto(body), Mode::Update(USER2_ID), &user_orm).unwrap();
        assert_eq!(messages(validation), vec![MSG_EMAIL_EMAIL_TYPE]);
    }

    // ** evaluate(): create mode **

    #[test]
    fn test_create_requires_name_email_password() {
        let validation = evaluate(&dto(json!({ "nickname": "lalu" })), Mode::Create, &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_NAME_REQUIRED, MSG_EMAIL_REQUIRED, MSG_PASSWORD_REQUIRED]);
    }
    #[test]
    fn test_create_valid_without_nickname() {
        let body = json!({ "name": " Karna Soneji ", "email": "SonejiKarna@gmail.com", "password": "test password" });
        let fields = accepted(evaluate(&dto(body), Mode::Create, &user_orm()).unwrap());
        assert_eq!(fields.name, Some("Karna Soneji".to_string()));
        assert_eq!(fields.email, Some("SonejiKarna@gmail.com".to_string()));
        assert_eq!(fields.password, Some("test password".to_string()));
        assert_eq!(fields.nickname, None);
    }
    #[test]
    fn test_create_empty_nickname() {
        let body = json!({ "name": "Karna", "email": "sonejikarna@gmail.com", "password": "test password", "nickname": "" });
        let fields = accepted(evaluate(&dto(body), Mode::Create, &user_orm()).unwrap());
        assert_eq!(fields.nickname, Some(None));
    }
    #[test]
    fn test_create_password_min() {
        let body = json!({ "name": "Karna", "email": "sonejikarna@gmail.com", "password": UserMock::password_min() });
        let validation = evaluate(&dto(body), Mode::Create, &user_orm()).unwrap();
        assert_eq!(messages(validation), vec![MSG_PASSWORD_MIN_LENGTH]);
    }
    #[test]
    fn test_create_email_and_nickname_already_used() {
        let user_orm = user_orm();
        let user2 = user_orm.get_user_by_id(USER2_ID).unwrap().unwrap();
        let body = json!({ "name": "Karna", "email": user2.email, "password": "test password", "nickname": user2.nickname });
        let validation = evaluate(&dto(body), Mode::Create, &user_orm).unwrap();
        assert_eq!(messages(validation), vec![MSG_EMAIL_UNIQUE, MSG_NICKNAME_UNIQUE]);
    }
}
