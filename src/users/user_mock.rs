use crate::users::user_validations;

// * * UserMock * *

pub struct UserMock {}

impl UserMock {
    pub fn name_max() -> String {
        (0..(user_validations::NAME_MAX as usize + 1)).map(|_| 'a').collect()
    }
    pub fn nickname_max() -> String {
        (0..(user_validations::NICKNAME_MAX + 1)).map(|_| 'a').collect()
    }
    pub fn nickname_exactly_max() -> String {
        (0..user_validations::NICKNAME_MAX).map(|_| 'ё').collect()
    }
    pub fn email_max() -> String {
        let email_max: usize = user_validations::EMAIL_MAX.into();
        let prefix: String = (0..64).map(|_| 'a').collect();
        let domain = ".ua";
        let len = email_max - prefix.len() - domain.len() + 1;
        let suffix: String = (0..len).map(|_| 'a').collect();
        format!("{}@{}{}", prefix, suffix, domain)
    }
    pub fn email_wrong() -> String {
        "aaa@".to_string()
    }
    pub fn password_min() -> String {
        (0..(user_validations::PASSWORD_MIN - 1)).map(|_| 'a').collect()
    }
    pub fn password_max() -> String {
        (0..(user_validations::PASSWORD_MAX as usize + 1)).map(|_| 'a').collect()
    }
}
