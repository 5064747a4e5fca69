#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::{
    password_hash::{PasswordHasher, Salt, SaltString},
    Argon2,
};

pub const MAX_PARAM_LENGTH: usize = 191;
pub const ERR_PARAM_EMPTY: &str = "Parameter is empty.";
pub const ERR_PARAM_EXCEED_MAX_LEN: &str = "The parameter exceeds the max length of ";
pub const ERR_HASHING_ERR: &str = "Error creating hash - ";
pub const ERR_RANDOM_SALT: &str = "Error creating salt - ";
#[cfg(test)]
pub const ERR_INVALID_HASH_FORMAT: &str = "Invalid parameter hash format - ";

fn check_param(param: &str) -> Result<(), String> {
    if param.is_empty() {
        return Err(ERR_PARAM_EMPTY.to_string());
    }
    if param.chars().count() > MAX_PARAM_LENGTH {
        return Err(format!("{}{}", ERR_PARAM_EXCEED_MAX_LEN, MAX_PARAM_LENGTH));
    }
    Ok(())
}

/// Create a hash for the value.
pub fn encode_hash(param: impl Into<String>) -> Result<String, String> {
    let param = param.into();
    check_param(&param)?;

    let mut bytes = [0u8; Salt::RECOMMENDED_LENGTH];
    getrandom::fill(&mut bytes).map_err(|e| format!("{}{}", ERR_RANDOM_SALT, e))?;
    let salt = SaltString::encode_b64(&bytes).map_err(|e| format!("{}{}", ERR_RANDOM_SALT, e))?;

    let param_hash = Argon2::default()
        .hash_password(param.as_bytes(), &salt)
        .map_err(|e| format!("{}{}", ERR_HASHING_ERR, e))?
        .to_string();

    Ok(param_hash)
}

/// Compare the hash for the value with the specified one.
#[cfg(test)]
pub fn compare_hash(param: impl Into<String>, hashed_param: &str) -> Result<bool, String> {
    let param = param.into();
    check_param(&param)?;

    let parsed_hash = PasswordHash::new(hashed_param).map_err(|e| format!("{}{}", ERR_INVALID_HASH_FORMAT, e))?;

    let compare_res = Argon2::default().verify_password(param.as_bytes(), &parsed_hash);

    Ok(compare_res.is_ok())
}
