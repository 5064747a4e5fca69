// 200 Ok - Request processed successfully.

// 400 Bad Request - The request body could not be deserialized.
pub const MSG_INVALID_REQUEST_BODY: &str = "invalid_request_body";

// 404 Not Found - The user with the specified ID was not found.
pub const MSG_USER_NOT_FOUND: &str = "user_not_found";

// 409 Conflict - The specified "email" is already registered.
pub const MSG_EMAIL_ALREADY_USE: &str = "email_already_use";
// 409 Conflict - The specified "nickname" is already registered.
pub const MSG_NICKNAME_ALREADY_USE: &str = "nickname_already_use";

// 422 Unprocessable Entity - The submitted fields failed validation.
pub const MSG_VALIDATION_FAILED: &str = "validation_failed";

// 500 Internal Server Error - Error creating password hash.
pub const MSG_ERROR_HASHING_PASSWORD: &str = "error_hashing_password";

// 506 Variant Also Negotiates - Error web::block for waiting for synchronous operations to complete.
pub const MSG_BLOCKING: &str = "error_waiting_for_operations";

// 507 Insufficient Storage - An error occurred while executing a database query.
pub const MSG_DATABASE: &str = "database_query_error";
