// handlers/protected/mod.rs - endpoints behind the bearer-token middleware
//
// Every handler here runs after jwt_auth_middleware has put an AuthUser into
// the request extensions. Mutating handlers check the account is writable
// before touching the provider.
pub mod phone_number_types;
