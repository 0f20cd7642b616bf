// handlers/mod.rs - two security tiers
//
// Public (no auth): service info, health, token issue, unauthenticated listing
// Protected (bearer JWT): phone number type CRUD
pub mod public;
pub mod protected;
