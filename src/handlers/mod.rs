// Handlers are split by authentication requirement: public endpoints issue
// tokens, protected endpoints require a verified Principal in the request
// extensions (injected by the JWT middleware).
pub mod protected;
pub mod public;
