// The infra module holds the pieces that talk to the outside world on their
// own, without going through the Discord client.

#[path = "health/health_server.rs"]
pub mod health;
