//! Full login flow: rate limiting, credential check, cookie lifecycle.
//!
//! Run with: cargo run --example login_flow

use soloauth::prelude::*;
use soloauth::session::MemoryCookieStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let codec = TokenCodec::new(b"demo-secret-do-not-use-in-production");
    let gate = SessionGate::new(MemoryCookieStore::new(), codec, false);
    let service = AuthService::new(
        gate,
        AdminCredentials::new(Some("admin"), Some("hunter2")),
        LoginRateLimiter::new(RateLimiterConfig::default().with_max_failures(3)),
    );

    // Client identity comes from proxy headers; no headers means the
    // shared "unknown" bucket
    let client = client_identity(Some("203.0.113.9, 10.0.0.1"), None);
    println!("client identity: {}", client);
    println!();

    // A few bad guesses
    for attempt in 1..=3 {
        let outcome = service.login(&client, "admin", "password123").unwrap();
        println!("attempt {} with wrong password: {:?}", attempt, outcome);
    }

    // Over the threshold now; even the right password is refused
    match service.login(&client, "admin", "hunter2").unwrap() {
        LoginOutcome::RateLimited {
            retry_after_seconds,
        } => {
            println!();
            println!(
                "locked out; correct password refused, retry after {}s",
                retry_after_seconds
            );
        }
        other => println!("unexpected outcome: {:?}", other),
    }

    // A different client is unaffected
    let other_client = client_identity(None, Some("198.51.100.7"));
    let outcome = service.login(&other_client, "admin", "hunter2").unwrap();
    println!();
    println!("other client login accepted: {}", outcome.accepted());
    println!("is_authenticated: {}", service.is_authenticated());

    service.logout().unwrap();
    println!("after logout:     {}", service.is_authenticated());
}
