//! Token issuance and verification walkthrough.
//!
//! Run with: cargo run --example token_roundtrip

use soloauth::TokenCodec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // In a real deployment the secret comes from the environment
    let codec = TokenCodec::new(b"demo-secret-do-not-use-in-production");

    let token = codec.issue();
    println!("Issued token: {}", token);

    let parts: Vec<&str> = token.split('.').collect();
    println!();
    println!("Segments:");
    println!("  timestamp: {} (hex ms since epoch)", parts[0]);
    println!("  nonce:     {} (32 random bytes)", parts[1]);
    println!("  signature: {} (HMAC-SHA256)", parts[2]);

    println!();
    println!("verify(issued)            = {}", codec.verify(&token));

    // Tamper with the nonce without re-signing
    let flipped = if parts[1].starts_with("ff") { "00" } else { "ff" };
    let tampered = format!("{}.{}{}.{}", parts[0], flipped, &parts[1][2..], parts[2]);
    println!("verify(tampered nonce)    = {}", codec.verify(&tampered));

    // Structural garbage never errs, it just fails
    println!("verify(\"\")                = {}", codec.verify(""));
    println!("verify(\"a.b\")             = {}", codec.verify("a.b"));
    println!("verify(\"a.b.c.d\")         = {}", codec.verify("a.b.c.d"));

    // A different secret rejects everything the first one signed
    let rotated = TokenCodec::new(b"rotated-secret-invalidates-all-sessions");
    println!("verify after rotation     = {}", rotated.verify(&token));
}
