//! Print an Argon2 hash for seeding the `users` table
//!
//! Usage: hash-password <password>

use lci_server::auth::password::hash_password;

fn main() {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        std::process::exit(2);
    };
    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
