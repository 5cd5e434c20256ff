//! The `cbat credential` command.

use anyhow::Result;

use cbat_store::AdminCredential;

pub fn execute(salt: String, password: String) -> Result<()> {
    anyhow::ensure!(!salt.is_empty(), "salt must not be empty");
    anyhow::ensure!(!password.is_empty(), "password must not be empty");

    println!("{}", AdminCredential::derive_hex(&salt, &password));
    Ok(())
}
