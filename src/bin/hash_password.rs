//! Prints the argon2 hash to put in `APP_ADMIN_PASSWORD_HASH`.
//!
//! Reads the password from the first argument, or from stdin when absent.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use folio::auth::password::hash_password;
use zeroize::Zeroizing;

fn main() -> Result<()> {
    let password = match std::env::args().nth(1) {
        Some(arg) => Zeroizing::new(arg),
        None => {
            let mut line = Zeroizing::new(String::new());
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string())
        }
    };

    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = hash_password(&password).context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}
