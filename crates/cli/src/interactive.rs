//! Interactive prompts.

use anyhow::Result;
use std::io::Write;

/// Ask before deleting an env variable. Anything other than `y`/`Y` declines.
pub fn confirm_delete(key: &str, project: &str) -> Result<bool> {
    print!(
        "Are you sure you want to delete '{}' from project '{}'? [y/N] ",
        key, project
    );
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if !input.trim().eq_ignore_ascii_case("y") {
        println!("Delete cancelled.");
        return Ok(false);
    }

    Ok(true)
}
