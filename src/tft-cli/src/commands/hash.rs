//! Hash command handler

use anyhow::Result;
use std::io::{self, Write};

/// Format one `name<TAB>{hash}` line
fn hash_line(name: &str) -> String {
    format!("{}\t{}", name, tft_meta::hashed_key(name))
}

/// Handle the hash command
pub fn handle(names: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for name in names {
        writeln!(stdout, "{}", hash_line(name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_line() {
        assert_eq!(hash_line("Damage"), "Damage\t{59e94c40}");
        assert_eq!(hash_line("MagicResist"), "MagicResist\t{b6f318ee}");
    }
}
