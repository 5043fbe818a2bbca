//! `--check`: load everything once and report what each host would get.

use color_eyre::Result;

use crate::access::candidate_users;
use crate::startup::{load_stores, ServerConfig};

/// Load the config file and keyring with the current settings and print a
/// per-host summary. Fails if either store fails to load.
pub fn handle_check_command(settings: &ServerConfig) -> Result<()> {
    let (config, keyring) = load_stores(settings)?;
    let config = config.snapshot();
    let keyring = keyring.snapshot();

    println!(
        "config  {}: {} hosts, {} groups",
        settings.config_path.display(),
        config.host_count(),
        config.group_count()
    );
    println!(
        "keyring {}: {} users, {} keys",
        settings.keyring_path.display(),
        keyring.user_count(),
        keyring.key_count()
    );

    for hostname in config.hostnames() {
        let Some(host) = config.host(hostname) else {
            continue;
        };
        let candidates = candidate_users(&config, host);
        let (with_keys, without_keys): (Vec<&str>, Vec<&str>) = candidates
            .into_iter()
            .partition(|user| keyring.contains_user(user));
        let key_count: usize = with_keys.iter().map(|user| keyring.keys(user).len()).sum();

        println!(
            "  {}: {} users, {} keys{}",
            hostname,
            with_keys.len(),
            key_count,
            if without_keys.is_empty() {
                String::new()
            } else {
                format!(" (no keys: {})", without_keys.join(", "))
            }
        );
    }

    Ok(())
}
