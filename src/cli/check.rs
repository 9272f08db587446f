//! Config validation command implementation.

use super::{CliError, load_config};
use std::path::PathBuf;
use tilequest::Overworld;

/// Execute the check-config command.
///
/// # Errors
///
/// Returns an error if the config cannot be read or describes an
/// unplayable game.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(path: PathBuf) -> Result<(), CliError> {
    println!("Checking: {}", path.display());
    println!();

    let config = match load_config(Some(&path)) {
        Ok(config) => {
            print_check("parse and validate", true);
            config
        }
        Err(e) => {
            print_check("parse and validate", false);
            return Err(e);
        }
    };

    let world = Overworld::from_config(&config.world)
        .map_err(|e| CliError::new(format!("world build failed: {e}")))?;
    print_check("world build", true);

    println!();
    println!("Summary:");
    println!(
        "  Map:          {}x{} tiles of {} px",
        world.map().width(),
        world.map().height(),
        world.map().tile_size()
    );
    println!("  Monsters:     {}", world.monsters().len());
    for monster in world.monsters() {
        println!("    - {} Lv {}", monster.name(), monster.level);
    }
    match config.seed {
        Some(seed) => println!("  Seed:         {seed}"),
        None => println!("  Seed:         from clock"),
    }
    println!(
        "  Flee chance:  {}/{}",
        config.battle.flee_chance.numerator, config.battle.flee_chance.denominator
    );

    println!();
    println!("Config OK");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
