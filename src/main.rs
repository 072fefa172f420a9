use sandvault::{
    CancelToken, PlayMode, SelectionSummary, SessionOutcome, SlotEntry, SteamProcessHost, Vault,
    VaultError,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let vault = match Vault::open() {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("[sandvault] {}", e);
            eprintln!("[sandvault] Set save_root in the config to point at your ConanSandbox folder.");
            std::process::exit(1);
        }
    };

    println!("[sandvault] Live save directory: {}", vault.live_root().display());

    let result = run_command(vault, &args[1], &args[2..]);
    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run_command(mut vault: Vault, command: &str, rest: &[String]) -> Result<(), VaultError> {
    match command {
        "list" => {
            let slots = vault.list_slots()?;
            if slots.is_empty() {
                println!("[sandvault] No slots yet.");
                return Ok(());
            }
            for entry in slots {
                match entry {
                    SlotEntry::Ready(slot) => println!(
                        "  {:<24} {:<7} {:>8.1} MB  created {}  modified {}",
                        slot.meta.name,
                        slot.meta.play_mode.to_string(),
                        slot.disk_size as f64 / (1024.0 * 1024.0),
                        slot.meta.created_at.format("%Y-%m-%d %H:%M"),
                        slot.meta.last_modified_at.format("%Y-%m-%d %H:%M"),
                    ),
                    SlotEntry::Corrupt { name, reason, .. } => {
                        println!("  {:<24} CORRUPT ({})", name, reason)
                    }
                }
            }
            Ok(())
        }
        "backup" => {
            let (name, mode) = name_and_mode(rest);
            let (slot, result) = vault.create_slot_from_live(&name, mode, print_progress)?;
            println!(
                "[sandvault] Backed up {} files into slot '{}'",
                result.files_copied, slot.meta.name
            );
            Ok(())
        }
        "restore" => {
            let name = one_arg(rest);
            let result = vault.restore_slot_to_live(&name, print_progress)?;
            println!(
                "[sandvault] Restored '{}' ({} files)",
                name, result.files_copied
            );
            Ok(())
        }
        "delete" => {
            let name = one_arg(rest);
            vault.delete_slot(&name)?;
            println!("[sandvault] Deleted slot '{}'", name);
            Ok(())
        }
        "mode" => {
            let (name, mode) = name_and_mode(rest);
            let slot = vault.set_slot_mode(&name, mode)?;
            println!(
                "[sandvault] Slot '{}' is now {}",
                slot.meta.name, slot.meta.play_mode
            );
            Ok(())
        }
        "include" | "exclude" => {
            let path = one_arg(rest);
            vault.set_path_included(&path, command == "include")?;
            let SelectionSummary { items, total_bytes } = vault.selection_summary();
            println!(
                "[sandvault] Selection: {} items totaling {:.1} MB",
                items,
                total_bytes as f64 / (1024.0 * 1024.0)
            );
            Ok(())
        }
        "play" => {
            let name = one_arg(rest);
            let mut host = SteamProcessHost::new(vault.app_id());
            println!("[sandvault] Launching game; slot '{}' will capture on exit", name);
            let outcome =
                vault.launch_and_auto_restore(&name, &mut host, &CancelToken::new(), print_progress)?;
            match outcome {
                SessionOutcome::Completed(report) => {
                    println!(
                        "[sandvault] Game exited ({}), captured {} files into '{}'",
                        report.exit_code, report.capture.files_copied, name
                    );
                    for failure in &report.capture.failures {
                        eprintln!("[sandvault] Warning: {}", failure);
                    }
                }
                SessionOutcome::Cancelled => {
                    println!("[sandvault] Launch cancelled before the game started");
                }
            }
            Ok(())
        }
        other => {
            eprintln!("[sandvault] Unknown command '{}'", other);
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

fn print_progress(done: usize, total: usize) {
    println!("[sandvault] Copied {}/{}", done, total);
}

fn one_arg(rest: &[String]) -> String {
    match rest.first() {
        Some(arg) => arg.clone(),
        None => {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

fn name_and_mode(rest: &[String]) -> (String, PlayMode) {
    let name = one_arg(rest);
    let mode = match rest.get(1) {
        Some(raw) => match raw.parse::<PlayMode>() {
            Ok(mode) => mode,
            Err(msg) => {
                eprintln!("[sandvault] {}", msg);
                std::process::exit(1);
            }
        },
        None => PlayMode::Solo,
    };
    (name, mode)
}

fn report_error(e: &VaultError) {
    match e {
        VaultError::PartialSync {
            files_copied,
            failures,
        } => {
            eprintln!(
                "[sandvault] Partial sync: {} copied, {} failed",
                files_copied,
                failures.len()
            );
            for failure in failures {
                eprintln!("[sandvault]   {}", failure);
            }
        }
        other => eprintln!("[sandvault] Error: {}", other),
    }
}

static USAGE_TEXT: &str = r#"
sandvault - selective save backup manager for Conan Exiles

Usage: sandvault <COMMAND> [ARGS]

Commands:
    list                       List save slots, newest first
    backup <name> [solo|online]   Create a slot from the current live save
    restore <name>             Copy a slot back into the live save directory
    delete <name>              Remove a slot (safe to repeat)
    mode <name> <solo|online>  Change a slot's play mode
    include <path>             Add a relative path to the backup selection
    exclude <path>             Drop a relative path from the backup selection
    play <name>                Launch the game, capture the slot when it exits
"#;
