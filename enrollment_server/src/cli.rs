use std::{env, env::VarError};

// Be explicit about which envars to print, so as to avoid accidentally exposing secrets. Key secrets, private keys and
// the admin key are deliberately absent.
const DISPLAY_ENVS: [&str; 19] = [
    "RUST_LOG",
    "LDG_HOST",
    "LDG_PORT",
    "LDG_SITE_URL",
    "LDG_USE_X_FORWARDED_FOR",
    "LDG_USE_FORWARDED",
    "LDG_RAZORPAY_KEY_ID",
    "LDG_RAZORPAY_API_URL",
    "LDG_CHECKOUT_NAME",
    "LDG_CHECKOUT_DESCRIPTION",
    "LDG_CHECKOUT_THEME_COLOR",
    "LDG_REGISTRATIONS_SHEET_CLIENT_EMAIL",
    "LDG_REGISTRATIONS_SHEET_SPREADSHEET_ID",
    "LDG_REGISTRATIONS_SHEET_RANGE",
    "LDG_ENQUIRIES_SHEET_CLIENT_EMAIL",
    "LDG_ENQUIRIES_SHEET_SPREADSHEET_ID",
    "LDG_ENQUIRIES_SHEET_RANGE",
    "LDG_EVENTS_SEED_FILE",
    "LDG_WORKSHOPS_SEED_FILE",
];

/// The server has no real CLI. `--version` prints the version; any other argument prints the help text and the
/// current (non-secret) configuration. Returns true if the server should exit instead of starting.
pub fn handle_command_line_args() -> bool {
    let args = env::args().skip(1).collect::<Vec<String>>();
    match args.first().map(String::as_str) {
        None => false,
        Some("--version" | "-V") => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            true
        },
        Some(_) => {
            display_readme();
            display_envs();
            true
        },
    }
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| println!("  {name:<40} {:<15}", describe_var(env::var(name))));
}

fn describe_var(value: Result<String, VarError>) -> String {
    match value {
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}
