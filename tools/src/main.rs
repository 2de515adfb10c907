//! campus-runner: headless driver for the campus credit core.
//!
//! Usage:
//!   campus-runner --seed 12345 --data-dir ./data
//!   campus-runner --seed 12345 --ipc-mode
//!
//! In IPC mode each stdin line is one JSON request and each stdout line is
//! one JSON response: the full campus snapshot, or `{"error": ...}`.

use anyhow::Result;
use campus_credit_core::{
    clock::SystemClock, snapshot::CampusSnapshot, CampusCommand, CampusConfig, CampusEngine, Session,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Login { account_id: String },
    ActAs { account_id: String },
    StopImpersonating,
    Command { command: CampusCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    session: Option<&'a Session>,
    #[serde(flatten)]
    snapshot: CampusSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    if !ipc_mode {
        println!("Campus Credits: campus-runner");
        println!("  seed:      {seed}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let config = CampusConfig::load(data_dir)?;
    let mut engine = CampusEngine::new(config, Box::new(SystemClock), seed);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        print_summary(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut CampusEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut session: Option<Session> = None;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let outcome = match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => Ok(()),
            IpcRequest::Login { account_id } => engine.open_session(&account_id).map(|s| {
                session = Some(s);
            }),
            IpcRequest::ActAs { account_id } => match &session {
                Some(current) => engine.act_as_student(current, &account_id).map(|s| {
                    session = Some(s);
                }),
                None => {
                    write_error(&mut stdout, "not logged in")?;
                    continue;
                }
            },
            IpcRequest::StopImpersonating => {
                session = session.map(|s| s.stop_impersonating());
                Ok(())
            }
            IpcRequest::Command { command } => match &session {
                Some(current) => engine.execute(current, command).map(|events| {
                    log::debug!("command emitted {} event(s)", events.len());
                }),
                None => {
                    write_error(&mut stdout, "not logged in")?;
                    continue;
                }
            },
        };

        match outcome {
            Ok(()) => {
                let state = UiState {
                    session: session.as_ref(),
                    snapshot: engine.snapshot(),
                };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
                stdout.flush()?;
            }
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(engine: &CampusEngine) {
    let accounts = engine.list_accounts();
    let available = engine.list_books().iter().filter(|b| b.is_available()).count();

    println!("=== CAMPUS SUMMARY ===");
    println!("  accounts:         {}", accounts.len());
    println!("  books available:  {available}/{}", engine.list_books().len());
    println!("  quiz categories:  {}", engine.quiz_categories().len());
    println!("  ledger entries:   {}", engine.ledger().len());
    println!("  pending reviews:  {}", engine.pending_activities().len());

    println!();
    println!("=== LEADERBOARD ===");
    for entry in engine.leaderboard(5) {
        println!("  {:>2}. {:<20} {:>6}", entry.rank, entry.name, entry.credits);
    }

    let discrepancies = engine.audit_balances();
    if !discrepancies.is_empty() {
        log::error!("{} balance discrepancies", discrepancies.len());
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
