use pngmeta::{extract_folder, Config, ConsoleProgress, ExtractError};

use std::{
  io::{BufRead, Write},
  process::ExitCode,
};

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  // With a folder argument we're being scripted, so no banner and no waiting.
  let (config, interactive) = match std::env::args_os().nth(1) {
    Some(arg) => (Config::from_os_input(&arg), false),
    None => match prompt_for_folder() {
      Ok(line) => (Config::from_user_input(&line), true),
      Err(e) => {
        eprintln!("Can't read the folder path: {e}");
        return ExitCode::FAILURE;
      }
    },
  };

  let Some(config) = config else {
    eprintln!("No path provided.");
    return ExitCode::FAILURE;
  };
  log::debug!("processing folder {}", config.folder.display());

  let code = match extract_folder(&config, &mut ConsoleProgress::stdout()) {
    Ok(_totals) => ExitCode::SUCCESS,
    Err(ExtractError::InvalidFolder(_)) => {
      eprintln!("Error: Invalid or inaccessible folder path.");
      ExitCode::FAILURE
    }
    Err(e) => {
      eprintln!("Error: {e}");
      ExitCode::FAILURE
    }
  };

  if interactive {
    wait_for_enter();
  }
  code
}

fn prompt_for_folder() -> std::io::Result<String> {
  let mut stdout = std::io::stdout().lock();
  writeln!(stdout, "Stable Diffusion PNG Metadata Extractor (tEXt + zTXt)")?;
  writeln!(stdout, "====================================================")?;
  writeln!(stdout)?;
  writeln!(stdout, "Paste or type the full path to your PNG folder:")?;
  write!(stdout, "> ")?;
  stdout.flush()?;
  drop(stdout);

  let mut line = String::new();
  std::io::stdin().lock().read_line(&mut line)?;
  Ok(line)
}

/// Keeps a double-clicked console window open until the user has read it.
fn wait_for_enter() {
  print!("\nPress Enter to exit...");
  let _ = std::io::stdout().flush();
  let mut line = String::new();
  let _ = std::io::stdin().lock().read_line(&mut line);
}
