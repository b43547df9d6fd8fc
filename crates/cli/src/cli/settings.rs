//! `va-admin settings` — system prompt and dynamic field editor.
//!
//! `edit` opens a readline loop over a [`ConfigEditor`]. Plain lines are
//! ignored; everything happens through slash commands so a stray paste
//! cannot clobber the prompt.

use va_console::{table, ConfigEditor, FieldAttr, Route};
use va_domain::error::Error;

use crate::context::Console;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public entry points
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn show(console: &Console, json: bool) -> anyhow::Result<()> {
    console.enter(Route::Settings)?;
    let editor = ConfigEditor::new(console.api(), console.notifier());
    editor.load().await?;

    if json {
        let cfg = editor.config();
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }
    print_editor(&editor);
    Ok(())
}

/// Run the interactive settings editor.
pub async fn edit(console: &Console) -> anyhow::Result<()> {
    console.enter(Route::Settings)?;
    let editor = ConfigEditor::new(console.api(), console.notifier());
    editor.load().await?;

    let history_path = dirs::home_dir()
        .unwrap_or_default()
        .join(".va-admin")
        .join("settings_history.txt");
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let mut rl = rustyline::DefaultEditor::new()?;
    let _ = rl.load_history(&history_path);

    print_editor(&editor);
    eprintln!("Type /help for commands, Ctrl+D to exit");
    eprintln!();

    loop {
        match rl.readline("settings> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(&line).ok();

                match parse(trimmed) {
                    Ok(EditCommand::Exit) => {
                        if editor.has_unsaved_edits() {
                            eprintln!("Unsaved edits will be lost. Use /save first, or /exit! to discard.");
                            continue;
                        }
                        break;
                    }
                    Ok(EditCommand::ForceExit) => break,
                    Ok(cmd) => apply(&editor, cmd).await,
                    Err(msg) => eprintln!("{msg}"),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                eprintln!("(Use Ctrl+D or /exit to quit)");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                if editor.has_unsaved_edits() {
                    eprintln!("Discarding unsaved edits.");
                }
                break;
            }
            Err(e) => {
                eprintln!("\x1B[31mreadline error: {e}\x1B[0m");
                break;
            }
        }
    }

    rl.save_history(&history_path).ok();
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Slash command parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditCommand {
    List,
    Add,
    Remove(usize),
    Set(usize, FieldAttr, String),
    Prompt(String),
    Save,
    Reload,
    Help,
    Exit,
    ForceExit,
}

/// Parse one REPL line. Field numbers are 1-based as listed.
fn parse(input: &str) -> Result<EditCommand, String> {
    let Some(rest) = input.strip_prefix('/') else {
        return Err("Commands start with '/'  (type /help for a list)".into());
    };
    let (cmd, arg) = match rest.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (rest, ""),
    };

    let field_number = |s: &str| -> Result<usize, String> {
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(format!("Not a field number: {s:?}")),
        }
    };

    match cmd {
        "list" | "ls" => Ok(EditCommand::List),
        "add" => Ok(EditCommand::Add),
        "rm" => Ok(EditCommand::Remove(field_number(arg)?)),
        "key" | "desc" => {
            let (n, text) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
            let attr = if cmd == "key" {
                FieldAttr::Key
            } else {
                FieldAttr::Description
            };
            Ok(EditCommand::Set(field_number(n)?, attr, text.trim().to_owned()))
        }
        "prompt" => Ok(EditCommand::Prompt(arg.replace("\\n", "\n"))),
        "save" => Ok(EditCommand::Save),
        "reload" => Ok(EditCommand::Reload),
        "help" => Ok(EditCommand::Help),
        "exit" | "quit" => Ok(EditCommand::Exit),
        "exit!" | "quit!" => Ok(EditCommand::ForceExit),
        other => Err(format!("Unknown command: /{other}  (type /help for a list)")),
    }
}

async fn apply(editor: &ConfigEditor, cmd: EditCommand) {
    match cmd {
        EditCommand::List => print_editor(editor),
        EditCommand::Add => {
            let i = editor.add_field();
            eprintln!("Added field {}. Set it with /key {n} <key> and /desc {n} <text>", i + 1, n = i + 1);
        }
        EditCommand::Remove(i) => {
            if i >= editor.fields().len() {
                eprintln!("No field {}", i + 1);
            } else {
                editor.remove_field(i);
                print_fields(editor);
            }
        }
        EditCommand::Set(i, attr, text) => {
            if editor.update_field(i, attr, text) {
                print_fields(editor);
            } else {
                eprintln!("No field {}", i + 1);
            }
        }
        EditCommand::Prompt(text) => {
            editor.set_system_prompt(text);
            eprintln!("System prompt updated ({} chars, unsaved)", editor.system_prompt().chars().count());
        }
        EditCommand::Save => match editor.save().await {
            Ok(_) => print_fields(editor),
            Err(e) => {
                // Backend failures are reported through the notifier.
                if let Some(hint) = save_hint(&e) {
                    eprintln!("{hint}");
                }
            }
        },
        EditCommand::Reload => {
            if editor.load().await.is_ok() {
                print_editor(editor);
            }
        }
        EditCommand::Help => {
            eprintln!("Commands:");
            eprintln!("  /list              Show the prompt and fields");
            eprintln!("  /add               Append an empty field");
            eprintln!("  /rm <n>            Remove field n");
            eprintln!("  /key <n> <key>     Set the key of field n");
            eprintln!("  /desc <n> <text>   Set the description of field n");
            eprintln!("  /prompt <text>     Replace the system prompt (\\n for newlines)");
            eprintln!("  /save              Save and reload the bot configuration");
            eprintln!("  /reload            Discard edits and fetch the configuration again");
            eprintln!("  /exit, /exit!      Exit (the ! form discards unsaved edits)");
            eprintln!("  /help              Show this help");
        }
        EditCommand::Exit | EditCommand::ForceExit => {}
    }
}

/// Extra guidance for save failures the notifier stays silent about.
fn save_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::NotLoaded => Some("Configuration not loaded; use /reload first."),
        _ => None,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn print_editor(editor: &ConfigEditor) {
    println!("System prompt:");
    let prompt = editor.system_prompt();
    if prompt.is_empty() {
        println!("  (empty)");
    } else {
        for line in prompt.lines() {
            println!("  {line}");
        }
    }
    println!();
    print_fields(editor);
}

fn print_fields(editor: &ConfigEditor) {
    let rows: Vec<Vec<String>> = editor
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| vec![(i + 1).to_string(), f.key.clone(), f.description.clone()])
        .collect();
    print!(
        "{}",
        table::render(&["#", "Key", "Description"], &rows, "No dynamic fields.")
    );
}
