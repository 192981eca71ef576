//! Line-oriented host shell over the core store and editor.
//!
//! # Responsibility
//! - Parse one input line into a shell command.
//! - Translate commands into editor field updates or store actions.
//! - Render the activity list, the form and the totals as plain text.
//!
//! # Invariants
//! - The editor observes the store after every dispatch.
//! - Unknown or malformed commands never reach the store.

use anyhow::Result;
use calorie_core::{
    categories, category_name, ActivityAction, ActivityId, ActivityStore, DispatchOutcome,
    DraftEditor, FormField, IdGenerator,
};
use log::info;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

const HELP_TEXT: &str = "\
commands:
  category <id>     set draft category (see `categories`)
  name <text>       set draft name
  calories <n>      set draft calories
  save              save the draft (create or update)
  edit <pos>        load the activity at list position <pos> into the form
  delete <pos>      delete the activity at list position <pos>
  list | form | totals | categories | json
  help | quit";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Save,
    Edit(usize),
    Delete(usize),
    List,
    Form,
    Totals,
    Categories,
    Json,
    Help,
    Quit,
}

/// Command parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidPosition(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::Unknown(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
            Self::InvalidPosition(input) => {
                write!(f, "list position must be a number from 1, got `{input}`")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses one input line.
///
/// The `name` argument is kept verbatim after the first separating space.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "" => Err(CommandError::Empty),
        "name" => Ok(Command::Set(FormField::Name, rest.to_string())),
        "category" => Ok(Command::Set(
            FormField::Category,
            required(rest, "category")?.to_string(),
        )),
        "calories" => Ok(Command::Set(FormField::Calories, rest.to_string())),
        "save" => Ok(Command::Save),
        "edit" => Ok(Command::Edit(position(required(rest, "edit")?)?)),
        "delete" => Ok(Command::Delete(position(required(rest, "delete")?)?)),
        "list" => Ok(Command::List),
        "form" => Ok(Command::Form),
        "totals" => Ok(Command::Totals),
        "categories" => Ok(Command::Categories),
        "json" => Ok(Command::Json),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(value)
}

fn position(value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(pos) if pos >= 1 => Ok(pos),
        _ => Err(CommandError::InvalidPosition(value.to_string())),
    }
}

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive session: the store plus the form editing it.
pub struct Shell<G: IdGenerator> {
    store: ActivityStore,
    editor: DraftEditor<G>,
}

impl<G: IdGenerator> Shell<G> {
    pub fn new(generator: G) -> Self {
        Self {
            store: ActivityStore::new(),
            editor: DraftEditor::new(generator),
        }
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    #[cfg(test)]
    pub fn editor(&self) -> &DraftEditor<G> {
        &self.editor
    }

    /// Executes one command, writing user-facing output to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Set(field, raw) => match self.editor.update_field(field, &raw) {
                Ok(()) => self.render_form(out)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Save => match self.editor.submit(&mut self.store) {
                Ok(id) => {
                    self.editor.observe(self.store.state());
                    writeln!(out, "saved {id}")?;
                    self.render_list(out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Edit(pos) => match self.id_at(pos) {
                Some(id) => match self.dispatch(ActivityAction::SetActiveId { id: Some(id) }) {
                    DispatchOutcome::Applied => self.render_form(out)?,
                    DispatchOutcome::Ignored => {
                        writeln!(out, "error: activity {id} cannot be selected")?
                    }
                },
                None => writeln!(out, "error: no activity at position {pos}")?,
            },
            Command::Delete(pos) => match self.id_at(pos) {
                Some(id) => match self.dispatch(ActivityAction::DeleteActivity { id }) {
                    DispatchOutcome::Applied => self.render_list(out)?,
                    DispatchOutcome::Ignored => {
                        writeln!(out, "error: activity {id} cannot be deleted")?
                    }
                },
                None => writeln!(out, "error: no activity at position {pos}")?,
            },
            Command::List => self.render_list(out)?,
            Command::Form => self.render_form(out)?,
            Command::Totals => self.render_totals(out)?,
            Command::Categories => {
                for category in categories() {
                    writeln!(out, "{} {}", category.id, category.name)?;
                }
            }
            Command::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self.store.state())?)?;
            }
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, action: ActivityAction) -> DispatchOutcome {
        let outcome = self.store.dispatch(action);
        self.editor.observe(self.store.state());
        outcome
    }

    fn id_at(&self, pos: usize) -> Option<ActivityId> {
        self.store
            .activities()
            .get(pos.checked_sub(1)?)
            .map(|activity| activity.id)
    }

    fn render_list<W: Write>(&self, out: &mut W) -> Result<()> {
        let activities = self.store.activities();
        if activities.is_empty() {
            writeln!(out, "no activities yet")?;
            return Ok(());
        }
        let active_id = self.store.active_id();
        for (index, activity) in activities.iter().enumerate() {
            let marker = if Some(activity.id) == active_id { "*" } else { " " };
            writeln!(
                out,
                "{marker}{}. [{}] {} {} kcal",
                index + 1,
                category_name(activity.category),
                activity.name,
                activity.calories
            )?;
        }
        Ok(())
    }

    fn render_form<W: Write>(&self, out: &mut W) -> Result<()> {
        let draft = self.editor.draft();
        writeln!(
            out,
            "category: {} ({})",
            category_name(draft.category),
            draft.category
        )?;
        writeln!(out, "name: {}", draft.name)?;
        writeln!(out, "calories: {}", draft.calories)?;
        let state = if self.editor.can_submit() {
            "ready"
        } else {
            "disabled"
        };
        writeln!(out, "[{}] {state}", self.editor.submit_label())?;
        Ok(())
    }

    fn render_totals<W: Write>(&self, out: &mut W) -> Result<()> {
        let summary = self.store.state().summary();
        writeln!(
            out,
            "consumed: {} kcal | burned: {} kcal | net: {} kcal",
            summary.consumed, summary.burned, summary.net
        )?;
        Ok(())
    }
}

/// Reads commands from `input` until EOF or `quit`.
pub fn run<G, R, W>(shell: &mut Shell<G>, input: R, out: &mut W, prompt: bool) -> Result<()>
where
    G: IdGenerator,
    R: BufRead,
    W: Write,
{
    info!("event=shell_start module=cli status=ok");
    let mut commands = 0_usize;
    for line in input.lines() {
        let line = line?;
        let flow = match parse_command(&line) {
            Ok(command) => {
                commands += 1;
                shell.execute(command, out)?
            }
            Err(CommandError::Empty) => Flow::Continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        if prompt {
            write!(out, "> ")?;
        }
        out.flush()?;
    }
    info!(
        "event=shell_stop module=cli status=ok commands={} activities={}",
        commands,
        shell.store().activities().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_command, run, Command, CommandError, Shell};
    use calorie_core::{EditorPhase, FormField, SequentialGenerator};

    fn run_script(script: &str) -> (Shell<SequentialGenerator>, String) {
        let mut shell = Shell::new(SequentialGenerator::new());
        let mut out = Vec::new();
        run(&mut shell, script.as_bytes(), &mut out, false).expect("script runs");
        (shell, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn parse_keeps_name_verbatim() {
        assert_eq!(
            parse_command("name  Green salad"),
            Ok(Command::Set(FormField::Name, " Green salad".to_string()))
        );
        assert_eq!(
            parse_command("name"),
            Ok(Command::Set(FormField::Name, String::new()))
        );
    }

    #[test]
    fn parse_rejects_unknown_and_incomplete_commands() {
        assert_eq!(
            parse_command("restart"),
            Err(CommandError::Unknown("restart".to_string()))
        );
        assert_eq!(
            parse_command("edit"),
            Err(CommandError::MissingArgument("edit"))
        );
        assert_eq!(
            parse_command("delete 0"),
            Err(CommandError::InvalidPosition("0".to_string()))
        );
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
    }

    #[test]
    fn script_creates_edits_and_totals() {
        let (shell, output) = run_script(
            "name Salad\ncalories 250\nsave\n\
             category 2\nname Run\ncalories 400\nsave\n\
             edit 1\ncalories 300\nsave\ntotals\n",
        );

        let activities = shell.store().activities();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].name, "Salad");
        assert_eq!(activities[0].calories, 300);
        assert_eq!(activities[1].category, 2);
        assert_eq!(shell.store().active_id(), None);
        assert_eq!(shell.editor().phase(), EditorPhase::Fresh);
        assert!(output.contains("consumed: 300 kcal | burned: 400 kcal | net: -100 kcal"));
    }

    #[test]
    fn invalid_save_is_blocked_and_reported() {
        let (shell, output) = run_script("name Salad\nsave\n");

        assert!(shell.store().activities().is_empty());
        assert!(output.contains("[Save Food] disabled"));
        assert!(output.contains("error: cannot save draft"));
    }

    #[test]
    fn unknown_command_leaves_store_untouched() {
        let (shell, output) = run_script("name Salad\ncalories 250\nsave\nrestart-app\nlist\n");

        assert_eq!(shell.store().activities().len(), 1);
        assert!(output.contains("unknown command `restart-app`"));
        assert!(output.contains(" 1. [Food] Salad 250 kcal"));
    }

    #[test]
    fn edit_delete_then_save_keeps_deleted_activity_gone() {
        let (shell, output) =
            run_script("name Salad\ncalories 250\nsave\nedit 1\ndelete 1\nsave\nlist\n");

        assert!(shell.store().activities().is_empty());
        assert_eq!(shell.editor().phase(), EditorPhase::Fresh);
        assert!(output.contains("error: cannot save draft"));
        assert!(output.ends_with("no activities yet\n"));
    }

    #[test]
    fn delete_and_out_of_range_positions() {
        let (shell, output) =
            run_script("name Salad\ncalories 250\nsave\ndelete 2\ndelete 1\nlist\nquit\nlist\n");

        assert!(shell.store().activities().is_empty());
        assert!(output.contains("error: no activity at position 2"));
        assert_eq!(output.matches("no activities yet").count(), 2);
    }
}
