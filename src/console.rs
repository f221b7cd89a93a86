//! Line-oriented front end. Each line is one command; the wizard or editor is
//! re-rendered after every change.

use api::Client;
use core::{
    fmt::{self, Display},
    time::Duration,
};
use model::{BasicSettings, Category};
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use wizard::{
    basic::BasicEditor,
    category::CategoryPicker,
    edit::{BasicEdit, CategoryEdit, ImportEdit, MediaEdit, PricingEdit, ScheduleEdit},
    gate, Controller, Edit, Hooks, Stage, Step,
};

const HELP: &str = "\
Commands:
  next | back | cancel          move between steps
  show                          print the current step again
  set <field> <value>           change a field of the current step
  categories                    reload the category list
  new-category <name> [| desc]  create a category and select it
  import <path> | import clear  load questions from a JSON document
  group add|remove <name>       assign or unassign a group
  tag add|remove <name>         add or remove a tag
  edit | confirm                on the summary, go back or submit
  quit                          leave without saving

Fields:
  category <id>
  pricing free|paid, price, coupon, offline yes|no
  title, description, duration, marks, attempts unlimited|1
  shuffle yes|no, negative yes|no, penalty
  start-date, start-time, end-date, end-time
  visibility public|unlisted|private
  cover, difficulty easy|medium|hard, draft yes|no";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(Box<str>),
    MissingArgument(&'static str),
    UnknownField(Box<str>),
    InvalidValue { field: &'static str, value: Box<str> },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Type `help` for the list of commands."),
            Self::UnknownCommand(cmd) => write!(f, "Unknown command `{cmd}`. Type `help` for the list of commands."),
            Self::MissingArgument(what) => write!(f, "Missing {what}."),
            Self::UnknownField(field) => write!(f, "Unknown field `{field}`."),
            Self::InvalidValue { field, value } => write!(f, "`{value}` is not a valid value for {field}."),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Add,
    Remove,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Next,
    Back,
    Cancel,
    EditDetails,
    Confirm,
    Show,
    Help,
    Quit,
    Categories,
    NewCategory { name: Box<str>, description: Box<str> },
    Set(Edit),
    Import(Box<str>),
    ClearImport,
    Group(Toggle, Box<str>),
    Tag(Toggle, Box<str>),
}

fn flag(field: &'static str, value: &str) -> Result<bool, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "on" | "true" => Ok(true),
        "no" | "off" | "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { field, value: value.into() }),
    }
}

fn choice<T: core::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.to_ascii_lowercase().parse().map_err(|_| ParseError::InvalidValue { field, value: value.into() })
}

/// Maps `set <field> <value>` onto the edit of the step owning that field.
fn field_edit(field: &str, value: &str) -> Result<Edit, ParseError> {
    let text = String::from(value);
    let edit = match field {
        "category" => CategoryEdit::Select(text).into(),
        "pricing" => PricingEdit::Kind(choice("pricing", value)?).into(),
        "price" => PricingEdit::Price(text).into(),
        "coupon" => PricingEdit::Coupon(text).into(),
        "offline" => PricingEdit::OfflinePayment(flag("offline", value)?).into(),
        "title" => BasicEdit::Title(text).into(),
        "description" => BasicEdit::Description(text).into(),
        "duration" => BasicEdit::Duration(text).into(),
        "marks" => BasicEdit::TotalMarks(text).into(),
        "attempts" => BasicEdit::AttemptLimit(choice("attempts", value)?).into(),
        "shuffle" => BasicEdit::Shuffle(flag("shuffle", value)?).into(),
        "negative" => BasicEdit::NegativeMarking(flag("negative", value)?).into(),
        "penalty" => BasicEdit::NegativePerWrong(text).into(),
        "start-date" => ScheduleEdit::StartDate(text).into(),
        "start-time" => ScheduleEdit::StartTime(text).into(),
        "end-date" => ScheduleEdit::EndDate(text).into(),
        "end-time" => ScheduleEdit::EndTime(text).into(),
        "visibility" => ScheduleEdit::Visibility(choice("visibility", value)?).into(),
        "cover" => MediaEdit::CoverImage(text).into(),
        "difficulty" => MediaEdit::Difficulty(choice("difficulty", value)?).into(),
        "draft" => MediaEdit::SaveAsDraft(flag("draft", value)?).into(),
        _ => return Err(ParseError::UnknownField(field.into())),
    };
    Ok(edit)
}

fn toggle(rest: &str) -> Result<(Toggle, Box<str>), ParseError> {
    let (action, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let toggle = match action {
        "add" => Toggle::Add,
        "remove" => Toggle::Remove,
        "" => return Err(ParseError::MissingArgument("`add` or `remove`")),
        _ => return Err(ParseError::InvalidValue { field: "the action", value: action.into() }),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::MissingArgument("name"));
    }
    Ok((toggle, name.into()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match cmd {
            "" => return Err(ParseError::Empty),
            "next" => Self::Next,
            "back" => Self::Back,
            "cancel" => Self::Cancel,
            "edit" => Self::EditDetails,
            "confirm" => Self::Confirm,
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "categories" => Self::Categories,
            "new-category" => {
                let (name, description) = rest.split_once('|').unwrap_or((rest, ""));
                Self::NewCategory { name: name.trim().into(), description: description.trim().into() }
            }
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ParseError::MissingArgument("field name"));
                }
                Self::Set(field_edit(field, value.trim())?)
            }
            "import" if rest == "clear" => Self::ClearImport,
            "import" if rest.is_empty() => return Err(ParseError::MissingArgument("path")),
            "import" => Self::Import(rest.into()),
            "group" => {
                let (toggle, name) = toggle(rest)?;
                Self::Group(toggle, name)
            }
            "tag" => {
                let (toggle, name) = toggle(rest)?;
                Self::Tag(toggle, name)
            }
            _ => return Err(ParseError::UnknownCommand(cmd.into())),
        };
        Ok(command)
    }
}

type Input = Lines<BufReader<Stdin>>;

async fn prompt(lines: &mut Input) -> anyhow::Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

fn yes_no(on: bool) -> &'static str {
    if on {
        "yes"
    } else {
        "no"
    }
}

fn print_categories(picker: &CategoryPicker, selected: &str) {
    for Category { id, name, .. } in picker.categories() {
        let mark = if id == selected { '*' } else { ' ' };
        println!(" {mark} {id}  {name}");
    }
    if selected.trim().is_empty() {
        println!("{}", CategoryPicker::INFO);
    }
    if let Some(status) = picker.status() {
        println!("{status}");
    }
}

fn print_basic(basic: &BasicSettings) {
    println!("  title        {}", basic.title);
    println!("  description  {}", basic.description);
    println!("  duration     {}", basic.duration_minutes);
    println!("  marks        {}", basic.total_marks);
    println!("  attempts     {}", basic.attempt_limit);
    println!("  shuffle      {}", yes_no(basic.shuffle_questions));
    println!("  negative     {}", yes_no(basic.negative_marking));
    println!("  penalty      {}", basic.negative_per_wrong);
}

fn render(controller: &Controller) {
    let wizard = controller.wizard();
    let draft = wizard.draft();
    match controller.stage() {
        Stage::Editing(step) => {
            println!("\n{step}");
            match step {
                Step::Category => print_categories(controller.categories(), &draft.category),
                Step::Pricing => {
                    let pricing = &draft.pricing;
                    println!("  pricing      {}", pricing.kind);
                    println!("  price        {}", pricing.price);
                    println!("  coupon       {}", pricing.coupon_code);
                    println!("  offline      {}", yes_no(pricing.allow_offline_payment));
                }
                Step::Basic => print_basic(&draft.basic),
                Step::Import => match &draft.import.source {
                    Some(source) => println!("  {} questions from {source}", draft.import.questions.len()),
                    None => println!("  No questions imported. This step is optional."),
                },
                Step::Schedule => {
                    let schedule = &draft.schedule;
                    println!("  start        {} {}", schedule.start_date, schedule.start_time);
                    println!("  end          {} {}", schedule.end_date, schedule.end_time);
                    println!("  visibility   {}", schedule.visibility);
                    println!("  groups       {}", schedule.assigned_groups.join(", "));
                }
                Step::Media => {
                    let media = &draft.media;
                    println!("  cover        {}", media.cover_image_preview);
                    println!("  tags         {}", media.tags.join(", "));
                    println!("  difficulty   {}", media.difficulty_level);
                    println!("  draft        {}", yes_no(media.save_as_draft));
                }
            }
            if let Err(req) = gate::check(draft, step) {
                println!("{req}");
            }
        }
        Stage::Summary => {
            println!("\nSummary\n{}", controller.summary());
            println!("Type `confirm` to create the quiz or `edit` to go back.");
        }
        Stage::Submitting | Stage::Closed => {}
    }
    if let Some(status) = controller.status() {
        println!("{status}");
    }
}

async fn execute(controller: &mut Controller, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Next => {
            controller.next()?;
        }
        Command::Back => {
            controller.back()?;
        }
        Command::Cancel | Command::Quit => controller.cancel()?,
        Command::EditDetails => {
            controller.edit_details()?;
        }
        Command::Confirm => {
            controller.confirm().await?;
        }
        Command::Show => {}
        Command::Help => println!("{HELP}"),
        Command::Categories => controller.reload_categories().await,
        Command::NewCategory { name, description } => controller.create_category(&name, &description).await?,
        Command::Set(edit) => controller.apply(edit)?,
        Command::Import(path) => {
            let text = tokio::fs::read_to_string(&*path).await?;
            let count = controller.import(&path, &text)?;
            println!("Imported {count} questions.");
        }
        Command::ClearImport => controller.apply(ImportEdit::Clear.into())?,
        Command::Group(Toggle::Add, name) => controller.apply(ScheduleEdit::AddGroup(name.into()).into())?,
        Command::Group(Toggle::Remove, name) => controller.apply(ScheduleEdit::RemoveGroup(name.into()).into())?,
        Command::Tag(Toggle::Add, name) => controller.apply(MediaEdit::AddTag(name.into()).into())?,
        Command::Tag(Toggle::Remove, name) => controller.apply(MediaEdit::RemoveTag(name.into()).into())?,
    }
    Ok(())
}

/// Walks the user through creating a new quiz.
pub async fn run_wizard(client: Client) -> anyhow::Result<()> {
    let hooks = Hooks::new(
        |created| match &created.id {
            Some(id) => println!("{} (id {id})", created.message),
            None => println!("{}", created.message),
        },
        || println!("Wizard closed."),
    );

    let mut controller = Controller::open(client, hooks).await;
    let mut lines = BufReader::new(io::stdin()).lines();
    render(&controller);

    while controller.stage() != Stage::Closed {
        let Some(line) = prompt(&mut lines).await? else {
            controller.cancel()?;
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let quiet = matches!(command, Command::Help);
        match execute(&mut controller, command).await {
            Ok(()) if !quiet => render(&controller),
            Ok(()) => {}
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

/// Edits the basic settings of an existing quiz, saving after every pause.
pub async fn run_editor(client: Client, id: &str, delay: Duration) -> anyhow::Result<()> {
    let mut editor = BasicEditor::open(client, id, delay, |err| println!("Autosave failed: {err}")).await?;
    println!("Editing quiz {}. Changes save automatically; `quit` to leave.", editor.id());
    print_basic(editor.settings());

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = prompt(&mut lines).await? {
        match Command::parse(&line) {
            Ok(Command::Set(Edit::Basic(edit))) => {
                editor.apply(edit);
                if !editor.is_complete() {
                    println!("Warning: required settings are missing or invalid.");
                }
            }
            Ok(Command::Set(_)) => println!("Only basic settings can be edited here."),
            Ok(Command::Show) => print_basic(editor.settings()),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit | Command::Cancel) => break,
            Ok(_) => println!("That command is only available in the wizard."),
            Err(err) => println!("{err}"),
        }
    }

    // A pending save still needs its quiet period before the worker is dropped.
    tokio::time::sleep(delay * 2).await;
    Ok(())
}
